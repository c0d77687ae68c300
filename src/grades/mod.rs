pub mod aggregate;
pub mod form;
pub mod types;
pub mod validation;

pub use aggregate::{process_grades, process_scores, Average, ResultRecord};
pub use form::{Field, FieldError, FormState, FormStatus};
pub use types::{Score, StudentCount, MAX_SCORE, MAX_STUDENTS, MIN_SCORE, MIN_STUDENTS};
pub use validation::{validate_count, validate_score, ValidationError};
