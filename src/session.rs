use std::fmt;
use std::io;
use std::path::Path;

use crate::grades::{process_scores, Field, FieldError, FormState, ResultRecord};
use crate::output::format_result;
use crate::recorder::save_grades_to_csv;

/// A saved record together with its display text
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub record: ResultRecord,
    pub display: String,
}

/// Why a submit did not produce a saved record
#[derive(Debug)]
pub enum SubmitError {
    /// One or more fields were rejected; nothing was computed or saved
    Invalid(Vec<FieldError>),
    /// Every field is valid but some scores are still empty
    Incomplete { missing: Vec<Field> },
    /// The record was computed but could not be appended
    Io(io::Error),
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitError::Invalid(errors) => {
                let fields: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
                write!(f, "Invalid input: {}", fields.join("; "))
            }
            SubmitError::Incomplete { missing } => {
                let fields: Vec<String> = missing.iter().map(|f| f.to_string()).collect();
                write!(f, "Missing values for: {}", fields.join(", "))
            }
            SubmitError::Io(e) => write!(f, "Failed to save grades: {}", e),
        }
    }
}

impl std::error::Error for SubmitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SubmitError::Io(e) => Some(e),
            _ => None,
        }
    }
}

/// Validate the form, aggregate its scores, append the record to
/// `destination` and return it with its display text.
///
/// Nothing is computed or written unless every field passes at once.
pub fn submit(form: &FormState, destination: &Path) -> Result<Submission, SubmitError> {
    let status = form.evaluate();
    if !status.is_valid() {
        return Err(SubmitError::Invalid(status.errors));
    }

    let scores = status.ready_scores().ok_or_else(|| SubmitError::Incomplete {
        missing: status.missing(),
    })?;

    let record = process_scores(&scores);
    save_grades_to_csv(&record, destination).map_err(SubmitError::Io)?;

    let display = format_result(&record);
    Ok(Submission { record, display })
}

/// Build a form from raw strings and submit it
pub fn submit_raw<S: AsRef<str>>(
    count: &str,
    scores: &[S],
    destination: &Path,
) -> Result<Submission, SubmitError> {
    submit(&FormState::from_raw(count, scores), destination)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grades::{Average, ValidationError};
    use std::fs;

    #[test]
    fn test_submit_saves_and_displays() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grades.csv");

        let submission = submit_raw("2", &["80", "90"], &path).unwrap();

        assert_eq!(submission.record.scores(), &[80, 90, 0, 0]);
        assert_eq!(submission.record.average(), Average::Mean(85.0));
        assert!(submission.display.ends_with("Average: 85.0"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "80,90,0,0,85.0\r\n");
    }

    #[test]
    fn test_invalid_form_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grades.csv");

        let err = submit_raw("2", &["80", "150"], &path).unwrap_err();
        match err {
            SubmitError::Invalid(errors) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].field, Field::Score(1));
                assert_eq!(
                    errors[0].error,
                    ValidationError::OutOfRange { min: 0, max: 100 }
                );
            }
            other => panic!("expected Invalid, got {:?}", other),
        }
        assert!(!path.exists());
    }

    #[test]
    fn test_invalid_count_reported_on_count_field() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grades.csv");

        let err = submit_raw::<&str>("", &[], &path).unwrap_err();
        assert!(matches!(
            err,
            SubmitError::Invalid(ref errors)
                if errors[0].field == Field::Count
                    && errors[0].error == ValidationError::NotANumber
        ));
    }

    #[test]
    fn test_incomplete_form_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grades.csv");

        let err = submit_raw("3", &["80"], &path).unwrap_err();
        match err {
            SubmitError::Incomplete { missing } => {
                assert_eq!(missing, vec![Field::Score(1), Field::Score(2)]);
            }
            other => panic!("expected Incomplete, got {:?}", other),
        }
        assert!(!path.exists());
    }

    #[test]
    fn test_io_error_propagates_unmodified() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("grades.csv");

        let err = submit_raw("1", &["70"], &path).unwrap_err();
        match err {
            SubmitError::Io(e) => assert_eq!(e.kind(), io::ErrorKind::NotFound),
            other => panic!("expected Io, got {:?}", other),
        }
    }

    #[test]
    fn test_submit_error_display() {
        let err = SubmitError::Incomplete {
            missing: vec![Field::Score(0)],
        };
        assert_eq!(err.to_string(), "Missing values for: Student 1 Score");
    }
}
