use std::fmt;

use super::types::Score;
use super::validation::{validate_count, validate_score, ValidationError};

/// An input field of the grading form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Count,
    /// 0-based score slot
    Score(usize),
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Count => write!(f, "Number of Students"),
            Field::Score(i) => write!(f, "Student {} Score", i + 1),
        }
    }
}

/// A validation error bound to the field it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub error: ValidationError,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.error)
    }
}

impl std::error::Error for FieldError {}

/// Raw text of every field on the form.
///
/// Immutable: edits return a new value, and the core re-evaluates the whole
/// form on every change instead of remembering earlier results.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    count: String,
    scores: Vec<String>,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a form from raw strings, as if typed field by field.
    ///
    /// Scores beyond the active field count are dropped.
    pub fn from_raw<S: AsRef<str>>(count: &str, scores: &[S]) -> Self {
        scores
            .iter()
            .enumerate()
            .fold(Self::new().with_count(count), |form, (i, text)| {
                form.with_score(i, text.as_ref())
            })
    }

    /// Replace the count text.
    ///
    /// A valid count resizes the score fields to match, keeping text already
    /// typed into surviving slots. An invalid count removes every score field.
    pub fn with_count(&self, text: impl Into<String>) -> Self {
        let count = text.into();
        let scores = match validate_count(&count) {
            Ok(n) => {
                let mut scores = self.scores.clone();
                scores.resize(n.get(), String::new());
                scores
            }
            Err(_) => Vec::new(),
        };
        Self { count, scores }
    }

    /// Replace the text of score slot `index`; out-of-range slots are ignored
    pub fn with_score(&self, index: usize, text: impl Into<String>) -> Self {
        let mut next = self.clone();
        if let Some(slot) = next.scores.get_mut(index) {
            *slot = text.into();
        }
        next
    }

    pub fn count_text(&self) -> &str {
        &self.count
    }

    pub fn score_texts(&self) -> &[String] {
        &self.scores
    }

    /// Text of `field`, or None for an inactive score slot
    pub fn text(&self, field: Field) -> Option<&str> {
        match field {
            Field::Count => Some(&self.count),
            Field::Score(i) => self.scores.get(i).map(String::as_str),
        }
    }

    /// Number of score fields currently shown
    pub fn active_scores(&self) -> usize {
        self.scores.len()
    }

    /// Validate every field.
    ///
    /// With an invalid count only the count error is reported, since no score
    /// fields exist. Otherwise each rejected score carries its own error.
    pub fn evaluate(&self) -> FormStatus {
        if let Err(error) = validate_count(&self.count) {
            return FormStatus {
                errors: vec![FieldError {
                    field: Field::Count,
                    error,
                }],
                scores: Vec::new(),
            };
        }

        let mut errors = Vec::new();
        let mut scores = Vec::with_capacity(self.scores.len());
        for (i, text) in self.scores.iter().enumerate() {
            match validate_score(text) {
                Ok(score) => scores.push(score),
                Err(error) => {
                    errors.push(FieldError {
                        field: Field::Score(i),
                        error,
                    });
                    scores.push(None);
                }
            }
        }

        FormStatus { errors, scores }
    }
}

/// Outcome of evaluating a [`FormState`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormStatus {
    /// Rejected fields, in form order
    pub errors: Vec<FieldError>,
    /// One entry per active score field; None when empty or rejected
    pub scores: Vec<Option<Score>>,
}

impl FormStatus {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Error shown next to `field`, if any
    pub fn error_for(&self, field: Field) -> Option<&ValidationError> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| &e.error)
    }

    /// Score fields that are still empty
    pub fn missing(&self) -> Vec<Field> {
        self.scores
            .iter()
            .enumerate()
            .filter(|(i, score)| score.is_none() && self.error_for(Field::Score(*i)).is_none())
            .map(|(i, _)| Field::Score(i))
            .collect()
    }

    /// The typed scores, only when every active field holds an accepted value
    pub fn ready_scores(&self) -> Option<Vec<Score>> {
        if !self.is_valid() || self.scores.is_empty() {
            return None;
        }
        self.scores.iter().copied().collect()
    }
}
