use std::fmt;

use super::types::{Score, StudentCount, MAX_SCORE, MAX_STUDENTS, MIN_SCORE, MIN_STUDENTS};

/// Why a raw field value was rejected.
///
/// The `Display` text is the message shown next to the offending field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Empty where a value is required, or contains something other than 0-9
    NotANumber,
    /// A number, but outside the field's inclusive bounds
    OutOfRange { min: u32, max: u32 },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::NotANumber => write!(f, "Enter only digits [0-9]."),
            ValidationError::OutOfRange { min, max } => {
                write!(f, "Enter a number between {} and {}.", min, max)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validate the student count field.
///
/// Accepts digit-only text representing 1..=4. Empty text is `NotANumber`.
pub fn validate_count(text: &str) -> Result<StudentCount, ValidationError> {
    let min = MIN_STUDENTS;
    let max = MAX_STUDENTS as u32;
    let value = parse_bounded(text, min, max)?;
    StudentCount::new(value).ok_or(ValidationError::OutOfRange { min, max })
}

/// Validate one score field.
///
/// Empty text means "not yet provided" and yields `Ok(None)`. Checks run in a
/// fixed order (empty, digits, range) and the first failure wins.
pub fn validate_score(text: &str) -> Result<Option<Score>, ValidationError> {
    if text.is_empty() {
        return Ok(None);
    }
    let value = parse_bounded(text, MIN_SCORE, MAX_SCORE)?;
    Score::new(value)
        .map(Some)
        .ok_or(ValidationError::OutOfRange {
            min: MIN_SCORE,
            max: MAX_SCORE,
        })
}

/// Digit check, then range check against `min..=max`
fn parse_bounded(text: &str, min: u32, max: u32) -> Result<u32, ValidationError> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::NotANumber);
    }

    // Digit-only text that overflows is still a number, just not one in range
    let value: u32 = text
        .parse()
        .map_err(|_| ValidationError::OutOfRange { min, max })?;

    if value < min || value > max {
        return Err(ValidationError::OutOfRange { min, max });
    }

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_accepts_one_through_four() {
        for n in 1..=4 {
            let count = validate_count(&n.to_string()).unwrap();
            assert_eq!(count.get(), n);
        }
    }

    #[test]
    fn test_count_out_of_range() {
        assert_eq!(
            validate_count("5"),
            Err(ValidationError::OutOfRange { min: 1, max: 4 })
        );
        assert_eq!(
            validate_count("0"),
            Err(ValidationError::OutOfRange { min: 1, max: 4 })
        );
    }

    #[test]
    fn test_count_not_a_number() {
        assert_eq!(validate_count("abc"), Err(ValidationError::NotANumber));
        assert_eq!(validate_count(""), Err(ValidationError::NotANumber));
        assert_eq!(validate_count("-1"), Err(ValidationError::NotANumber));
        assert_eq!(validate_count(" 2"), Err(ValidationError::NotANumber));
        assert_eq!(validate_count("2.0"), Err(ValidationError::NotANumber));
    }

    #[test]
    fn test_count_leading_zeros() {
        assert_eq!(validate_count("003").unwrap().get(), 3);
    }

    #[test]
    fn test_count_overflow_is_out_of_range() {
        assert_eq!(
            validate_count("99999999999999999999"),
            Err(ValidationError::OutOfRange { min: 1, max: 4 })
        );
    }

    #[test]
    fn test_score_empty_is_not_provided() {
        assert_eq!(validate_score(""), Ok(None));
    }

    #[test]
    fn test_score_accepts_bounds() {
        assert_eq!(validate_score("0").unwrap().map(Score::get), Some(0));
        assert_eq!(validate_score("100").unwrap().map(Score::get), Some(100));
    }

    #[test]
    fn test_score_out_of_range() {
        assert_eq!(
            validate_score("150"),
            Err(ValidationError::OutOfRange { min: 0, max: 100 })
        );
    }

    #[test]
    fn test_score_not_a_number() {
        assert_eq!(validate_score("9a"), Err(ValidationError::NotANumber));
        assert_eq!(validate_score(" "), Err(ValidationError::NotANumber));
    }

    #[test]
    fn test_digit_check_wins_over_range_check() {
        // Would be out of range if parsed, but the digit check runs first
        assert_eq!(validate_score("1000x"), Err(ValidationError::NotANumber));
    }

    #[test]
    fn test_messages_differ_by_field() {
        let count_err = validate_count("9").unwrap_err();
        let score_err = validate_score("101").unwrap_err();
        assert_eq!(count_err.to_string(), "Enter a number between 1 and 4.");
        assert_eq!(score_err.to_string(), "Enter a number between 0 and 100.");
        assert_eq!(
            ValidationError::NotANumber.to_string(),
            "Enter only digits [0-9]."
        );
    }
}
