use std::fmt;

/// Number of score slots in every record (and the upper bound on student count)
pub const MAX_STUDENTS: usize = 4;

/// Smallest accepted student count
pub const MIN_STUDENTS: u32 = 1;

/// Inclusive score bounds
pub const MIN_SCORE: u32 = 0;
pub const MAX_SCORE: u32 = 100;

/// Number of students being graded.
///
/// Always within `MIN_STUDENTS..=MAX_STUDENTS`; the only way to build one is
/// through [`StudentCount::new`] or the validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StudentCount(u8);

impl StudentCount {
    /// Returns None when `value` is outside 1..=4
    pub fn new(value: u32) -> Option<Self> {
        if (MIN_STUDENTS..=MAX_STUDENTS as u32).contains(&value) {
            Some(Self(value as u8))
        } else {
            None
        }
    }

    pub fn get(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for StudentCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single student's score, always within 0..=100
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Score(u8);

impl Score {
    /// Returns None when `value` is outside 0..=100
    pub fn new(value: u32) -> Option<Self> {
        if (MIN_SCORE..=MAX_SCORE).contains(&value) {
            Some(Self(value as u8))
        } else {
            None
        }
    }

    pub fn get(self) -> u32 {
        self.0 as u32
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_student_count_bounds() {
        assert!(StudentCount::new(0).is_none());
        assert_eq!(StudentCount::new(1).map(StudentCount::get), Some(1));
        assert_eq!(StudentCount::new(4).map(StudentCount::get), Some(4));
        assert!(StudentCount::new(5).is_none());
    }

    #[test]
    fn test_score_bounds() {
        assert_eq!(Score::new(0).map(Score::get), Some(0));
        assert_eq!(Score::new(100).map(Score::get), Some(100));
        assert!(Score::new(101).is_none());
    }

    #[test]
    fn test_display() {
        assert_eq!(StudentCount::new(3).unwrap().to_string(), "3");
        assert_eq!(Score::new(87).unwrap().to_string(), "87");
    }
}
