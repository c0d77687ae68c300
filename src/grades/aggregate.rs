use serde::ser::{Serialize, SerializeSeq, Serializer};
use std::fmt;

use super::types::{Score, MAX_STUDENTS};

/// Trailing value of a record.
///
/// `None` is the integer-0 sentinel used when no positive score exists. It is
/// rendered as `0`, never as `0.0`, so "no scores" and "mean of zero" are only
/// told apart by context.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Average {
    None,
    Mean(f64),
}

impl Average {
    /// Numeric value (0.0 for the sentinel)
    pub fn value(self) -> f64 {
        match self {
            Average::None => 0.0,
            Average::Mean(v) => v,
        }
    }
}

impl fmt::Display for Average {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Average::None => write!(f, "0"),
            // Whole means keep a fractional digit ("85.0"), others use the
            // shortest round-trip form ("83.33333333333333")
            Average::Mean(v) if v.is_finite() && v.fract() == 0.0 => write!(f, "{:.1}", v),
            Average::Mean(v) => write!(f, "{}", v),
        }
    }
}

impl Serialize for Average {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Average::None => serializer.serialize_u32(0),
            Average::Mean(v) => serializer.serialize_f64(*v),
        }
    }
}

/// Padded scores followed by their average.
///
/// Built once per aggregation, then persisted and displayed. Serializes as a
/// flat sequence, e.g. `[80,0,90,0,85.0]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRecord {
    scores: Vec<u32>,
    average: Average,
}

impl ResultRecord {
    pub fn scores(&self) -> &[u32] {
        &self.scores
    }

    pub fn average(&self) -> Average {
        self.average
    }

    /// Number of fields, scores plus the average
    pub fn field_count(&self) -> usize {
        self.scores.len() + 1
    }

    /// Every field rendered as text, in record order
    pub fn fields(&self) -> Vec<String> {
        self.scores
            .iter()
            .map(|s| s.to_string())
            .chain(std::iter::once(self.average.to_string()))
            .collect()
    }
}

impl Serialize for ResultRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.field_count()))?;
        for score in &self.scores {
            seq.serialize_element(score)?;
        }
        seq.serialize_element(&self.average)?;
        seq.end()
    }
}

/// Pad `scores` with zeros up to `max_count` and append the average of the
/// strictly positive entries.
///
/// A score of 0 is indistinguishable from a padded slot and is left out of the
/// mean. Callers must not pass more than `max_count` scores; the validator's
/// count bound guarantees this. Extra entries are kept as-is.
pub fn process_grades(scores: &[u32], max_count: usize) -> ResultRecord {
    debug_assert!(
        scores.len() <= max_count,
        "{} scores exceed the record size of {}",
        scores.len(),
        max_count
    );

    let mut padded = scores.to_vec();
    if padded.len() < max_count {
        padded.resize(max_count, 0);
    }

    let positive: Vec<u32> = padded.iter().copied().filter(|&s| s > 0).collect();
    let average = if positive.is_empty() {
        Average::None
    } else {
        let sum: u64 = positive.iter().map(|&s| s as u64).sum();
        Average::Mean(sum as f64 / positive.len() as f64)
    };

    ResultRecord {
        scores: padded,
        average,
    }
}

/// Aggregate validated scores into a record of `MAX_STUDENTS` slots
pub fn process_scores(scores: &[Score]) -> ResultRecord {
    let values: Vec<u32> = scores.iter().map(|s| s.get()).collect();
    process_grades(&values, MAX_STUDENTS)
}
