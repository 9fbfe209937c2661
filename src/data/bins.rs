//! Bin Specification Module
//! Maps continuous numeric values onto labeled range buckets.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Label used for values that fall outside every range, or are missing.
pub const UNCLASSIFIED: &str = "unclassified";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BinSpecError {
    #[error("Bin specification has no ranges")]
    Empty,
    #[error("Bin '{label}' has lower bound {lower} not below upper bound {upper}")]
    InvertedRange { label: String, lower: f64, upper: f64 },
    #[error("Bins '{first}' and '{second}' overlap")]
    Overlap { first: String, second: String },
    #[error("Unclassified label '{0}' is also the label of a range")]
    UnclassifiedCollision(String),
}

/// One `[lower, upper)` range and the bucket label it maps to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinRange {
    pub lower: f64,
    pub upper: f64,
    pub label: String,
}

impl BinRange {
    pub fn new(lower: f64, upper: f64, label: impl Into<String>) -> Self {
        Self {
            lower,
            upper,
            label: label.into(),
        }
    }

    /// Lower bound inclusive, upper bound exclusive.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value < self.upper
    }
}

#[derive(Debug, Clone, Deserialize)]
struct RawBinSpec {
    ranges: Vec<BinRange>,
    #[serde(default = "default_unclassified")]
    unclassified: String,
}

fn default_unclassified() -> String {
    UNCLASSIFIED.to_string()
}

/// Ordered, non-overlapping set of ranges.
///
/// Values that no range covers (and missing values) land in the
/// `unclassified` bucket, which is kept as a group of its own so callers can
/// see how much of the data could not be classified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBinSpec")]
pub struct BinSpec {
    ranges: Vec<BinRange>,
    unclassified: String,
}

impl TryFrom<RawBinSpec> for BinSpec {
    type Error = BinSpecError;

    fn try_from(raw: RawBinSpec) -> Result<Self, Self::Error> {
        BinSpec::with_unclassified(raw.ranges, raw.unclassified)
    }
}

impl BinSpec {
    /// Build a spec using the default unclassified label.
    pub fn new(ranges: Vec<BinRange>) -> Result<Self, BinSpecError> {
        Self::with_unclassified(ranges, UNCLASSIFIED)
    }

    pub fn with_unclassified(
        ranges: Vec<BinRange>,
        unclassified: impl Into<String>,
    ) -> Result<Self, BinSpecError> {
        if ranges.is_empty() {
            return Err(BinSpecError::Empty);
        }

        for range in &ranges {
            if !(range.lower < range.upper) {
                return Err(BinSpecError::InvertedRange {
                    label: range.label.clone(),
                    lower: range.lower,
                    upper: range.upper,
                });
            }
        }

        for (i, a) in ranges.iter().enumerate() {
            for b in &ranges[i + 1..] {
                if a.lower < b.upper && b.lower < a.upper {
                    return Err(BinSpecError::Overlap {
                        first: a.label.clone(),
                        second: b.label.clone(),
                    });
                }
            }
        }

        let unclassified = unclassified.into();
        if ranges.iter().any(|r| r.label == unclassified) {
            return Err(BinSpecError::UnclassifiedCollision(unclassified));
        }

        Ok(Self {
            ranges,
            unclassified,
        })
    }

    /// Hospital rating buckets used across the dashboard.
    pub fn hospital_rating() -> Self {
        Self {
            ranges: vec![
                BinRange::new(0.0, 3.0, "Below 3.0"),
                BinRange::new(3.0, 4.0, "3.0 - 3.9"),
                BinRange::new(4.0, 5.0, "4.0 - 5.0"),
            ],
            unclassified: UNCLASSIFIED.to_string(),
        }
    }

    pub fn ranges(&self) -> &[BinRange] {
        &self.ranges
    }

    pub fn unclassified_label(&self) -> &str {
        &self.unclassified
    }

    /// Label of the first range containing `value`, or `None` when unclassified.
    pub fn classify(&self, value: f64) -> Option<&str> {
        if value.is_nan() {
            return None;
        }
        self.ranges
            .iter()
            .find(|r| r.contains(value))
            .map(|r| r.label.as_str())
    }

    /// Bucket label for a possibly missing value.
    pub fn label_for(&self, value: Option<f64>) -> &str {
        value
            .and_then(|v| self.classify(v))
            .unwrap_or(&self.unclassified)
    }
}

impl Default for BinSpec {
    fn default() -> Self {
        Self::hospital_rating()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_buckets_match_half_open_ranges() {
        let spec = BinSpec::hospital_rating();
        let labels: Vec<&str> = [Some(2.9), Some(3.0), Some(4.999), None]
            .into_iter()
            .map(|v| spec.label_for(v))
            .collect();
        assert_eq!(labels, ["Below 3.0", "3.0 - 3.9", "4.0 - 5.0", "unclassified"]);
    }

    #[test]
    fn upper_bound_is_exclusive() {
        let spec = BinSpec::hospital_rating();
        assert_eq!(spec.classify(5.0), None);
        assert_eq!(spec.classify(-0.1), None);
        assert_eq!(spec.classify(f64::NAN), None);
    }

    #[test]
    fn unclassified_label_must_differ_from_range_labels() {
        let err = BinSpec::with_unclassified(
            vec![BinRange::new(0.0, 3.0, "Low"), BinRange::new(3.0, 5.0, "High")],
            "Low",
        )
        .unwrap_err();
        assert_eq!(err, BinSpecError::UnclassifiedCollision("Low".to_string()));
    }

    #[test]
    fn rejects_overlapping_ranges() {
        let err = BinSpec::new(vec![
            BinRange::new(0.0, 3.5, "low"),
            BinRange::new(3.0, 5.0, "high"),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            BinSpecError::Overlap {
                first: "low".into(),
                second: "high".into()
            }
        );
    }

    #[test]
    fn rejects_inverted_and_empty() {
        assert!(matches!(
            BinSpec::new(vec![BinRange::new(2.0, 1.0, "bad")]),
            Err(BinSpecError::InvertedRange { .. })
        ));
        assert_eq!(BinSpec::new(Vec::new()), Err(BinSpecError::Empty));
    }

    #[test]
    fn adjacent_ranges_are_allowed() {
        let spec = BinSpec::with_unclassified(
            vec![BinRange::new(0.0, 1.0, "a"), BinRange::new(1.0, 2.0, "b")],
            "other",
        )
        .unwrap();
        assert_eq!(spec.label_for(Some(1.0)), "b");
        assert_eq!(spec.label_for(Some(7.0)), "other");
    }
}
