//! Human-readable churn verdicts

use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of a churn prediction for one employee
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Leave,
    Stay,
}

impl Verdict {
    /// Map a predicted class label to a verdict.
    ///
    /// Only an exact match with the positive label means `Leave`.
    pub fn from_label(label: i64, positive_label: i64) -> Self {
        if label == positive_label {
            Verdict::Leave
        } else {
            Verdict::Stay
        }
    }

    /// Cell value written to the batch label column
    pub fn as_cell(&self) -> &'static str {
        match self {
            Verdict::Leave => "Leave",
            Verdict::Stay => "Stay",
        }
    }

    /// Sentence shown for a single prediction
    pub fn message(&self) -> &'static str {
        match self {
            Verdict::Leave => "🔴 An employee may leave the organization.",
            Verdict::Stay => "🟢 An employee may stay with the organization.",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_cell())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verdict_from_label() {
        assert_eq!(Verdict::from_label(1, 1), Verdict::Leave);
        assert_eq!(Verdict::from_label(0, 1), Verdict::Stay);
        // Anything that is not the positive class stays
        assert_eq!(Verdict::from_label(2, 1), Verdict::Stay);
        assert_eq!(Verdict::from_label(0, 0), Verdict::Leave);
    }

    #[test]
    fn test_verdict_rendering() {
        assert_eq!(Verdict::Leave.as_cell(), "Leave");
        assert_eq!(Verdict::Stay.to_string(), "Stay");
        assert!(Verdict::Leave.message().contains("leave"));
        assert!(Verdict::Stay.message().contains("stay"));
    }
}
