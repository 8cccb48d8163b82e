//! Verification report types.
//!
//! Every `AnalyzeResult` is checked against the wire contract before the
//! pipeline hands it back. Only a passing report lets the result through.

use serde::{Deserialize, Serialize};

/// The outcome of running all contract checks against one result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationReport {
    /// True only if every check passed.
    pub passed: bool,
    /// Every failure found. Empty on pass.
    pub failures: Vec<VerificationFailure>,
}

impl VerificationReport {
    pub fn from_failures(failures: Vec<VerificationFailure>) -> Self {
        Self {
            passed: failures.is_empty(),
            failures,
        }
    }

    /// All failures joined into one line, `[check] message; ...`.
    pub fn summary(&self) -> String {
        self.failures
            .iter()
            .map(|f| format!("[{}] {}", f.check_id, f.message))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// A single failed check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationFailure {
    /// Stable identifier of the check that failed.
    pub check_id: String,
    /// Human-readable explanation.
    pub message: String,
}
