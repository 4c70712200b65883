//! Aggregated safety report.

use serde::{Deserialize, Serialize};

/// Outcome of one `SafetyGate::evaluate()` pass.
///
/// Immutable snapshot; persistence is the verifier's and audit logger's
/// job. `reasons` strings are operator-facing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafetyReport {
    /// True iff every check passed.
    pub ok: bool,
    pub checks_passed: usize,
    pub checks_total: usize,
    /// `checks_passed / checks_total`.
    pub pass_rate: f64,
    /// One entry per failing check; empty when `ok`.
    pub reasons: Vec<String>,
}

impl SafetyReport {
    /// Build a report from failure reasons and the total check count.
    pub fn from_outcomes(checks_total: usize, reasons: Vec<String>) -> Self {
        let checks_passed = checks_total - reasons.len();
        let pass_rate = if checks_total == 0 {
            0.0
        } else {
            checks_passed as f64 / checks_total as f64
        };
        Self {
            ok: reasons.is_empty(),
            checks_passed,
            checks_total,
            pass_rate,
            reasons,
        }
    }
}
