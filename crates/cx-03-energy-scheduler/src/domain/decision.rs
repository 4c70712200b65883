//! Training-window decision entity.

use serde::{Deserialize, Serialize};

/// Why a window decision came out the way it did.
///
/// Displays as the operator-facing reason string (`"OK"`,
/// `"GRID_CONSTRAINT"`, ...); no stack traces ever leak here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DecisionReason {
    /// Training may proceed.
    Ok,
    /// Grid draw is above the configured limit.
    GridConstraint,
    /// Battery below minimum during on-peak hours.
    SocLow,
    /// Telemetry could not be read this cycle.
    TelemetryUnavailable,
}

impl std::fmt::Display for DecisionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Ok => "OK",
            Self::GridConstraint => "GRID_CONSTRAINT",
            Self::SocLow => "SOC_LOW",
            Self::TelemetryUnavailable => "TELEMETRY_UNAVAILABLE",
        };
        f.write_str(s)
    }
}

/// The scheduler's verdict for "can we train right now".
///
/// Invariants: `delay_seconds > 0` iff `allowed` is false;
/// `suggested_scale` is always in (0, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerWindowDecision {
    pub allowed: bool,
    pub reason: DecisionReason,
    /// Throughput multiplier to apply if (or when) training proceeds.
    pub suggested_scale: f64,
    /// How long to wait before retrying; 0 when allowed.
    pub delay_seconds: u64,
}

impl PowerWindowDecision {
    pub fn allow(suggested_scale: f64) -> Self {
        Self {
            allowed: true,
            reason: DecisionReason::Ok,
            suggested_scale,
            delay_seconds: 0,
        }
    }

    pub fn deny(reason: DecisionReason, suggested_scale: f64, delay_seconds: u64) -> Self {
        Self {
            allowed: false,
            reason,
            suggested_scale,
            delay_seconds: delay_seconds.max(1),
        }
    }
}
