//! Error types for the energy scheduler.

use thiserror::Error;

/// Energy scheduler errors.
#[derive(Debug, Clone, Error)]
pub enum EnergyError {
    /// Malformed configuration detected at construction.
    #[error("invalid scheduler configuration: {reason}")]
    InvalidConfig { reason: String },

    /// A telemetry client returned an error.
    #[error("{source_name} telemetry failure: {reason}")]
    Telemetry {
        source_name: &'static str,
        reason: String,
    },

    /// A telemetry client exceeded its time budget.
    #[error("{source_name} telemetry timed out")]
    TelemetryTimeout { source_name: &'static str },
}

/// Result type for scheduler operations.
pub type EnergyResult<T> = Result<T, EnergyError>;
