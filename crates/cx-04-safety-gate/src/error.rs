//! Error types for the safety-gate subsystem.

use thiserror::Error;

/// Probe/collaborator errors seen by the safety gate.
#[derive(Debug, Clone, Error)]
pub enum SafetyError {
    /// Malformed configuration detected at construction.
    #[error("invalid safety-gate configuration: {reason}")]
    InvalidConfig { reason: String },

    /// A probe returned an error.
    #[error("{source_name} probe failure: {reason}")]
    Probe {
        source_name: &'static str,
        reason: String,
    },
}

/// Result type for safety-gate operations.
pub type SafetyResult<T> = Result<T, SafetyError>;

/// Audit chain errors.
///
/// Chain integrity violations identify the first broken entry: a
/// tampered audit trail must be loud, not a boolean.
#[derive(Debug, Error)]
pub enum AuditError {
    /// Underlying log file I/O failure.
    #[error("audit log I/O failure: {message}")]
    Io { message: String },

    /// A record could not be encoded or decoded.
    #[error("audit record encoding failure: {message}")]
    Encode { message: String },

    /// `entries[index].previous_hash` does not match the prior entry.
    #[error("audit chain broken at entry {index}: previous-hash link does not match")]
    BrokenChain { index: u64 },

    /// An entry's stored hash does not match its recomputed hash.
    #[error("audit entry {index} hash mismatch: contents were altered")]
    HashMismatch { index: u64 },
}

/// Policy engine errors.
#[derive(Debug, Clone, Error)]
pub enum PolicyError {
    #[error("policy evaluation failure: {reason}")]
    Evaluation { reason: String },
}

/// Unified verifier errors.
#[derive(Debug, Error)]
pub enum VerifierError {
    /// The audit trail could not be written; verification cannot proceed
    /// without its record.
    #[error(transparent)]
    Audit(#[from] AuditError),
}
