//! Error types for the checkpoint guardian.

use thiserror::Error;

/// Errors raised by checkpoint store adapters.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// Underlying I/O failure (disk full, permissions, unreadable file).
    #[error("checkpoint store I/O failure: {message}")]
    Io { message: String },

    /// A stored record exists but cannot be decoded.
    #[error("corrupt checkpoint record for step {step}: {reason}")]
    Corrupt { step: u64, reason: String },
}

/// Guardian-level errors.
#[derive(Debug, Clone, Error)]
pub enum CheckpointError {
    /// Unrecoverable store failure; propagated to the caller.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A checkpoint for this step is already persisted.
    #[error("checkpoint for step {step} already exists")]
    StepExists { step: u64 },

    /// Model state could not be serialized.
    #[error("model state serialization failed: {reason}")]
    Serialization { reason: String },

    /// The consensus round itself failed to run (not a rejection).
    #[error("consensus round failure: {reason}")]
    Consensus { reason: String },
}

/// Result type for guardian operations.
pub type CheckpointResult<T> = Result<T, CheckpointError>;
