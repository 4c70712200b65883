//! Error types for the trainer.

use cx_02_checkpoint_guardian::CheckpointError;
use thiserror::Error;

/// Model backend errors.
#[derive(Debug, Clone, Error)]
#[error("model backend failure: {reason}")]
pub struct ModelError {
    pub reason: String,
}

/// Trainer errors.
#[derive(Debug, Error)]
pub enum TrainerError {
    /// Malformed configuration detected at construction.
    #[error("invalid trainer configuration: {reason}")]
    InvalidConfig { reason: String },

    /// The model backend failed a step.
    #[error(transparent)]
    Model(#[from] ModelError),

    /// Checkpoint persistence failed unrecoverably.
    #[error(transparent)]
    Checkpoint(#[from] CheckpointError),
}

/// Result type for trainer operations.
pub type TrainerResult<T> = Result<T, TrainerError>;
