//! Error types for the consensus subsystem.

use thiserror::Error;

/// Consensus subsystem errors.
#[derive(Debug, Clone, Error)]
pub enum ConsensusError {
    /// Threshold outside (0, 1].
    #[error("agreement threshold must be in (0, 1], got {threshold}")]
    InvalidThreshold { threshold: f64 },

    /// Malformed configuration detected at construction.
    #[error("invalid consensus configuration: {reason}")]
    InvalidConfig { reason: String },

    /// A ballot could not be collected from a node.
    #[error("vote transport failure for node {node_id}: {reason}")]
    VoteTransport { node_id: String, reason: String },
}

/// Result type for consensus operations.
pub type ConsensusResult<T> = Result<T, ConsensusError>;
