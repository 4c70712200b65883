//! Persisted checkpoint metadata.

use cx_01_consensus::CheckpointConsensus;
use serde::{Deserialize, Serialize};
use shared_types::{Hash, Timestamp};

/// Record describing one persisted checkpoint.
///
/// `hash` is the SHA-256 of the canonical-JSON serialized state, so it is
/// always 64 hex chars on disk. Steps are expected to be non-decreasing
/// across successive checkpoints from one guardian, but this is observed
/// rather than enforced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckpointMetadata {
    /// Training step this checkpoint snapshots.
    pub step: u64,
    /// Content hash of the serialized state.
    #[serde(with = "shared_types::hex_hash")]
    pub hash: Hash,
    /// Outcome of the round that admitted this checkpoint; `None` when it
    /// was force-saved past the quorum.
    pub consensus: Option<CheckpointConsensus>,
    /// Creation time (seconds since epoch).
    pub created_at: Timestamp,
}
