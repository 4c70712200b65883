//! Checkpoint vote entity.

use serde::{Deserialize, Serialize};
use shared_types::{Hash, NodeId, Timestamp};

/// One node's ballot on a checkpoint hash.
///
/// Created when a node's ballot is collected during a round; immutable
/// thereafter and held in memory only for the duration of that round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckpointVote {
    /// The voting node.
    pub node_id: NodeId,
    /// Hash being voted on (64 hex chars when encoded).
    #[serde(with = "shared_types::hex_hash")]
    pub checkpoint_hash: Hash,
    /// Training step the checkpoint belongs to.
    pub step: u64,
    /// Whether the node approves the hash.
    pub approved: bool,
    /// Ballot creation time (seconds since epoch).
    pub timestamp: Timestamp,
}

impl CheckpointVote {
    pub fn new(
        node_id: NodeId,
        checkpoint_hash: Hash,
        step: u64,
        approved: bool,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            node_id,
            checkpoint_hash,
            step,
            approved,
            timestamp,
        }
    }
}
