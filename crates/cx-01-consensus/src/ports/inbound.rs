//! Driving Ports (API - Inbound)
//!
//! Contract offered to callers of the consensus subsystem (the checkpoint
//! guardian, the trainer, and operator tooling).

use crate::domain::CheckpointConsensus;
use crate::error::ConsensusResult;
use async_trait::async_trait;
use shared_types::{Hash, NodeId};

/// Public API of the consensus protocol.
#[async_trait]
pub trait ConsensusApi: Send + Sync {
    /// Add a node to the voter set. Returns false if already registered
    /// (duplicate registration is a no-op).
    fn register_node(&self, node_id: NodeId) -> bool;

    /// Remove a node from the voter set. Returns false if the node was
    /// absent (a no-op).
    fn unregister_node(&self, node_id: &NodeId) -> bool;

    /// Current voter set size.
    fn node_count(&self) -> usize;

    /// Run one consensus round over the current voter set using the
    /// configured agreement threshold.
    ///
    /// Node-set changes made while a round is in flight never affect that
    /// round: the voter set is snapshotted at initiation.
    async fn initiate_consensus(
        &self,
        checkpoint_hash: Hash,
        step: u64,
    ) -> ConsensusResult<CheckpointConsensus>;

    /// Fraction of the most recent completed round, 0.0 if no round has
    /// run. Always within [0, 1].
    fn latest_consensus_fraction(&self) -> f64;
}
