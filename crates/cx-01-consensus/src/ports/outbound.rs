//! Driven Ports (SPI - Outbound Dependencies)
//!
//! In a deployed cluster each ballot is a network round-trip to a training
//! node; in tests it is an in-process adapter. The service only sees this
//! trait.

use crate::error::ConsensusResult;
use async_trait::async_trait;
use shared_types::{Hash, NodeId};

/// Ballot collection interface.
#[async_trait]
pub trait VoteSource: Send + Sync {
    /// Ask `node_id` whether it approves `checkpoint_hash` for `step`.
    ///
    /// An `Err` means the ballot could not be collected at all (transport
    /// failure); the service tallies it as a dissent rather than failing
    /// the round.
    async fn request_vote(
        &self,
        node_id: &NodeId,
        checkpoint_hash: &Hash,
        step: u64,
    ) -> ConsensusResult<bool>;
}
