//! Ledger-backed vote source.
//!
//! Each node keeps a local record of the checkpoint hash it observed for
//! a given step. A node approves a proposal iff its record matches; a
//! node with no record for the step adopts the proposal and approves. A
//! dissent therefore means "my local copy of this checkpoint differs".

use crate::error::ConsensusResult;
use crate::ports::outbound::VoteSource;
use async_trait::async_trait;
use parking_lot::RwLock;
use shared_types::{Hash, NodeId};
use std::collections::HashMap;

/// In-process [`VoteSource`] voting from per-node `(step → hash)` ledgers.
#[derive(Debug, Default)]
pub struct LedgerVoteSource {
    ledgers: RwLock<HashMap<NodeId, HashMap<u64, Hash>>>,
}

impl LedgerVoteSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record what `node_id` locally observed for `step`.
    ///
    /// Used to seed divergence (a node whose copy of the checkpoint
    /// differs will dissent in the next round for that step).
    pub fn record_observed(&self, node_id: NodeId, step: u64, hash: Hash) {
        self.ledgers
            .write()
            .entry(node_id)
            .or_default()
            .insert(step, hash);
    }
}

#[async_trait]
impl VoteSource for LedgerVoteSource {
    async fn request_vote(
        &self,
        node_id: &NodeId,
        checkpoint_hash: &Hash,
        step: u64,
    ) -> ConsensusResult<bool> {
        let mut ledgers = self.ledgers.write();
        let ledger = ledgers.entry(node_id.clone()).or_default();
        match ledger.get(&step) {
            Some(recorded) => Ok(recorded == checkpoint_hash),
            None => {
                ledger.insert(step, *checkpoint_hash);
                Ok(true)
            }
        }
    }
}
