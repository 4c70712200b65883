//! Consensus round outcome entity.

use serde::{Deserialize, Serialize};
use shared_types::Hash;
use uuid::Uuid;

/// Terminal (or pending) state of a consensus round.
///
/// State progression: Pending → Agreed | Rejected | Timeout
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ConsensusState {
    /// Round created but not yet tallied.
    #[default]
    Pending,
    /// Approving fraction met the threshold.
    Agreed,
    /// Approving fraction fell short, or the quorum was empty.
    Rejected,
    /// The round time budget expired before every ballot landed.
    Timeout,
}

/// The outcome of a consensus round for one `(checkpoint_hash, step)` pair.
///
/// `fraction` is always `votes_for / total_nodes`, clamped to [0, 1], and
/// defined as 0 when `total_nodes` is 0; it is never produced by a
/// division by zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckpointConsensus {
    /// Correlation id for log and audit lines.
    pub round_id: Uuid,
    /// Hash the round voted on.
    #[serde(with = "shared_types::hex_hash")]
    pub checkpoint_hash: Hash,
    /// Training step the checkpoint belongs to.
    pub step: u64,
    /// Terminal state of the round.
    pub state: ConsensusState,
    /// Ballots approving the hash.
    pub votes_for: usize,
    /// Ballots dissenting (collected and disapproving).
    pub votes_against: usize,
    /// Size of the node set snapshotted at round start.
    pub total_nodes: usize,
    /// Approving fraction of the full snapshot, in [0, 1].
    pub fraction: f64,
}

impl CheckpointConsensus {
    /// Tally a completed (or timed-out) round.
    ///
    /// `complete` is false when the time budget expired with ballots
    /// outstanding; such rounds are `Timeout` regardless of the partial
    /// fraction.
    pub fn from_tally(
        round_id: Uuid,
        checkpoint_hash: Hash,
        step: u64,
        votes_for: usize,
        votes_against: usize,
        total_nodes: usize,
        threshold: f64,
        complete: bool,
    ) -> Self {
        let fraction = if total_nodes == 0 {
            0.0
        } else {
            (votes_for as f64 / total_nodes as f64).min(1.0)
        };
        let state = if total_nodes == 0 {
            ConsensusState::Rejected
        } else if !complete {
            ConsensusState::Timeout
        } else if fraction >= threshold {
            ConsensusState::Agreed
        } else {
            ConsensusState::Rejected
        };
        Self {
            round_id,
            checkpoint_hash,
            step,
            state,
            votes_for,
            votes_against,
            total_nodes,
            fraction,
        }
    }

    /// A round over an empty quorum: well-defined rejection, not a crash.
    pub fn empty_quorum(round_id: Uuid, checkpoint_hash: Hash, step: u64) -> Self {
        Self::from_tally(round_id, checkpoint_hash, step, 0, 0, 0, 1.0, true)
    }

    /// True iff the round agreed.
    pub fn is_agreed(&self) -> bool {
        self.state == ConsensusState::Agreed
    }
}
