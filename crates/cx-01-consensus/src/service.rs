//! Consensus Service - Core round logic
//!
//! One round = snapshot the voter set, fan out ballot requests through
//! the `VoteSource` port, fan the responses back in under a time budget,
//! tally against the threshold, and record the outcome.

use crate::adapters::LedgerVoteSource;
use crate::domain::{CheckpointConsensus, CheckpointVote, ConsensusState};
use crate::error::{ConsensusError, ConsensusResult};
use crate::ports::inbound::ConsensusApi;
use crate::ports::outbound::VoteSource;
use async_trait::async_trait;
use futures::stream::{FuturesUnordered, StreamExt};
use parking_lot::RwLock;
use shared_types::{Hash, NodeId, SystemTimeSource, TimeSource};
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

/// Consensus configuration.
#[derive(Clone, Debug)]
pub struct ConsensusConfig {
    /// Approving fraction required for agreement. Comparison is `>=`:
    /// landing exactly on the threshold counts as agreement.
    pub agreement_threshold: f64,
    /// Time budget for one round. Ballots still outstanding when it
    /// expires leave the round in `Timeout`.
    pub round_timeout: Duration,
}

impl Default for ConsensusConfig {
    fn default() -> Self {
        Self {
            agreement_threshold: 0.99,
            round_timeout: Duration::from_secs(5),
        }
    }
}

impl ConsensusConfig {
    /// Validate thresholds at construction time.
    pub fn validate(&self) -> ConsensusResult<()> {
        if !(self.agreement_threshold > 0.0 && self.agreement_threshold <= 1.0) {
            return Err(ConsensusError::InvalidThreshold {
                threshold: self.agreement_threshold,
            });
        }
        if self.round_timeout.is_zero() {
            return Err(ConsensusError::InvalidConfig {
                reason: "round_timeout must be non-zero".to_string(),
            });
        }
        Ok(())
    }
}

/// Internal registry and last-round state.
struct ConsensusServiceState {
    nodes: BTreeSet<NodeId>,
    last_round: Option<CheckpointConsensus>,
}

/// Checkpoint consensus service.
///
/// Callable concurrently: the voter set and last-round record live behind
/// a lock that is never held across an await; each round votes over the
/// snapshot taken at initiation.
pub struct ConsensusService {
    config: ConsensusConfig,
    state: RwLock<ConsensusServiceState>,
    vote_source: Arc<dyn VoteSource>,
    time_source: Arc<dyn TimeSource>,
}

impl ConsensusService {
    /// Create a service with the default ledger-backed vote source.
    pub fn new(config: ConsensusConfig) -> ConsensusResult<Self> {
        Self::with_vote_source(
            config,
            Arc::new(LedgerVoteSource::new()),
            Arc::new(SystemTimeSource),
        )
    }

    /// Create a service with explicit collaborators.
    pub fn with_vote_source(
        config: ConsensusConfig,
        vote_source: Arc<dyn VoteSource>,
        time_source: Arc<dyn TimeSource>,
    ) -> ConsensusResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            state: RwLock::new(ConsensusServiceState {
                nodes: BTreeSet::new(),
                last_round: None,
            }),
            vote_source,
            time_source,
        })
    }

    /// Run one round with an explicit threshold override.
    pub async fn initiate_with_threshold(
        &self,
        checkpoint_hash: Hash,
        step: u64,
        threshold: f64,
    ) -> ConsensusResult<CheckpointConsensus> {
        if !(threshold > 0.0 && threshold <= 1.0) {
            return Err(ConsensusError::InvalidThreshold { threshold });
        }

        let round_id = Uuid::new_v4();
        let nodes: Vec<NodeId> = self.state.read().nodes.iter().cloned().collect();

        if nodes.is_empty() {
            tracing::warn!(
                round_id = %round_id,
                step,
                "consensus round over empty quorum - rejecting"
            );
            let round = CheckpointConsensus::empty_quorum(round_id, checkpoint_hash, step);
            self.record_round(&round);
            return Ok(round);
        }

        let total_nodes = nodes.len();
        let votes = self
            .collect_ballots(round_id, &nodes, checkpoint_hash, step)
            .await;

        let complete = votes.len() == total_nodes;
        let votes_for = votes.iter().filter(|v| v.approved).count();
        let votes_against = votes.len() - votes_for;

        let round = CheckpointConsensus::from_tally(
            round_id,
            checkpoint_hash,
            step,
            votes_for,
            votes_against,
            total_nodes,
            threshold,
            complete,
        );

        tracing::info!(
            round_id = %round_id,
            step,
            state = ?round.state,
            votes_for,
            votes_against,
            total_nodes,
            fraction = round.fraction,
            "consensus round tallied"
        );

        self.record_round(&round);
        Ok(round)
    }

    /// Record the completed round: last-round state plus metrics.
    fn record_round(&self, round: &CheckpointConsensus) {
        let outcome = match round.state {
            ConsensusState::Agreed => "agreed",
            ConsensusState::Rejected => "rejected",
            ConsensusState::Timeout => "timeout",
            ConsensusState::Pending => "pending",
        };
        colossus_telemetry::CONSENSUS_ROUNDS
            .with_label_values(&[outcome])
            .inc();
        colossus_telemetry::CONSENSUS_LAST_FRACTION.set(round.fraction);
        self.state.write().last_round = Some(round.clone());
    }

    /// Fan out ballot requests and collect responses within the round's
    /// time budget. Collection failures tally as dissent.
    async fn collect_ballots(
        &self,
        round_id: Uuid,
        nodes: &[NodeId],
        checkpoint_hash: Hash,
        step: u64,
    ) -> Vec<CheckpointVote> {
        let now = self.time_source.now();
        let mut pending: FuturesUnordered<_> = nodes
            .iter()
            .cloned()
            .map(|node| {
                let vote_source = Arc::clone(&self.vote_source);
                async move {
                    let approved = match vote_source
                        .request_vote(&node, &checkpoint_hash, step)
                        .await
                    {
                        Ok(approved) => approved,
                        Err(e) => {
                            tracing::warn!(
                                round_id = %round_id,
                                node = %node,
                                error = %e,
                                "ballot collection failed - tallying as dissent"
                            );
                            false
                        }
                    };
                    CheckpointVote::new(node, checkpoint_hash, step, approved, now)
                }
            })
            .collect();

        let mut votes = Vec::with_capacity(nodes.len());
        let budget = tokio::time::sleep(self.config.round_timeout);
        tokio::pin!(budget);

        loop {
            tokio::select! {
                ballot = pending.next() => match ballot {
                    Some(vote) => votes.push(vote),
                    None => break,
                },
                _ = &mut budget => {
                    tracing::warn!(
                        round_id = %round_id,
                        step,
                        collected = votes.len(),
                        expected = nodes.len(),
                        "round time budget expired with ballots outstanding"
                    );
                    break;
                }
            }
        }
        votes
    }
}

#[async_trait]
impl ConsensusApi for ConsensusService {
    fn register_node(&self, node_id: NodeId) -> bool {
        self.state.write().nodes.insert(node_id)
    }

    fn unregister_node(&self, node_id: &NodeId) -> bool {
        self.state.write().nodes.remove(node_id)
    }

    fn node_count(&self) -> usize {
        self.state.read().nodes.len()
    }

    async fn initiate_consensus(
        &self,
        checkpoint_hash: Hash,
        step: u64,
    ) -> ConsensusResult<CheckpointConsensus> {
        self.initiate_with_threshold(checkpoint_hash, step, self.config.agreement_threshold)
            .await
    }

    fn latest_consensus_fraction(&self) -> f64 {
        self.state
            .read()
            .last_round
            .as_ref()
            .map(|round| round.fraction)
            .unwrap_or(0.0)
    }
}
