//! Checkpoint Guardian - Core business logic

use crate::domain::{canonical_bytes, content_hash, CheckpointMetadata};
use crate::error::{CheckpointError, CheckpointResult};
use crate::ports::outbound::CheckpointStore;
use cx_01_consensus::ConsensusApi;
use serde_json::Value;
use shared_types::{hash_to_hex, SystemTimeSource, TimeSource};
use std::sync::Arc;

/// Consensus-gated checkpoint persistence.
///
/// Generic over the store and the consensus protocol so tests can swap
/// either side; production wiring uses [`crate::FileCheckpointStore`] and
/// `cx_01_consensus::ConsensusService`.
pub struct CheckpointGuardian<S, C> {
    store: S,
    consensus: Arc<C>,
    time_source: Arc<dyn TimeSource>,
}

impl<S, C> CheckpointGuardian<S, C>
where
    S: CheckpointStore,
    C: ConsensusApi,
{
    pub fn new(store: S, consensus: Arc<C>) -> Self {
        Self::with_time_source(store, consensus, Arc::new(SystemTimeSource))
    }

    pub fn with_time_source(
        store: S,
        consensus: Arc<C>,
        time_source: Arc<dyn TimeSource>,
    ) -> Self {
        Self {
            store,
            consensus,
            time_source,
        }
    }

    /// Serialize, hash, vote, persist.
    ///
    /// Returns `Ok(None)` when the round did not agree and `force` was
    /// not set - the checkpoint is discarded whole, nothing is written.
    /// `force` skips the vote and persists with `consensus: None`.
    pub async fn create_checkpoint(
        &self,
        step: u64,
        model_state: &Value,
        force: bool,
    ) -> CheckpointResult<Option<CheckpointMetadata>> {
        if self.store.contains(step)? {
            return Err(CheckpointError::StepExists { step });
        }

        let state_bytes = canonical_bytes(model_state)?;
        let hash = content_hash(&state_bytes);

        let consensus = if force {
            tracing::warn!(step, hash = %hash_to_hex(&hash), "force-saving checkpoint without quorum");
            None
        } else {
            let round = self
                .consensus
                .initiate_consensus(hash, step)
                .await
                .map_err(|e| CheckpointError::Consensus {
                    reason: e.to_string(),
                })?;
            if !round.is_agreed() {
                tracing::warn!(
                    step,
                    state = ?round.state,
                    fraction = round.fraction,
                    "checkpoint not agreed - discarding"
                );
                return Ok(None);
            }
            Some(round)
        };

        let metadata = CheckpointMetadata {
            step,
            hash,
            consensus,
            created_at: self.time_source.now(),
        };
        self.store.put(step, &state_bytes, &metadata)?;

        tracing::info!(step, hash = %hash_to_hex(&hash), "checkpoint persisted");
        Ok(Some(metadata))
    }

    /// Stored state for `step`, or `None` if absent.
    pub fn load_checkpoint(&self, step: u64) -> CheckpointResult<Option<Value>> {
        match self.store.state(step)? {
            None => Ok(None),
            Some(bytes) => serde_json::from_slice(&bytes).map(Some).map_err(|e| {
                CheckpointError::Serialization {
                    reason: format!("stored state for step {step} undecodable: {e}"),
                }
            }),
        }
    }

    /// Metadata with the highest step, or `None` when nothing persisted.
    pub fn get_latest_checkpoint(&self) -> CheckpointResult<Option<CheckpointMetadata>> {
        Ok(self
            .store
            .list_metadata()?
            .into_iter()
            .max_by_key(|m| m.step))
    }

    /// All persisted metadata, step-ascending.
    pub fn list_checkpoints(&self) -> CheckpointResult<Vec<CheckpointMetadata>> {
        let mut checkpoints = self.store.list_metadata()?;
        checkpoints.sort_by_key(|m| m.step);
        Ok(checkpoints)
    }

    /// Recompute the stored state's hash and compare to the recorded one.
    ///
    /// `false` for a missing step or any unreadable record - integrity
    /// questions get a boolean answer, never a panic or an error.
    pub fn verify_checkpoint(&self, step: u64) -> bool {
        let state = match self.store.state(step) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return false,
            Err(e) => {
                tracing::warn!(step, error = %e, "state unreadable during verification");
                return false;
            }
        };
        let metadata = match self.store.metadata(step) {
            Ok(Some(metadata)) => metadata,
            Ok(None) => return false,
            Err(e) => {
                tracing::warn!(step, error = %e, "metadata unreadable during verification");
                return false;
            }
        };
        content_hash(&state) == metadata.hash
    }

    /// Fraction of the most recent consensus round.
    pub fn latest_consensus_fraction(&self) -> f64 {
        self.consensus.latest_consensus_fraction()
    }
}
