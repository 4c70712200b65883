//! In-memory checkpoint store for tests and wiring experiments.

use crate::domain::CheckpointMetadata;
use crate::error::StoreError;
use crate::ports::outbound::CheckpointStore;
use parking_lot::RwLock;
use std::collections::HashMap;

/// Volatile [`CheckpointStore`].
#[derive(Default)]
pub struct InMemoryCheckpointStore {
    records: RwLock<HashMap<u64, (Vec<u8>, CheckpointMetadata)>>,
}

impl InMemoryCheckpointStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CheckpointStore for InMemoryCheckpointStore {
    fn put(
        &self,
        step: u64,
        state_bytes: &[u8],
        metadata: &CheckpointMetadata,
    ) -> Result<(), StoreError> {
        self.records
            .write()
            .insert(step, (state_bytes.to_vec(), metadata.clone()));
        Ok(())
    }

    fn state(&self, step: u64) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.records.read().get(&step).map(|(s, _)| s.clone()))
    }

    fn metadata(&self, step: u64) -> Result<Option<CheckpointMetadata>, StoreError> {
        Ok(self.records.read().get(&step).map(|(_, m)| m.clone()))
    }

    fn list_metadata(&self) -> Result<Vec<CheckpointMetadata>, StoreError> {
        Ok(self
            .records
            .read()
            .values()
            .map(|(_, m)| m.clone())
            .collect())
    }

    fn contains(&self, step: u64) -> Result<bool, StoreError> {
        Ok(self.records.read().contains_key(&step))
    }
}
