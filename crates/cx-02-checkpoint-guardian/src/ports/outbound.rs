//! Driven Ports (SPI - Outbound Dependencies)

use crate::domain::CheckpointMetadata;
use crate::error::StoreError;

/// Abstract checkpoint persistence.
///
/// `put` must be atomic from the reader's perspective: after a crash
/// mid-write, `contains`/`metadata` must not report a checkpoint whose
/// state did not land.
pub trait CheckpointStore: Send + Sync {
    /// Persist serialized state and its metadata for `step`.
    fn put(
        &self,
        step: u64,
        state_bytes: &[u8],
        metadata: &CheckpointMetadata,
    ) -> Result<(), StoreError>;

    /// Serialized state for `step`, or `None` if absent.
    fn state(&self, step: u64) -> Result<Option<Vec<u8>>, StoreError>;

    /// Metadata for `step`, or `None` if absent.
    fn metadata(&self, step: u64) -> Result<Option<CheckpointMetadata>, StoreError>;

    /// Metadata for every persisted checkpoint, in no particular order.
    fn list_metadata(&self) -> Result<Vec<CheckpointMetadata>, StoreError>;

    /// Whether a checkpoint exists for `step`.
    fn contains(&self, step: u64) -> Result<bool, StoreError>;
}
