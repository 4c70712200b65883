//! Driven Ports (SPI - Outbound Dependencies)
//!
//! The actual forward/backward pass and data pipeline live behind these
//! traits; the trainer only sequences them.

use crate::domain::StepMetrics;
use crate::error::ModelError;
use async_trait::async_trait;
use serde_json::Value;

/// Model training backend.
#[async_trait]
pub trait ModelBackend: Send {
    /// Run one training step over `batch` at the given throughput scale
    /// (in (0, 1], from the energy scheduler).
    async fn train_step(&mut self, batch: &Value, throughput_scale: f64)
        -> Result<StepMetrics, ModelError>;

    /// Snapshot the model state for checkpointing.
    fn export_state(&self) -> Value;
}

/// Training batch supplier.
///
/// May be finite or endless; `None` ends the run early and cleanly.
pub trait BatchSource: Send {
    fn next_batch(&mut self) -> Option<Value>;
}
