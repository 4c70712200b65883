//! Simulated model and batch source.
//!
//! Deterministic stand-ins used by tests and wiring experiments; real
//! deployments adapt these traits over the actual training stack.

use crate::domain::StepMetrics;
use crate::error::ModelError;
use crate::ports::outbound::{BatchSource, ModelBackend};
use async_trait::async_trait;
use serde_json::{json, Value};

/// [`BatchSource`] yielding numbered synthetic batches.
#[derive(Debug)]
pub struct SyntheticBatchSource {
    produced: u64,
    remaining: Option<u64>,
}

impl SyntheticBatchSource {
    /// Source that yields exactly `count` batches.
    pub fn finite(count: u64) -> Self {
        Self {
            produced: 0,
            remaining: Some(count),
        }
    }

    /// Source that never runs dry.
    pub fn endless() -> Self {
        Self {
            produced: 0,
            remaining: None,
        }
    }
}

impl BatchSource for SyntheticBatchSource {
    fn next_batch(&mut self) -> Option<Value> {
        if let Some(remaining) = &mut self.remaining {
            if *remaining == 0 {
                return None;
            }
            *remaining -= 1;
        }
        self.produced += 1;
        Some(json!({ "batch": self.produced, "tokens": 2048 }))
    }
}

/// [`ModelBackend`] with a 1/steps loss curve and a counting state.
#[derive(Debug, Default)]
pub struct SimModelBackend {
    steps: u64,
    last_loss: f64,
}

impl SimModelBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }
}

#[async_trait]
impl ModelBackend for SimModelBackend {
    async fn train_step(
        &mut self,
        _batch: &Value,
        throughput_scale: f64,
    ) -> Result<StepMetrics, ModelError> {
        self.steps += 1;
        self.last_loss = 1.0 / (self.steps as f64) / throughput_scale.max(f64::MIN_POSITIVE);
        Ok(StepMetrics {
            loss: self.last_loss,
        })
    }

    fn export_state(&self) -> Value {
        json!({ "steps": self.steps, "loss": self.last_loss })
    }
}
