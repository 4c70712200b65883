//! Run-level entities.

use serde::{Deserialize, Serialize};

/// Trainer state machine position.
///
/// Progression: Idle → Running ⇄ Checkpointing → Done, with denied
/// windows holding the trainer in `WaitingForWindow`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TrainerPhase {
    #[default]
    Idle,
    WaitingForWindow,
    Running,
    Checkpointing,
    Done,
}

/// Metrics reported by the model backend for one step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepMetrics {
    pub loss: f64,
}

/// What one `Trainer::run` accomplished.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RunSummary {
    /// Steps actually executed.
    pub steps_completed: u64,
    /// Checkpoints persisted (interval and stop checkpoints).
    pub checkpoints_written: u64,
    /// Checkpoints discarded because the quorum did not agree.
    pub checkpoints_rejected: u64,
    /// Times the energy window was denied and the loop backed off.
    pub window_denials: u64,
    /// True when the stop signal ended the run before `max_steps`.
    pub stopped_early: bool,
}
