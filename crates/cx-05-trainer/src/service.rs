//! Trainer - Core orchestration loop

use crate::domain::{RunSummary, TrainerPhase};
use crate::error::{TrainerError, TrainerResult};
use crate::ports::outbound::{BatchSource, ModelBackend};
use cx_01_consensus::ConsensusApi;
use cx_02_checkpoint_guardian::{CheckpointError, CheckpointGuardian, CheckpointStore};
use cx_03_energy_scheduler::EnergyScheduler;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

/// Trainer configuration.
#[derive(Clone, Debug)]
pub struct TrainerConfig {
    /// Total steps to run.
    pub max_steps: u64,
    /// Checkpoint every N steps.
    pub checkpoint_interval: u64,
    /// Write a final forced checkpoint when the stop signal ends a run
    /// that has made progress.
    pub checkpoint_on_stop: bool,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            max_steps: 1000,
            checkpoint_interval: 100,
            checkpoint_on_stop: true,
        }
    }
}

impl TrainerConfig {
    pub fn validate(&self) -> TrainerResult<()> {
        if self.max_steps == 0 {
            return Err(TrainerError::InvalidConfig {
                reason: "max_steps must be positive".to_string(),
            });
        }
        if self.checkpoint_interval == 0 {
            return Err(TrainerError::InvalidConfig {
                reason: "checkpoint_interval must be positive".to_string(),
            });
        }
        Ok(())
    }
}

/// Energy-gated training orchestrator.
///
/// Owns the model and batch source for the duration of a run; the
/// scheduler and guardian are shared subsystems.
pub struct Trainer<M, B, S, C> {
    config: TrainerConfig,
    model: M,
    batches: B,
    scheduler: Arc<EnergyScheduler>,
    guardian: Arc<CheckpointGuardian<S, C>>,
    stop_rx: watch::Receiver<bool>,
    phase: TrainerPhase,
}

impl<M, B, S, C> Trainer<M, B, S, C>
where
    M: ModelBackend,
    B: BatchSource,
    S: CheckpointStore,
    C: ConsensusApi,
{
    pub fn new(
        config: TrainerConfig,
        model: M,
        batches: B,
        scheduler: Arc<EnergyScheduler>,
        guardian: Arc<CheckpointGuardian<S, C>>,
        stop_rx: watch::Receiver<bool>,
    ) -> TrainerResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            model,
            batches,
            scheduler,
            guardian,
            stop_rx,
            phase: TrainerPhase::Idle,
        })
    }

    pub fn phase(&self) -> TrainerPhase {
        self.phase
    }

    /// Drive the loop to completion, exhaustion, or stop.
    pub async fn run(&mut self) -> TrainerResult<RunSummary> {
        let mut summary = RunSummary::default();
        tracing::info!(
            max_steps = self.config.max_steps,
            checkpoint_interval = self.config.checkpoint_interval,
            "training run starting"
        );

        for step in 1..=self.config.max_steps {
            if self.stop_requested() {
                summary.stopped_early = true;
                break;
            }

            let Some(scale) = self.await_window(&mut summary).await else {
                summary.stopped_early = true;
                break;
            };

            let Some(batch) = self.batches.next_batch() else {
                tracing::info!(step, "batch source exhausted - finishing run early");
                break;
            };

            self.phase = TrainerPhase::Running;
            let metrics = self.model.train_step(&batch, scale).await?;
            summary.steps_completed = step;
            colossus_telemetry::TRAINING_STEPS.inc();
            tracing::debug!(step, loss = metrics.loss, scale, "step complete");

            if step % self.config.checkpoint_interval == 0 {
                self.phase = TrainerPhase::Checkpointing;
                self.checkpoint(step, false, &mut summary).await?;
            }
        }

        if summary.stopped_early && self.config.checkpoint_on_stop && summary.steps_completed > 0 {
            self.phase = TrainerPhase::Checkpointing;
            self.checkpoint(summary.steps_completed, true, &mut summary)
                .await?;
        }

        self.phase = TrainerPhase::Done;
        tracing::info!(
            steps = summary.steps_completed,
            checkpoints = summary.checkpoints_written,
            rejected = summary.checkpoints_rejected,
            denials = summary.window_denials,
            stopped_early = summary.stopped_early,
            "training run finished"
        );
        Ok(summary)
    }

    fn stop_requested(&self) -> bool {
        *self.stop_rx.borrow()
    }

    /// Wait (with back-off) until the scheduler opens a window.
    ///
    /// Returns the suggested throughput scale, or `None` when the stop
    /// signal arrived while waiting. Denials retry forever; the caller's
    /// stop signal is the patience policy.
    async fn await_window(&mut self, summary: &mut RunSummary) -> Option<f64> {
        loop {
            if self.stop_requested() {
                return None;
            }

            let decision = self.scheduler.evaluate_window().await;
            if decision.allowed {
                return Some(decision.suggested_scale);
            }

            summary.window_denials += 1;
            self.phase = TrainerPhase::WaitingForWindow;
            colossus_telemetry::ENERGY_WINDOW_DENIALS
                .with_label_values(&[&decision.reason.to_string()])
                .inc();
            tracing::info!(
                reason = %decision.reason,
                delay_seconds = decision.delay_seconds,
                "training window denied - backing off"
            );

            tokio::select! {
                _ = tokio::time::sleep(Duration::from_secs(decision.delay_seconds)) => {}
                res = self.stop_rx.changed() => {
                    if res.is_err() {
                        // Sender dropped: no stop can ever arrive.
                        tokio::time::sleep(Duration::from_secs(decision.delay_seconds)).await;
                    }
                }
            }
        }
    }

    /// Drive the guardian for one checkpoint.
    ///
    /// A quorum rejection is recorded and survived; an already-persisted
    /// step (a stop checkpoint landing on an interval step) is fine;
    /// store I/O failures propagate.
    async fn checkpoint(
        &mut self,
        step: u64,
        force: bool,
        summary: &mut RunSummary,
    ) -> TrainerResult<()> {
        let state = self.model.export_state();
        match self.guardian.create_checkpoint(step, &state, force).await {
            Ok(Some(metadata)) => {
                summary.checkpoints_written += 1;
                colossus_telemetry::CHECKPOINTS_PERSISTED.inc();
                tracing::info!(step = metadata.step, force, "checkpoint written");
            }
            Ok(None) => {
                summary.checkpoints_rejected += 1;
                colossus_telemetry::CHECKPOINTS_REJECTED.inc();
                tracing::warn!(step, "checkpoint rejected by quorum - training continues");
            }
            Err(CheckpointError::StepExists { step }) => {
                tracing::debug!(step, "checkpoint already persisted for step");
            }
            Err(e) => return Err(e.into()),
        }
        Ok(())
    }
}
