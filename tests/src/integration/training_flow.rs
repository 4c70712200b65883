//! # Training Flow Integration
//!
//! Full orchestration: trainer → scheduler gate → model steps →
//! interval checkpoints → consensus rounds → durable store, then the
//! safety gate reading the resulting cluster health.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use cx_01_consensus::{ConsensusApi, ConsensusConfig, ConsensusService};
    use cx_02_checkpoint_guardian::{CheckpointGuardian, CheckpointStore, FileCheckpointStore};
    use cx_03_energy_scheduler::{
        EnergyScheduler, EnergySchedulerConfig, FixedBatteryTelemetry, FixedPowerTelemetry,
        SystemClock,
    };
    use cx_04_safety_gate::{
        ConsensusProbe, FixedEvalProbe, FixedMetricsProbe, FixedProvenanceProbe, SafetyGate,
        SafetyGateConfig, SafetyResult,
    };
    use cx_05_trainer::{
        SimModelBackend, SyntheticBatchSource, Trainer, TrainerConfig, TrainerPhase,
    };
    use serde_json::json;
    use shared_types::NodeId;
    use tokio::sync::watch;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    struct GuardianProbe<S, C>(Arc<CheckpointGuardian<S, C>>);

    #[async_trait]
    impl<S, C> ConsensusProbe for GuardianProbe<S, C>
    where
        S: CheckpointStore,
        C: ConsensusApi,
    {
        async fn latest_consensus_fraction(&self) -> SafetyResult<f64> {
            Ok(self.0.latest_consensus_fraction())
        }
    }

    fn cluster(count: usize) -> Arc<ConsensusService> {
        let svc = ConsensusService::new(ConsensusConfig::default()).unwrap();
        for i in 0..count {
            svc.register_node(NodeId::new(format!("gpu-rack-{i:03}")));
        }
        Arc::new(svc)
    }

    fn open_scheduler() -> Arc<EnergyScheduler> {
        Arc::new(
            EnergyScheduler::new(
                EnergySchedulerConfig::default(),
                Arc::new(FixedPowerTelemetry::new(210.0)),
                Arc::new(FixedBatteryTelemetry::new(0.9)),
                Arc::new(SystemClock),
            )
            .unwrap(),
        )
    }

    // =============================================================================
    // INTEGRATION TESTS
    // =============================================================================

    /// Twenty steps, checkpoint every five: four agreed checkpoints on
    /// disk, each re-verifiable, and the cluster left healthy enough for
    /// the safety gate.
    #[tokio::test]
    async fn test_end_to_end_training_run() {
        colossus_telemetry::register_metrics().unwrap();
        let steps_before = colossus_telemetry::TRAINING_STEPS.get();

        let dir = tempfile::tempdir().unwrap();
        let guardian = Arc::new(CheckpointGuardian::new(
            FileCheckpointStore::new(dir.path()).unwrap(),
            cluster(10),
        ));
        let (_stop_tx, stop_rx) = watch::channel(false);

        let mut trainer = Trainer::new(
            TrainerConfig {
                max_steps: 20,
                checkpoint_interval: 5,
                checkpoint_on_stop: true,
            },
            SimModelBackend::new(),
            SyntheticBatchSource::endless(),
            open_scheduler(),
            Arc::clone(&guardian),
            stop_rx,
        )
        .unwrap();

        let summary = trainer.run().await.unwrap();
        assert_eq!(summary.steps_completed, 20);
        assert_eq!(summary.checkpoints_written, 4);
        assert_eq!(summary.checkpoints_rejected, 0);
        assert_eq!(summary.window_denials, 0);
        assert!(!summary.stopped_early);
        assert_eq!(trainer.phase(), TrainerPhase::Done);

        let steps: Vec<u64> = guardian
            .list_checkpoints()
            .unwrap()
            .iter()
            .map(|m| m.step)
            .collect();
        assert_eq!(steps, vec![5, 10, 15, 20]);
        for step in steps {
            assert!(guardian.verify_checkpoint(step));
        }

        // The final checkpoint carries the model's state at step 20.
        let latest = guardian.get_latest_checkpoint().unwrap().unwrap();
        assert_eq!(latest.step, 20);
        assert!(latest.consensus.as_ref().unwrap().is_agreed());
        assert_eq!(
            guardian.load_checkpoint(20).unwrap().unwrap()["steps"],
            json!(20)
        );

        // Cluster health flows straight into a passing safety gate.
        let gate = SafetyGate::new(
            SafetyGateConfig::default(),
            Arc::new(FixedMetricsProbe::new(210.0, 12.0, 50.0)),
            Arc::new(FixedProvenanceProbe::new(true)),
            Arc::new(GuardianProbe(Arc::clone(&guardian))),
            Arc::new(FixedEvalProbe::new(0.15, 0.10)),
        )
        .unwrap();
        let report = gate.evaluate().await;
        assert!(report.ok, "unexpected failures: {:?}", report.reasons);

        // The trainer recorded its steps in the metrics registry.
        let steps_after = colossus_telemetry::TRAINING_STEPS.get();
        assert!(steps_after - steps_before >= 20.0);
        let text = colossus_telemetry::gather_metrics().unwrap();
        assert!(text.contains("cx_trainer_steps_total"));
    }

    /// A mid-tier battery throttles throughput without blocking the run.
    #[tokio::test]
    async fn test_mid_soc_run_trains_throttled() {
        let dir = tempfile::tempdir().unwrap();
        let guardian = Arc::new(CheckpointGuardian::new(
            FileCheckpointStore::new(dir.path()).unwrap(),
            cluster(3),
        ));
        let scheduler = Arc::new(
            EnergyScheduler::new(
                EnergySchedulerConfig::default(),
                Arc::new(FixedPowerTelemetry::new(210.0)),
                Arc::new(FixedBatteryTelemetry::new(0.5)),
                Arc::new(SystemClock),
            )
            .unwrap(),
        );
        let (_stop_tx, stop_rx) = watch::channel(false);

        let mut trainer = Trainer::new(
            TrainerConfig {
                max_steps: 4,
                checkpoint_interval: 2,
                checkpoint_on_stop: false,
            },
            SimModelBackend::new(),
            SyntheticBatchSource::endless(),
            scheduler,
            Arc::clone(&guardian),
            stop_rx,
        )
        .unwrap();

        let summary = trainer.run().await.unwrap();
        assert_eq!(summary.steps_completed, 4);
        assert_eq!(summary.window_denials, 0);
        assert_eq!(summary.checkpoints_written, 2);
    }
}
