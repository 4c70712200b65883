//! # Verification Flow Integration
//!
//! Drives the unified verifier against a live checkpoint guardian:
//! consensus health flows from real rounds into the safety gate's
//! consensus probe, and every verification leaves a complete, intact
//! audit trail.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use cx_01_consensus::{ConsensusApi, ConsensusConfig, ConsensusService};
    use cx_02_checkpoint_guardian::{CheckpointGuardian, CheckpointStore, InMemoryCheckpointStore};
    use cx_04_safety_gate::{
        AuditLogger, ConsensusProbe, FixedEvalProbe, FixedMetricsProbe, FixedProvenanceProbe,
        SafetyGate, SafetyGateConfig, SafetyResult, StaticPolicyEngine, UnifiedVerifier,
        VerificationStatus,
    };
    use serde_json::json;
    use shared_types::NodeId;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    /// [`ConsensusProbe`] reading live fractions from a guardian.
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

    fn gate_over(
        guardian: Arc<CheckpointGuardian<InMemoryCheckpointStore, ConsensusService>>,
        power_mw: f64,
    ) -> SafetyGate {
        SafetyGate::new(
            SafetyGateConfig::default(),
            Arc::new(FixedMetricsProbe::new(power_mw, 12.0, 50.0)),
            Arc::new(FixedProvenanceProbe::new(true)),
            Arc::new(GuardianProbe(guardian)),
            Arc::new(FixedEvalProbe::new(0.15, 0.10)),
        )
        .unwrap()
    }

    // =============================================================================
    // INTEGRATION TESTS
    // =============================================================================

    /// An agreed checkpoint feeds a ≥0.99 fraction into the gate, and a
    /// healthy site verifies end to end.
    #[tokio::test]
    async fn test_verifier_approves_healthy_deployment() {
        let guardian = Arc::new(CheckpointGuardian::new(
            InMemoryCheckpointStore::new(),
            cluster(100),
        ));
        guardian
            .create_checkpoint(1000, &json!({"weights": [1, 2, 3]}), false)
            .await
            .unwrap()
            .expect("unanimous cluster agrees");

        let dir = tempfile::tempdir().unwrap();
        let verifier = UnifiedVerifier::with_policy_engine(
            gate_over(Arc::clone(&guardian), 200.0),
            Arc::new(StaticPolicyEngine::new(true)),
            AuditLogger::new(dir.path().join("audit.log")).unwrap(),
        );

        let outcome = verifier.verify("grok5-prod-rollout").await.unwrap();
        assert_eq!(outcome.status, VerificationStatus::Passed);
        assert!(outcome.deployment_approved);
        assert!(outcome.opa_passed);
        assert!(outcome.blockers.is_empty());

        // Genesis + the three protocol events, all links intact.
        assert_eq!(verifier.audit().verify_integrity().unwrap(), 4);
    }

    /// A gate with no consensus round yet reads fraction 0.0 and fails
    /// the consensus check - an idle cluster never verifies.
    #[tokio::test]
    async fn test_verifier_fails_before_any_consensus_round() {
        let guardian = Arc::new(CheckpointGuardian::new(
            InMemoryCheckpointStore::new(),
            cluster(100),
        ));

        let dir = tempfile::tempdir().unwrap();
        let verifier = UnifiedVerifier::new(
            gate_over(guardian, 200.0),
            AuditLogger::new(dir.path().join("audit.log")).unwrap(),
        );

        let outcome = verifier.verify("grok5-cold-start").await.unwrap();
        assert_eq!(outcome.status, VerificationStatus::Failed);
        assert!(outcome
            .blockers
            .iter()
            .any(|b| b.contains("consensus fraction")));
    }

    /// Repeated verifications extend one continuous chain, and the
    /// failure path records the same complete trail as success.
    #[tokio::test]
    async fn test_repeated_verifications_extend_one_chain() {
        let guardian = Arc::new(CheckpointGuardian::new(
            InMemoryCheckpointStore::new(),
            cluster(10),
        ));
        guardian
            .create_checkpoint(1, &json!({"weights": []}), false)
            .await
            .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let audit_path = dir.path().join("audit.log");
        let verifier = UnifiedVerifier::new(
            gate_over(Arc::clone(&guardian), 280.0),
            AuditLogger::new(&audit_path).unwrap(),
        );

        let first = verifier.verify("grok5-attempt-1").await.unwrap();
        assert_eq!(first.status, VerificationStatus::Failed);
        assert_eq!(first.blockers.len(), 1);
        assert!(first.blockers[0].contains("grid power draw"));

        let second = verifier.verify("grok5-attempt-2").await.unwrap();
        assert_eq!(second.status, VerificationStatus::Failed);

        // Genesis + 3 events per verification.
        let entries = verifier.audit().entries();
        assert_eq!(entries.len(), 7);
        assert_eq!(verifier.audit().verify_integrity().unwrap(), 7);

        let event_types: Vec<&str> =
            entries.iter().map(|e| e.event_type.as_str()).collect();
        assert_eq!(
            event_types,
            vec![
                "genesis",
                "safety_check",
                "policy_check",
                "verification_result",
                "safety_check",
                "policy_check",
                "verification_result",
            ]
        );
    }
}
