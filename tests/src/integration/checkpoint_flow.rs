//! # Checkpoint Flow Integration
//!
//! Exercises the consensus protocol and checkpoint guardian together,
//! on disk, the way the trainer drives them:
//!
//! 1. **Consensus at scale**: a 100-node cluster agreeing on a hash
//! 2. **Guardian ↔ consensus ↔ disk**: agreed checkpoints persisted and
//!    re-verifiable across guardian instances
//! 3. **Divergence**: a node with a conflicting local hash blocking a
//!    small quorum

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use cx_01_consensus::{
        ConsensusApi, ConsensusConfig, ConsensusService, ConsensusState, LedgerVoteSource,
        VoteSource,
    };
    use cx_02_checkpoint_guardian::{CheckpointGuardian, FileCheckpointStore};
    use rand::Rng;
    use serde_json::json;
    use shared_types::{Hash, NodeId, SystemTimeSource};

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    fn test_hash(n: u8) -> Hash {
        let mut hash = [0u8; 32];
        hash[0] = n;
        hash
    }

    /// Register `count` nodes on a fresh default-config service.
    fn cluster(count: usize) -> Arc<ConsensusService> {
        let svc = ConsensusService::new(ConsensusConfig::default()).unwrap();
        for i in 0..count {
            svc.register_node(NodeId::new(format!("gpu-rack-{i:03}")));
        }
        Arc::new(svc)
    }

    /// A model state with some bulk, so serialization is non-trivial.
    fn model_state(step: u64) -> serde_json::Value {
        let mut rng = rand::thread_rng();
        let weights: Vec<f64> = (0..64).map(|_| rng.gen_range(-1.0..1.0)).collect();
        json!({
            "step": step,
            "weights": weights,
            "optimizer": { "lr": 3e-4, "beta1": 0.9, "beta2": 0.95 },
        })
    }

    // =============================================================================
    // INTEGRATION TESTS: CONSENSUS AT SCALE
    // =============================================================================

    /// 100 unanimous nodes at the default 0.99 threshold agree.
    #[tokio::test]
    async fn test_hundred_node_unanimous_round_agrees() {
        let svc = cluster(100);
        assert_eq!(svc.node_count(), 100);

        let round = svc.initiate_consensus(test_hash(0xAB), 1000).await.unwrap();

        assert!(round.is_agreed());
        assert!(round.fraction >= 0.99);
        assert_eq!(round.total_nodes, 100);
        assert_eq!(round.votes_for, 100);
        assert!(svc.latest_consensus_fraction() >= 0.99);
    }

    /// Unregistering below quorum weight flips the outcome for later
    /// rounds without touching completed ones.
    #[tokio::test]
    async fn test_membership_changes_only_affect_future_rounds() {
        let svc = cluster(10);
        let first = svc.initiate_consensus(test_hash(1), 10).await.unwrap();
        assert!(first.is_agreed());

        for i in 0..10 {
            svc.unregister_node(&NodeId::new(format!("gpu-rack-{i:03}")));
        }
        let second = svc.initiate_consensus(test_hash(2), 20).await.unwrap();

        assert_eq!(second.state, ConsensusState::Rejected);
        assert_eq!(second.total_nodes, 0);
        // The completed first round is untouched.
        assert!(first.is_agreed());
    }

    // =============================================================================
    // INTEGRATION TESTS: GUARDIAN ↔ CONSENSUS ↔ DISK
    // =============================================================================

    /// Checkpoints created out of step order land on disk, survive a
    /// guardian restart, and re-verify.
    #[tokio::test]
    async fn test_checkpoints_survive_guardian_restart() {
        let dir = tempfile::tempdir().unwrap();
        let states: Vec<(u64, serde_json::Value)> =
            [1u64, 2, 5, 3].iter().map(|&s| (s, model_state(s))).collect();

        {
            let guardian = CheckpointGuardian::new(
                FileCheckpointStore::new(dir.path()).unwrap(),
                cluster(5),
            );
            for (step, state) in &states {
                let metadata = guardian
                    .create_checkpoint(*step, state, false)
                    .await
                    .unwrap()
                    .expect("unanimous cluster agrees");
                assert_eq!(metadata.hash.len(), 32);
            }
            assert_eq!(guardian.get_latest_checkpoint().unwrap().unwrap().step, 5);
        }

        // A new guardian over the same directory sees everything.
        let reopened = CheckpointGuardian::new(
            FileCheckpointStore::new(dir.path()).unwrap(),
            cluster(5),
        );
        let steps: Vec<u64> = reopened
            .list_checkpoints()
            .unwrap()
            .iter()
            .map(|m| m.step)
            .collect();
        assert_eq!(steps, vec![1, 2, 3, 5]);

        for (step, state) in &states {
            assert!(reopened.verify_checkpoint(*step));
            assert_eq!(&reopened.load_checkpoint(*step).unwrap().unwrap(), state);
        }
    }

    /// Every persisted metadata hash encodes to 64 hex chars.
    #[tokio::test]
    async fn test_metadata_hashes_are_64_hex_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let guardian = CheckpointGuardian::new(
            FileCheckpointStore::new(dir.path()).unwrap(),
            cluster(3),
        );
        guardian
            .create_checkpoint(1, &model_state(1), false)
            .await
            .unwrap();

        let raw = std::fs::read_to_string(dir.path().join("step-0000000001.meta.json")).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let hash_hex = parsed["hash"].as_str().unwrap();
        assert_eq!(hash_hex.len(), 64);
        assert!(hex::decode(hash_hex).is_ok());
    }

    // =============================================================================
    // INTEGRATION TESTS: DIVERGENCE
    // =============================================================================

    /// One node whose local checkpoint hash differs dissents, and a
    /// 3-node quorum at the default threshold fails.
    #[tokio::test]
    async fn test_divergent_node_blocks_small_quorum() {
        let votes = Arc::new(LedgerVoteSource::new());
        let svc = Arc::new(
            ConsensusService::with_vote_source(
                ConsensusConfig::default(),
                Arc::clone(&votes) as Arc<dyn VoteSource>,
                Arc::new(SystemTimeSource),
            )
            .unwrap(),
        );
        for i in 0..3 {
            svc.register_node(NodeId::new(format!("gpu-rack-{i:03}")));
        }

        // gpu-rack-001 observed a different hash for step 500.
        votes.record_observed(NodeId::new("gpu-rack-001"), 500, test_hash(0xEE));

        let round = svc.initiate_consensus(test_hash(0xAA), 500).await.unwrap();
        assert_eq!(round.state, ConsensusState::Rejected);
        assert_eq!(round.votes_for, 2);
        assert_eq!(round.votes_against, 1);

        // Same divergence at step 501 makes the guardian discard the
        // checkpoint it is asked to create there.
        votes.record_observed(NodeId::new("gpu-rack-001"), 501, test_hash(0xEE));
        let dir = tempfile::tempdir().unwrap();
        let guardian = CheckpointGuardian::new(
            FileCheckpointStore::new(dir.path()).unwrap(),
            Arc::clone(&svc),
        );
        let result = guardian
            .create_checkpoint(501, &model_state(501), false)
            .await
            .unwrap();
        assert!(result.is_none());
        assert!(guardian.list_checkpoints().unwrap().is_empty());
    }
}
