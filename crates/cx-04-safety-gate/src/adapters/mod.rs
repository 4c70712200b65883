//! Concrete adapters for safety-gate ports.

pub mod fixed;

pub use fixed::{
    FixedConsensusProbe, FixedEvalProbe, FixedMetricsProbe, FixedProvenanceProbe,
    StaticPolicyEngine,
};
