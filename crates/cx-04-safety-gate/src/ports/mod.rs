//! Ports (hexagonal boundaries) for safety verification.

pub mod outbound;

pub use outbound::{ConsensusProbe, EvalProbe, MetricsProbe, PolicyEngine, ProvenanceProbe};
