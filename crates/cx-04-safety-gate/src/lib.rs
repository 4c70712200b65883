//! # cx-04-safety-gate
//!
//! Deployment-readiness verification for the Colossus training core.
//!
//! ## Components
//!
//! - **Safety Gate**: aggregates six independent checks (grid draw, NOx
//!   permit compliance, provenance root, checkpoint consensus fraction,
//!   bias score, hallucination rate) into one pass/fail
//!   [`domain::SafetyReport`]. A probe that errors or times out is a
//!   failed check with a readable reason - partial failure can never
//!   report `ok`.
//! - **Audit Logger**: append-only, hash-chained JSONL log. Every entry
//!   links to its predecessor's SHA-256; a broken link is a
//!   security-relevant event and surfaces as an error naming the index,
//!   never a silent `false`.
//! - **Unified Verifier**: runs the gate, consults an optional policy
//!   engine, and records every step in the audit chain before returning
//!   a composed verdict.
//!
//! ```text
//! UnifiedVerifier ──evaluate──→ SafetyGate ──probes──→ collaborators
//!        │
//!        ├── audit: safety_check
//!        ├── audit: policy_check
//!        └── audit: verification_result
//! ```

pub mod adapters;
pub mod audit;
pub mod domain;
pub mod error;
pub mod ports;
pub mod service;
pub mod verifier;

pub use adapters::{
    FixedConsensusProbe, FixedEvalProbe, FixedMetricsProbe, FixedProvenanceProbe,
    StaticPolicyEngine,
};
pub use audit::{AuditEntry, AuditLogger};
pub use domain::{SafetyReport, VerificationOutcome, VerificationStatus};
pub use error::{AuditError, PolicyError, SafetyError, SafetyResult, VerifierError};
pub use ports::outbound::{ConsensusProbe, EvalProbe, MetricsProbe, PolicyEngine, ProvenanceProbe};
pub use service::{SafetyGate, SafetyGateConfig};
pub use verifier::UnifiedVerifier;
