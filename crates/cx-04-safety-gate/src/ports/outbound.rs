//! Driven Ports (SPI - Outbound Dependencies)
//!
//! Capability sets the gate consumes. Production adapters implement
//! these against real telemetry, provenance, and eval systems; the gate
//! core never talks to them directly.

use crate::error::{PolicyError, SafetyResult};
use async_trait::async_trait;

/// Site metrics: grid draw and turbine emissions.
#[async_trait]
pub trait MetricsProbe: Send + Sync {
    /// Current site draw in megawatts.
    async fn power_mw(&self) -> SafetyResult<f64>;

    /// Current NOx emissions rate (tons/yr equivalent).
    async fn nox_emissions_rate(&self) -> SafetyResult<f64>;

    /// Permitted NOx ceiling for the site.
    async fn nox_permit_limit(&self) -> SafetyResult<f64>;
}

/// Training-data provenance attestation.
#[async_trait]
pub trait ProvenanceProbe: Send + Sync {
    /// Whether the latest provenance root has been verified.
    async fn latest_root_verified(&self) -> SafetyResult<bool>;
}

/// Checkpoint consensus health.
#[async_trait]
pub trait ConsensusProbe: Send + Sync {
    /// Fraction of the most recent consensus round, in [0, 1].
    async fn latest_consensus_fraction(&self) -> SafetyResult<f64>;
}

/// Model evaluation scores.
#[async_trait]
pub trait EvalProbe: Send + Sync {
    /// Bias evaluation score (lower is better).
    async fn bias_score(&self) -> SafetyResult<f64>;

    /// Hallucination rate (lower is better).
    async fn hallucination_rate(&self) -> SafetyResult<f64>;
}

/// Policy engine (OPA-style) consulted by the unified verifier.
#[async_trait]
pub trait PolicyEngine: Send + Sync {
    /// Whether policy permits this deployment.
    async fn evaluate(&self, deployment_id: &str) -> Result<bool, PolicyError>;
}
