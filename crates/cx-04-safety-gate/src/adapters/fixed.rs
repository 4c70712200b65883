//! Fixed-value probe adapters.
//!
//! Settable stand-ins for real telemetry, provenance, eval, and policy
//! backends.

use crate::error::{PolicyError, SafetyResult};
use crate::ports::outbound::{
    ConsensusProbe, EvalProbe, MetricsProbe, PolicyEngine, ProvenanceProbe,
};
use async_trait::async_trait;
use parking_lot::RwLock;

/// [`MetricsProbe`] returning settable constants.
#[derive(Debug)]
pub struct FixedMetricsProbe {
    power_mw: RwLock<f64>,
    nox_rate: RwLock<f64>,
    nox_limit: RwLock<f64>,
}

impl FixedMetricsProbe {
    pub fn new(power_mw: f64, nox_rate: f64, nox_limit: f64) -> Self {
        Self {
            power_mw: RwLock::new(power_mw),
            nox_rate: RwLock::new(nox_rate),
            nox_limit: RwLock::new(nox_limit),
        }
    }

    pub fn set_power_mw(&self, mw: f64) {
        *self.power_mw.write() = mw;
    }
}

#[async_trait]
impl MetricsProbe for FixedMetricsProbe {
    async fn power_mw(&self) -> SafetyResult<f64> {
        Ok(*self.power_mw.read())
    }

    async fn nox_emissions_rate(&self) -> SafetyResult<f64> {
        Ok(*self.nox_rate.read())
    }

    async fn nox_permit_limit(&self) -> SafetyResult<f64> {
        Ok(*self.nox_limit.read())
    }
}

/// [`ProvenanceProbe`] with a settable verdict.
#[derive(Debug)]
pub struct FixedProvenanceProbe {
    verified: RwLock<bool>,
}

impl FixedProvenanceProbe {
    pub fn new(verified: bool) -> Self {
        Self {
            verified: RwLock::new(verified),
        }
    }

    pub fn set(&self, verified: bool) {
        *self.verified.write() = verified;
    }
}

#[async_trait]
impl ProvenanceProbe for FixedProvenanceProbe {
    async fn latest_root_verified(&self) -> SafetyResult<bool> {
        Ok(*self.verified.read())
    }
}

/// [`ConsensusProbe`] with a settable fraction.
#[derive(Debug)]
pub struct FixedConsensusProbe {
    fraction: RwLock<f64>,
}

impl FixedConsensusProbe {
    pub fn new(fraction: f64) -> Self {
        Self {
            fraction: RwLock::new(fraction),
        }
    }

    pub fn set(&self, fraction: f64) {
        *self.fraction.write() = fraction;
    }
}

#[async_trait]
impl ConsensusProbe for FixedConsensusProbe {
    async fn latest_consensus_fraction(&self) -> SafetyResult<f64> {
        Ok(*self.fraction.read())
    }
}

/// [`EvalProbe`] with settable scores.
#[derive(Debug)]
pub struct FixedEvalProbe {
    bias: RwLock<f64>,
    hallucination: RwLock<f64>,
}

impl FixedEvalProbe {
    pub fn new(bias: f64, hallucination: f64) -> Self {
        Self {
            bias: RwLock::new(bias),
            hallucination: RwLock::new(hallucination),
        }
    }
}

#[async_trait]
impl EvalProbe for FixedEvalProbe {
    async fn bias_score(&self) -> SafetyResult<f64> {
        Ok(*self.bias.read())
    }

    async fn hallucination_rate(&self) -> SafetyResult<f64> {
        Ok(*self.hallucination.read())
    }
}

/// [`PolicyEngine`] with a fixed decision.
#[derive(Debug)]
pub struct StaticPolicyEngine {
    decision: bool,
}

impl StaticPolicyEngine {
    pub fn new(decision: bool) -> Self {
        Self { decision }
    }
}

#[async_trait]
impl PolicyEngine for StaticPolicyEngine {
    async fn evaluate(&self, _deployment_id: &str) -> Result<bool, PolicyError> {
        Ok(self.decision)
    }
}
