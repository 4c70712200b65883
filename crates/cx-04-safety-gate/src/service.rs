//! Safety Gate - aggregated deployment checks

use crate::domain::SafetyReport;
use crate::error::{SafetyError, SafetyResult};
use crate::ports::outbound::{ConsensusProbe, EvalProbe, MetricsProbe, ProvenanceProbe};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

/// Number of independent checks one evaluation runs.
const CHECKS_TOTAL: usize = 6;

/// Safety gate thresholds.
#[derive(Clone, Debug)]
pub struct SafetyGateConfig {
    /// Grid draw ceiling in megawatts.
    pub power_limit_mw: f64,
    /// Minimum acceptable checkpoint-consensus fraction.
    pub min_consensus_fraction: f64,
    /// Bias score ceiling.
    pub max_bias_score: f64,
    /// Hallucination rate ceiling.
    pub max_hallucination_rate: f64,
    /// Time budget per probe call.
    pub probe_timeout: Duration,
}

impl Default for SafetyGateConfig {
    fn default() -> Self {
        Self {
            power_limit_mw: 250.0,
            min_consensus_fraction: 0.99,
            max_bias_score: 0.2,
            max_hallucination_rate: 0.15,
            probe_timeout: Duration::from_secs(5),
        }
    }
}

impl SafetyGateConfig {
    /// Validate thresholds at construction time.
    pub fn validate(&self) -> SafetyResult<()> {
        if !(self.power_limit_mw.is_finite() && self.power_limit_mw > 0.0) {
            return Err(SafetyError::InvalidConfig {
                reason: format!("power_limit_mw must be positive, got {}", self.power_limit_mw),
            });
        }
        if !(self.min_consensus_fraction > 0.0 && self.min_consensus_fraction <= 1.0) {
            return Err(SafetyError::InvalidConfig {
                reason: format!(
                    "min_consensus_fraction must be in (0, 1], got {}",
                    self.min_consensus_fraction
                ),
            });
        }
        if self.max_bias_score <= 0.0 || self.max_hallucination_rate <= 0.0 {
            return Err(SafetyError::InvalidConfig {
                reason: "eval ceilings must be positive".to_string(),
            });
        }
        if self.probe_timeout.is_zero() {
            return Err(SafetyError::InvalidConfig {
                reason: "probe_timeout must be non-zero".to_string(),
            });
        }
        Ok(())
    }
}

/// Aggregates independent pass/fail checks into one deployment signal.
pub struct SafetyGate {
    config: SafetyGateConfig,
    metrics: Arc<dyn MetricsProbe>,
    provenance: Arc<dyn ProvenanceProbe>,
    consensus: Arc<dyn ConsensusProbe>,
    evals: Arc<dyn EvalProbe>,
}

impl SafetyGate {
    pub fn new(
        config: SafetyGateConfig,
        metrics: Arc<dyn MetricsProbe>,
        provenance: Arc<dyn ProvenanceProbe>,
        consensus: Arc<dyn ConsensusProbe>,
        evals: Arc<dyn EvalProbe>,
    ) -> SafetyResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            metrics,
            provenance,
            consensus,
            evals,
        })
    }

    /// Run every check and aggregate.
    ///
    /// A probe error or timeout is a failed check with a readable
    /// reason; evaluation itself never raises, and partial failure can
    /// never come back `ok`.
    pub async fn evaluate(&self) -> SafetyReport {
        let mut reasons = Vec::new();

        match self.probe("power", self.metrics.power_mw()).await {
            Ok(mw) if mw > self.config.power_limit_mw => reasons.push(format!(
                "grid power draw {mw:.1} MW exceeds limit {:.1} MW",
                self.config.power_limit_mw
            )),
            Ok(_) => {}
            Err(reason) => reasons.push(reason),
        }

        let emissions = async {
            let rate = self.metrics.nox_emissions_rate().await?;
            let limit = self.metrics.nox_permit_limit().await?;
            Ok((rate, limit))
        };
        match self.probe("emissions", emissions).await {
            Ok((rate, limit)) if rate > limit => reasons.push(format!(
                "NOx emissions rate {rate:.2} exceeds permit limit {limit:.2}"
            )),
            Ok(_) => {}
            Err(reason) => reasons.push(reason),
        }

        match self
            .probe("provenance", self.provenance.latest_root_verified())
            .await
        {
            Ok(true) => {}
            Ok(false) => reasons.push("latest provenance root is not verified".to_string()),
            Err(reason) => reasons.push(reason),
        }

        match self
            .probe("consensus", self.consensus.latest_consensus_fraction())
            .await
        {
            Ok(fraction) if fraction < self.config.min_consensus_fraction => {
                reasons.push(format!(
                    "checkpoint consensus fraction {fraction:.3} below required {:.3}",
                    self.config.min_consensus_fraction
                ))
            }
            Ok(_) => {}
            Err(reason) => reasons.push(reason),
        }

        match self.probe("bias eval", self.evals.bias_score()).await {
            Ok(score) if score > self.config.max_bias_score => reasons.push(format!(
                "bias score {score:.2} above ceiling {:.2}",
                self.config.max_bias_score
            )),
            Ok(_) => {}
            Err(reason) => reasons.push(reason),
        }

        match self
            .probe("hallucination eval", self.evals.hallucination_rate())
            .await
        {
            Ok(rate) if rate > self.config.max_hallucination_rate => reasons.push(format!(
                "hallucination rate {rate:.2} above ceiling {:.2}",
                self.config.max_hallucination_rate
            )),
            Ok(_) => {}
            Err(reason) => reasons.push(reason),
        }

        let report = SafetyReport::from_outcomes(CHECKS_TOTAL, reasons);
        if !report.ok {
            colossus_telemetry::SAFETY_CHECK_FAILURES
                .inc_by((report.checks_total - report.checks_passed) as f64);
        }
        tracing::info!(
            ok = report.ok,
            checks_passed = report.checks_passed,
            checks_total = report.checks_total,
            "safety gate evaluated"
        );
        report
    }

    /// Hold a probe call to the configured time budget and flatten its
    /// failure modes into an operator-readable reason.
    async fn probe<T, F>(&self, name: &'static str, call: F) -> Result<T, String>
    where
        F: Future<Output = SafetyResult<T>>,
    {
        match timeout(self.config.probe_timeout, call).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => {
                tracing::warn!(probe = name, error = %e, "probe failed");
                Err(format!("{name} check unavailable: {e}"))
            }
            Err(_) => {
                tracing::warn!(probe = name, "probe timed out");
                Err(format!("{name} check timed out"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{
        FixedConsensusProbe, FixedEvalProbe, FixedMetricsProbe, FixedProvenanceProbe,
    };
    use async_trait::async_trait;

    fn all_passing_gate() -> SafetyGate {
        gate_with_power(200.0)
    }

    fn gate_with_power(power_mw: f64) -> SafetyGate {
        SafetyGate::new(
            SafetyGateConfig::default(),
            Arc::new(FixedMetricsProbe::new(power_mw, 10.0, 50.0)),
            Arc::new(FixedProvenanceProbe::new(true)),
            Arc::new(FixedConsensusProbe::new(0.995)),
            Arc::new(FixedEvalProbe::new(0.15, 0.10)),
        )
        .unwrap()
    }

    struct StalledEvalProbe;

    #[async_trait]
    impl EvalProbe for StalledEvalProbe {
        async fn bias_score(&self) -> SafetyResult<f64> {
            std::future::pending::<()>().await;
            unreachable!()
        }
        async fn hallucination_rate(&self) -> SafetyResult<f64> {
            Ok(0.05)
        }
    }

    #[test]
    fn test_config_validation_fails_fast() {
        let config = SafetyGateConfig {
            min_consensus_fraction: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[tokio::test]
    async fn test_all_passing_checks_report_ok() {
        let report = all_passing_gate().evaluate().await;
        assert!(report.ok);
        assert_eq!(report.checks_passed, 6);
        assert_eq!(report.checks_total, 6);
        assert!(report.reasons.is_empty());
        assert_eq!(report.pass_rate, 1.0);
    }

    #[tokio::test]
    async fn test_power_over_limit_fails_exactly_one_check() {
        let report = gate_with_power(280.0).evaluate().await;
        assert!(!report.ok);
        assert_eq!(report.checks_passed, 5);
        assert_eq!(report.reasons.len(), 1);
        assert!(report.reasons[0].contains("grid power draw"));
        assert!(report.reasons[0].contains("280.0"));
    }

    #[tokio::test]
    async fn test_unverified_provenance_fails() {
        let gate = SafetyGate::new(
            SafetyGateConfig::default(),
            Arc::new(FixedMetricsProbe::new(200.0, 10.0, 50.0)),
            Arc::new(FixedProvenanceProbe::new(false)),
            Arc::new(FixedConsensusProbe::new(0.995)),
            Arc::new(FixedEvalProbe::new(0.15, 0.10)),
        )
        .unwrap();

        let report = gate.evaluate().await;
        assert!(!report.ok);
        assert!(report.reasons.iter().any(|r| r.contains("provenance")));
    }

    #[tokio::test]
    async fn test_low_consensus_fraction_fails() {
        let gate = SafetyGate::new(
            SafetyGateConfig::default(),
            Arc::new(FixedMetricsProbe::new(200.0, 10.0, 50.0)),
            Arc::new(FixedProvenanceProbe::new(true)),
            Arc::new(FixedConsensusProbe::new(0.97)),
            Arc::new(FixedEvalProbe::new(0.15, 0.10)),
        )
        .unwrap();

        let report = gate.evaluate().await;
        assert!(!report.ok);
        assert!(report
            .reasons
            .iter()
            .any(|r| r.contains("consensus fraction")));
    }

    #[tokio::test]
    async fn test_nox_over_permit_fails() {
        let gate = SafetyGate::new(
            SafetyGateConfig::default(),
            Arc::new(FixedMetricsProbe::new(200.0, 60.0, 50.0)),
            Arc::new(FixedProvenanceProbe::new(true)),
            Arc::new(FixedConsensusProbe::new(0.995)),
            Arc::new(FixedEvalProbe::new(0.15, 0.10)),
        )
        .unwrap();

        let report = gate.evaluate().await;
        assert!(!report.ok);
        assert!(report.reasons.iter().any(|r| r.contains("NOx")));
    }

    #[tokio::test]
    async fn test_stalled_probe_is_a_failed_check_not_a_hang() {
        let config = SafetyGateConfig {
            probe_timeout: Duration::from_millis(50),
            ..Default::default()
        };
        let gate = SafetyGate::new(
            config,
            Arc::new(FixedMetricsProbe::new(200.0, 10.0, 50.0)),
            Arc::new(FixedProvenanceProbe::new(true)),
            Arc::new(FixedConsensusProbe::new(0.995)),
            Arc::new(StalledEvalProbe),
        )
        .unwrap();

        let report = gate.evaluate().await;
        assert!(!report.ok);
        assert_eq!(report.checks_passed, 5);
        assert!(report.reasons[0].contains("timed out"));
    }
}
