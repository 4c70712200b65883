//! Unified Verifier - safety gate + policy + audit trail

use crate::audit::AuditLogger;
use crate::domain::{VerificationOutcome, VerificationStatus};
use crate::error::VerifierError;
use crate::ports::outbound::PolicyEngine;
use crate::service::SafetyGate;
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

/// Wraps the safety gate with policy evaluation and a tamper-evident
/// record of every verification step.
///
/// Each `verify` call appends three audit events - `safety_check`,
/// `policy_check`, `verification_result` - on success and failure paths
/// alike, so post-hoc review always sees the complete trail.
pub struct UnifiedVerifier {
    gate: SafetyGate,
    policy: Option<Arc<dyn PolicyEngine>>,
    audit: AuditLogger,
}

impl UnifiedVerifier {
    /// Verifier without a policy engine: policy passes vacuously.
    pub fn new(gate: SafetyGate, audit: AuditLogger) -> Self {
        Self {
            gate,
            policy: None,
            audit,
        }
    }

    pub fn with_policy_engine(
        gate: SafetyGate,
        policy: Arc<dyn PolicyEngine>,
        audit: AuditLogger,
    ) -> Self {
        Self {
            gate,
            policy: Some(policy),
            audit,
        }
    }

    /// Run the full verification protocol for one deployment.
    pub async fn verify(
        &self,
        deployment_id: &str,
    ) -> Result<VerificationOutcome, VerifierError> {
        let verification_id = Uuid::new_v4();

        let report = self.gate.evaluate().await;
        self.audit.log_event(
            "safety_check",
            json!({
                "verification_id": verification_id.to_string(),
                "deployment_id": deployment_id,
                "ok": report.ok,
                "checks_passed": report.checks_passed,
                "checks_total": report.checks_total,
                "reasons": report.reasons,
            }),
        )?;

        let (opa_passed, policy_blocker) = match &self.policy {
            None => (true, None),
            Some(engine) => match engine.evaluate(deployment_id).await {
                Ok(true) => (true, None),
                Ok(false) => (
                    false,
                    Some("policy engine rejected the deployment".to_string()),
                ),
                Err(e) => {
                    tracing::warn!(deployment_id, error = %e, "policy engine unavailable");
                    (false, Some(format!("policy engine unavailable: {e}")))
                }
            },
        };
        self.audit.log_event(
            "policy_check",
            json!({
                "verification_id": verification_id.to_string(),
                "deployment_id": deployment_id,
                "opa_passed": opa_passed,
            }),
        )?;

        let status = if !report.ok {
            VerificationStatus::Failed
        } else if !opa_passed {
            VerificationStatus::Blocked
        } else {
            VerificationStatus::Passed
        };

        let mut blockers = report.reasons;
        blockers.extend(policy_blocker);

        let outcome = VerificationOutcome {
            deployment_id: deployment_id.to_string(),
            status,
            deployment_approved: status == VerificationStatus::Passed,
            opa_passed,
            blockers,
        };

        self.audit.log_event(
            "verification_result",
            json!({
                "verification_id": verification_id.to_string(),
                "deployment_id": deployment_id,
                "status": outcome.status,
                "deployment_approved": outcome.deployment_approved,
                "blockers": outcome.blockers,
            }),
        )?;

        tracing::info!(
            deployment_id,
            status = ?outcome.status,
            approved = outcome.deployment_approved,
            "verification complete"
        );
        Ok(outcome)
    }

    /// The verifier's audit trail.
    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }
}
