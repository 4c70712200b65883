//! Composed verification result.

use serde::{Deserialize, Serialize};

/// Terminal status of a unified verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerificationStatus {
    /// Safety gate and policy both passed.
    Passed,
    /// The safety gate failed.
    Failed,
    /// The gate passed but the policy engine rejected the deployment.
    Blocked,
}

/// What `UnifiedVerifier::verify` hands back to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationOutcome {
    pub deployment_id: String,
    pub status: VerificationStatus,
    /// True iff `status == Passed`.
    pub deployment_approved: bool,
    /// Policy engine verdict (vacuously true when no engine is wired).
    pub opa_passed: bool,
    /// Gate failure reasons plus any policy blocker.
    pub blockers: Vec<String>,
}
