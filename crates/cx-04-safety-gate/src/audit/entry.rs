//! Audit chain entry.

use crate::error::AuditError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use shared_types::Timestamp;

/// One hash-chained audit record.
///
/// `hash` is the SHA-256 (hex) of the canonical JSON of every other
/// field; `previous_hash` is the prior entry's `hash` (64 zeros for
/// genesis). Entries are append-only and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    /// Sequential position, 0 for genesis.
    pub index: u64,
    /// Append time (seconds since epoch).
    pub timestamp: Timestamp,
    /// Event discriminator, e.g. `"safety_check"`.
    pub event_type: String,
    /// Free-form event payload.
    pub details: Value,
    /// Hash of the prior entry.
    pub previous_hash: String,
    /// Self-hash over all fields above.
    pub hash: String,
}

/// Shadow of [`AuditEntry`] without the self-hash; its serialized form
/// is the hashing preimage. Field order here is the canonical order.
#[derive(Serialize)]
struct HashPreimage<'a> {
    index: u64,
    timestamp: Timestamp,
    event_type: &'a str,
    details: &'a Value,
    previous_hash: &'a str,
}

impl AuditEntry {
    /// Build an entry, computing its self-hash.
    pub fn new(
        index: u64,
        timestamp: Timestamp,
        event_type: impl Into<String>,
        details: Value,
        previous_hash: String,
    ) -> Result<Self, AuditError> {
        let event_type = event_type.into();
        let hash = compute_hash(index, timestamp, &event_type, &details, &previous_hash)?;
        Ok(Self {
            index,
            timestamp,
            event_type,
            details,
            previous_hash,
            hash,
        })
    }

    /// Recompute the self-hash from current field values.
    pub fn recompute_hash(&self) -> Result<String, AuditError> {
        compute_hash(
            self.index,
            self.timestamp,
            &self.event_type,
            &self.details,
            &self.previous_hash,
        )
    }
}

fn compute_hash(
    index: u64,
    timestamp: Timestamp,
    event_type: &str,
    details: &Value,
    previous_hash: &str,
) -> Result<String, AuditError> {
    let preimage = HashPreimage {
        index,
        timestamp,
        event_type,
        details,
        previous_hash,
    };
    let bytes = serde_json::to_vec(&preimage).map_err(|e| AuditError::Encode {
        message: e.to_string(),
    })?;
    Ok(hex::encode(Sha256::digest(&bytes)))
}
