//! Canonical serialization and content hashing.
//!
//! JSON object keys serialize in sorted order (serde_json's default map
//! is a BTreeMap), so equal states always produce identical bytes and
//! therefore identical hashes. The hash must exist before any consensus
//! round is initiated for it.

use crate::error::CheckpointError;
use serde_json::Value;
use sha2::{Digest, Sha256};
use shared_types::Hash;

/// Serialize model state to canonical bytes.
pub fn canonical_bytes(state: &Value) -> Result<Vec<u8>, CheckpointError> {
    serde_json::to_vec(state).map_err(|e| CheckpointError::Serialization {
        reason: e.to_string(),
    })
}

/// SHA-256 content hash of serialized state.
pub fn content_hash(bytes: &[u8]) -> Hash {
    let digest = Sha256::digest(bytes);
    let mut hash = [0u8; 32];
    hash.copy_from_slice(&digest);
    hash
}
