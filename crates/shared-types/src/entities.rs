//! # Core Domain Primitives
//!
//! Defines the primitive types every training-core subsystem speaks:
//! content hashes, timestamps, and node identifiers.

use serde::{Deserialize, Serialize};

/// A 32-byte content hash (SHA-256), 64 hex characters when encoded.
pub type Hash = [u8; 32];

/// Length of a hex-encoded [`Hash`].
pub const HASH_HEX_LEN: usize = 64;

/// Unix timestamp in seconds.
pub type Timestamp = u64;

/// Unique identifier for a voting node in the training cluster.
///
/// Node ids are operator-assigned strings (e.g. `"gpu-rack-07"`), not
/// cryptographic identities; membership is managed by registration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Encode a hash as lowercase hex (64 chars).
pub fn hash_to_hex(hash: &Hash) -> String {
    hex::encode(hash)
}

/// Decode a 64-char hex string into a hash.
pub fn hash_from_hex(s: &str) -> Result<Hash, HashParseError> {
    if s.len() != HASH_HEX_LEN {
        return Err(HashParseError::BadLength { len: s.len() });
    }
    let bytes = hex::decode(s).map_err(|_| HashParseError::BadEncoding)?;
    let mut hash = [0u8; 32];
    hash.copy_from_slice(&bytes);
    Ok(hash)
}

/// The all-zero hash used as the genesis predecessor in hash chains.
pub fn zero_hash_hex() -> String {
    "0".repeat(HASH_HEX_LEN)
}

/// Errors decoding a hex-encoded hash.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HashParseError {
    #[error("hash must be {HASH_HEX_LEN} hex chars, got {len}")]
    BadLength { len: usize },

    #[error("hash contains non-hex characters")]
    BadEncoding,
}

/// Serde adapter for persisting a [`Hash`] as a 64-char hex string.
///
/// Usage: `#[serde(with = "shared_types::hex_hash")]`.
pub mod hex_hash {
    use super::{hash_from_hex, hash_to_hex, Hash};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(hash: &Hash, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hash_to_hex(hash))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Hash, D::Error> {
        let s = String::deserialize(deserializer)?;
        hash_from_hex(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_hex_round_trip() {
        let hash: Hash = [0xAB; 32];
        let encoded = hash_to_hex(&hash);
        assert_eq!(encoded.len(), HASH_HEX_LEN);
        assert_eq!(hash_from_hex(&encoded).unwrap(), hash);
    }

    #[test]
    fn test_hash_from_hex_rejects_bad_length() {
        assert_eq!(
            hash_from_hex("abc123"),
            Err(HashParseError::BadLength { len: 6 })
        );
    }

    #[test]
    fn test_hash_from_hex_rejects_non_hex() {
        let s = "zz".repeat(32);
        assert_eq!(hash_from_hex(&s), Err(HashParseError::BadEncoding));
    }

    #[test]
    fn test_zero_hash_is_64_zeros() {
        let z = zero_hash_hex();
        assert_eq!(z.len(), 64);
        assert!(z.chars().all(|c| c == '0'));
    }
}
