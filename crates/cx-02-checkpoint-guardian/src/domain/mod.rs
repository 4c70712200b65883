//! Domain entities and hashing for checkpoints.

pub mod metadata;
pub mod serialize;

pub use metadata::CheckpointMetadata;
pub use serialize::{canonical_bytes, content_hash};
