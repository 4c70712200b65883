//! # cx-02-checkpoint-guardian
//!
//! Durable checkpoint persistence gated by cluster consensus.
//!
//! ## Overview
//!
//! The guardian serializes model state to canonical JSON, hashes it with
//! SHA-256, and runs a consensus round over the hash before anything
//! touches disk. Only an agreed (or force-saved) checkpoint is persisted;
//! a rejected one is discarded whole - never partially written.
//!
//! ```text
//! Trainer (5) ──create_checkpoint(step, state)──→ Guardian (2)
//!                                                     │
//!                              hash ──→ Consensus (1) vote
//!                                                     │
//!                               [Agreed] ──→ CheckpointStore (atomic write)
//! ```
//!
//! ## Shared-resource discipline
//!
//! A checkpoint directory is exclusively owned by one guardian instance.
//! Pointing two guardians at the same directory is unsupported; the
//! constraint is configuration discipline, not runtime locking.

pub mod adapters;
pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use adapters::{FileCheckpointStore, InMemoryCheckpointStore};
pub use domain::{canonical_bytes, content_hash, CheckpointMetadata};
pub use error::{CheckpointError, CheckpointResult, StoreError};
pub use ports::outbound::CheckpointStore;
pub use service::CheckpointGuardian;
