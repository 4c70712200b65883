//! Ports (hexagonal boundaries) for the trainer.

pub mod outbound;

pub use outbound::{BatchSource, ModelBackend};
