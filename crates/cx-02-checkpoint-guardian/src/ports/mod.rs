//! Ports (hexagonal boundaries) for the checkpoint guardian.

pub mod outbound;

pub use outbound::CheckpointStore;
