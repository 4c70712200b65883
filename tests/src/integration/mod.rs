//! Cross-subsystem integration flows.

pub mod checkpoint_flow;
pub mod training_flow;
pub mod verification_flow;
