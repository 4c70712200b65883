//! Simulation adapters for trainer ports.

pub mod sim;

pub use sim::{SimModelBackend, SyntheticBatchSource};
