//! Domain entities for energy scheduling.

pub mod decision;
pub mod status;
pub mod window;

pub use decision::{DecisionReason, PowerWindowDecision};
pub use status::EnergyStatus;
pub use window::OffpeakWindow;
