//! Concrete adapters for scheduler ports.

pub mod fixed;

pub use fixed::{FixedBatteryTelemetry, FixedClock, FixedPowerTelemetry, SystemClock};
