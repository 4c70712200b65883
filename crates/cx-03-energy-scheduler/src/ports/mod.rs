//! Ports (hexagonal boundaries) for the energy scheduler.

pub mod outbound;

pub use outbound::{BatteryTelemetry, Clock, PowerTelemetry};
