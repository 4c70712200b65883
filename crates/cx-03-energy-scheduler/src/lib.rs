//! # cx-03-energy-scheduler
//!
//! Single source of truth for "is it safe and efficient to draw more
//! power for training right now".
//!
//! ## Decision model
//!
//! Every `evaluate_window()` call reads live grid draw and battery state
//! of charge through narrow telemetry ports and produces an allow/deny
//! verdict with a suggested throughput scale and a retry delay:
//!
//! - draw strictly above the grid limit denies with `GRID_CONSTRAINT`
//!   (the limit itself is still allowed);
//! - state of charge sets the throughput tier: full batteries run at
//!   scale 1.0, mid-range at 0.8, and a depleted battery either throttles
//!   to 0.5 (off-peak) or denies with `SOC_LOW` (on-peak);
//! - unreachable telemetry denies with `TELEMETRY_UNAVAILABLE` rather
//!   than guessing.
//!
//! A denial always carries a positive retry delay; a full block is
//! expressed through `allowed = false`, never through a scale of zero.

pub mod adapters;
pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use adapters::{FixedBatteryTelemetry, FixedClock, FixedPowerTelemetry, SystemClock};
pub use domain::{DecisionReason, EnergyStatus, OffpeakWindow, PowerWindowDecision};
pub use error::{EnergyError, EnergyResult};
pub use ports::outbound::{BatteryTelemetry, Clock, PowerTelemetry};
pub use service::{EnergyScheduler, EnergySchedulerConfig};
