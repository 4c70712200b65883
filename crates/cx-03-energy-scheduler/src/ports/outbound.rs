//! Driven Ports (SPI - Outbound Dependencies)
//!
//! Production adapters implement these against real grid metering and
//! Megapack telemetry; the scheduler core never touches hardware.

use crate::error::EnergyResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Live grid draw.
#[async_trait]
pub trait PowerTelemetry: Send + Sync {
    /// Current draw in megawatts.
    async fn current_mw(&self) -> EnergyResult<f64>;
}

/// Battery state of charge.
#[async_trait]
pub trait BatteryTelemetry: Send + Sync {
    /// Current state of charge in [0, 1].
    async fn current_soc(&self) -> EnergyResult<f64>;
}

/// Wall-clock interface for off-peak window evaluation.
pub trait Clock: Send + Sync {
    fn now_utc(&self) -> DateTime<Utc>;
}
