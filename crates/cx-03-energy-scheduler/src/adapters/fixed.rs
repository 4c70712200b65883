//! Fixed-value adapters.
//!
//! Stand-ins for real telemetry: tests and wiring experiments steer the
//! readings directly.

use crate::error::EnergyResult;
use crate::ports::outbound::{BatteryTelemetry, Clock, PowerTelemetry};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;

/// [`PowerTelemetry`] returning a settable constant.
#[derive(Debug)]
pub struct FixedPowerTelemetry {
    mw: RwLock<f64>,
}

impl FixedPowerTelemetry {
    pub fn new(mw: f64) -> Self {
        Self { mw: RwLock::new(mw) }
    }

    pub fn set(&self, mw: f64) {
        *self.mw.write() = mw;
    }
}

#[async_trait]
impl PowerTelemetry for FixedPowerTelemetry {
    async fn current_mw(&self) -> EnergyResult<f64> {
        Ok(*self.mw.read())
    }
}

/// [`BatteryTelemetry`] returning a settable constant.
#[derive(Debug)]
pub struct FixedBatteryTelemetry {
    soc: RwLock<f64>,
}

impl FixedBatteryTelemetry {
    pub fn new(soc: f64) -> Self {
        Self {
            soc: RwLock::new(soc),
        }
    }

    pub fn set(&self, soc: f64) {
        *self.soc.write() = soc;
    }
}

#[async_trait]
impl BatteryTelemetry for FixedBatteryTelemetry {
    async fn current_soc(&self) -> EnergyResult<f64> {
        Ok(*self.soc.read())
    }
}

/// Production [`Clock`] backed by the system clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Pinned [`Clock`] for deterministic off-peak tests.
#[derive(Debug)]
pub struct FixedClock {
    now: RwLock<DateTime<Utc>>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: RwLock::new(now),
        }
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.write() = now;
    }
}

impl Clock for FixedClock {
    fn now_utc(&self) -> DateTime<Utc> {
        *self.now.read()
    }
}
