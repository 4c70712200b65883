//! Energy Scheduler - Core decision logic

use crate::domain::{DecisionReason, EnergyStatus, OffpeakWindow, PowerWindowDecision};
use crate::error::{EnergyError, EnergyResult};
use crate::ports::outbound::{BatteryTelemetry, Clock, PowerTelemetry};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

/// SoC at or above which training runs unthrottled.
const SOC_FULL_TIER: f64 = 0.8;
/// Throughput scale for the mid SoC tier.
const SCALE_MID_TIER: f64 = 0.8;
/// Throughput scale for a depleted battery during off-peak hours.
const SCALE_DEPLETED_OFFPEAK: f64 = 0.5;
/// Scale hint attached to denials (applies when the caller retries).
const SCALE_ON_DENIAL: f64 = 0.5;

/// Scheduler configuration. Defaults are usable with no collaborators
/// beyond the telemetry ports.
#[derive(Clone, Debug)]
pub struct EnergySchedulerConfig {
    /// Grid draw ceiling in megawatts. Draw strictly above this denies;
    /// the boundary itself is allowed.
    pub power_limit_mw: f64,
    /// Minimum state of charge for on-peak training.
    pub soc_min: f64,
    /// Daily off-peak window during which SoC throttling is relaxed.
    pub offpeak: OffpeakWindow,
    /// Retry delay attached to denials.
    pub retry_delay_secs: u64,
    /// Time budget per telemetry call.
    pub telemetry_timeout: Duration,
}

impl Default for EnergySchedulerConfig {
    fn default() -> Self {
        Self {
            power_limit_mw: 250.0,
            soc_min: 0.4,
            offpeak: OffpeakWindow::default(),
            retry_delay_secs: 60,
            telemetry_timeout: Duration::from_secs(5),
        }
    }
}

impl EnergySchedulerConfig {
    /// Validate numeric bounds at construction time.
    pub fn validate(&self) -> EnergyResult<()> {
        if !(self.power_limit_mw.is_finite() && self.power_limit_mw > 0.0) {
            return Err(EnergyError::InvalidConfig {
                reason: format!("power_limit_mw must be positive, got {}", self.power_limit_mw),
            });
        }
        if !(self.soc_min > 0.0 && self.soc_min < 1.0) {
            return Err(EnergyError::InvalidConfig {
                reason: format!("soc_min must be in (0, 1), got {}", self.soc_min),
            });
        }
        if self.retry_delay_secs == 0 {
            return Err(EnergyError::InvalidConfig {
                reason: "retry_delay_secs must be positive".to_string(),
            });
        }
        if self.telemetry_timeout.is_zero() {
            return Err(EnergyError::InvalidConfig {
                reason: "telemetry_timeout must be non-zero".to_string(),
            });
        }
        Ok(())
    }
}

/// Power- and battery-aware training window scheduler.
pub struct EnergyScheduler {
    config: EnergySchedulerConfig,
    power: Arc<dyn PowerTelemetry>,
    battery: Arc<dyn BatteryTelemetry>,
    clock: Arc<dyn Clock>,
}

impl EnergyScheduler {
    pub fn new(
        config: EnergySchedulerConfig,
        power: Arc<dyn PowerTelemetry>,
        battery: Arc<dyn BatteryTelemetry>,
        clock: Arc<dyn Clock>,
    ) -> EnergyResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            power,
            battery,
            clock,
        })
    }

    pub fn config(&self) -> &EnergySchedulerConfig {
        &self.config
    }

    /// Read both telemetry sources and stamp an [`EnergyStatus`].
    ///
    /// Each read is held to the configured time budget; a slow client
    /// surfaces as `TelemetryTimeout`, never as an indefinite hang.
    pub async fn get_status(&self) -> EnergyResult<EnergyStatus> {
        let power_mw = timeout(self.config.telemetry_timeout, self.power.current_mw())
            .await
            .map_err(|_| EnergyError::TelemetryTimeout {
                source_name: "power",
            })??;
        let soc = timeout(self.config.telemetry_timeout, self.battery.current_soc())
            .await
            .map_err(|_| EnergyError::TelemetryTimeout {
                source_name: "battery",
            })??;

        let now = self.clock.now_utc();
        Ok(EnergyStatus {
            power_mw,
            soc: soc.clamp(0.0, 1.0),
            in_offpeak: self.config.offpeak.contains(now.time()),
            timestamp: now.timestamp().max(0) as u64,
        })
    }

    /// Decide whether training may proceed this instant.
    ///
    /// Degrades to a denial on telemetry failure; never raises.
    pub async fn evaluate_window(&self) -> PowerWindowDecision {
        let status = match self.get_status().await {
            Ok(status) => status,
            Err(e) => {
                tracing::warn!(error = %e, "window evaluation without telemetry - denying");
                return PowerWindowDecision::deny(
                    DecisionReason::TelemetryUnavailable,
                    SCALE_ON_DENIAL,
                    self.config.retry_delay_secs,
                );
            }
        };

        if status.power_mw > self.config.power_limit_mw {
            tracing::info!(
                power_mw = status.power_mw,
                limit_mw = self.config.power_limit_mw,
                "grid draw above limit - denying window"
            );
            return PowerWindowDecision::deny(
                DecisionReason::GridConstraint,
                SCALE_ON_DENIAL,
                self.config.retry_delay_secs,
            );
        }

        if status.soc >= SOC_FULL_TIER {
            return PowerWindowDecision::allow(1.0);
        }
        if status.soc >= self.config.soc_min {
            return PowerWindowDecision::allow(SCALE_MID_TIER);
        }
        if status.in_offpeak {
            tracing::debug!(soc = status.soc, "depleted battery off-peak - throttling");
            return PowerWindowDecision::allow(SCALE_DEPLETED_OFFPEAK);
        }

        tracing::info!(
            soc = status.soc,
            soc_min = self.config.soc_min,
            "battery below minimum on-peak - denying window"
        );
        PowerWindowDecision::deny(
            DecisionReason::SocLow,
            SCALE_ON_DENIAL,
            self.config.retry_delay_secs,
        )
    }
}
