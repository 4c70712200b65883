//! # Colossus Telemetry
//!
//! Observability plumbing for the training core.
//!
//! ## Components
//!
//! - Structured logging via `tracing-subscriber` (env-filtered, optional
//!   JSON output for log shippers)
//! - Prometheus metrics registry for consensus, checkpoint, energy, and
//!   trainer counters
//!
//! ## Usage
//!
//! ```rust,ignore
//! use colossus_telemetry::{init_telemetry, TelemetryConfig};
//!
//! let config = TelemetryConfig::from_env();
//! init_telemetry(&config).expect("telemetry init failed");
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `CX_SERVICE_NAME` | `colossus-core` | Service name in logs |
//! | `CX_LOG_LEVEL` / `RUST_LOG` | `info` | Log level filter |
//! | `CX_JSON_LOGS` | `false` (true in containers) | JSON log output |
//! | `CX_METRICS_PORT` | `9100` | Prometheus scrape port |

mod config;
mod metrics;

pub use config::TelemetryConfig;
pub use metrics::{
    gather_metrics, register_metrics, AUDIT_ENTRIES, CHECKPOINTS_PERSISTED, CHECKPOINTS_REJECTED,
    CONSENSUS_LAST_FRACTION, CONSENSUS_ROUNDS, ENERGY_WINDOW_DENIALS, REGISTRY,
    SAFETY_CHECK_FAILURES, TRAINING_STEPS,
};

use thiserror::Error;

/// Telemetry initialization errors.
#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("tracing subscriber initialization failed: {message}")]
    Init { message: String },

    #[error("metrics registration failed: {message}")]
    Metrics { message: String },
}

/// Initialize structured logging and register core metrics.
///
/// Safe to call once per process; a second call reports `Init` because
/// the global subscriber is already set.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_new(&config.log_level)
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let result = if config.json_logs {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_current_span(false)
            .try_init()
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).try_init()
    };
    result.map_err(|e| TelemetryError::Init {
        message: e.to_string(),
    })?;

    register_metrics()?;

    tracing::info!(
        service_name = %config.service_name,
        json_logs = config.json_logs,
        "telemetry initialized"
    );
    Ok(())
}
