//! Prometheus metrics for the training core.
//!
//! Naming convention: `cx_<subsystem>_<metric>_<unit>`.

use lazy_static::lazy_static;
use prometheus::{Counter, CounterVec, Encoder, Gauge, Opts, Registry, TextEncoder};

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    // =========================================================================
    // CONSENSUS METRICS
    // =========================================================================

    /// Consensus rounds by outcome (agreed/rejected/timeout)
    pub static ref CONSENSUS_ROUNDS: CounterVec = CounterVec::new(
        Opts::new("cx_consensus_rounds_total", "Total checkpoint consensus rounds"),
        &["outcome"]
    ).expect("metric creation failed");

    /// Fraction of the most recent consensus round
    pub static ref CONSENSUS_LAST_FRACTION: Gauge = Gauge::new(
        "cx_consensus_last_fraction",
        "Approving fraction of the most recent consensus round"
    ).expect("metric creation failed");

    // =========================================================================
    // CHECKPOINT METRICS
    // =========================================================================

    /// Checkpoints persisted to the store
    pub static ref CHECKPOINTS_PERSISTED: Counter = Counter::new(
        "cx_checkpoint_persisted_total",
        "Total checkpoints written to durable storage"
    ).expect("metric creation failed");

    /// Checkpoints discarded after a failed quorum
    pub static ref CHECKPOINTS_REJECTED: Counter = Counter::new(
        "cx_checkpoint_rejected_total",
        "Total checkpoints discarded because consensus was not reached"
    ).expect("metric creation failed");

    // =========================================================================
    // ENERGY SCHEDULER METRICS
    // =========================================================================

    /// Window denials by reason
    pub static ref ENERGY_WINDOW_DENIALS: CounterVec = CounterVec::new(
        Opts::new("cx_energy_window_denials_total", "Training window denials"),
        &["reason"]
    ).expect("metric creation failed");

    // =========================================================================
    // TRAINER METRICS
    // =========================================================================

    /// Training steps completed
    pub static ref TRAINING_STEPS: Counter = Counter::new(
        "cx_trainer_steps_total",
        "Total training steps completed"
    ).expect("metric creation failed");

    // =========================================================================
    // SAFETY / AUDIT METRICS
    // =========================================================================

    /// Failed safety-gate checks
    pub static ref SAFETY_CHECK_FAILURES: Counter = Counter::new(
        "cx_safety_check_failures_total",
        "Total failed safety-gate checks"
    ).expect("metric creation failed");

    /// Audit chain entries appended
    pub static ref AUDIT_ENTRIES: Counter = Counter::new(
        "cx_audit_entries_total",
        "Total audit chain entries appended"
    ).expect("metric creation failed");
}

/// Register all core metrics with the global registry.
///
/// Idempotent from the caller's perspective: re-registration of an
/// already-registered collector is reported as `Metrics` only for
/// genuinely conflicting definitions.
pub fn register_metrics() -> Result<(), TelemetryError> {
    let collectors: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(CONSENSUS_ROUNDS.clone()),
        Box::new(CONSENSUS_LAST_FRACTION.clone()),
        Box::new(CHECKPOINTS_PERSISTED.clone()),
        Box::new(CHECKPOINTS_REJECTED.clone()),
        Box::new(ENERGY_WINDOW_DENIALS.clone()),
        Box::new(TRAINING_STEPS.clone()),
        Box::new(SAFETY_CHECK_FAILURES.clone()),
        Box::new(AUDIT_ENTRIES.clone()),
    ];

    for collector in collectors {
        match REGISTRY.register(collector) {
            Ok(())
            | Err(prometheus::Error::AlreadyReg) => {}
            Err(e) => {
                return Err(TelemetryError::Metrics {
                    message: e.to_string(),
                })
            }
        }
    }
    Ok(())
}

/// Render the registry in Prometheus text exposition format.
pub fn gather_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    encoder
        .encode(&REGISTRY.gather(), &mut buffer)
        .map_err(|e| TelemetryError::Metrics {
            message: e.to_string(),
        })?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::Metrics {
        message: e.to_string(),
    })
}
