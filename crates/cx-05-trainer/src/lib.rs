//! # cx-05-trainer
//!
//! Orchestration loop tying the training core together.
//!
//! ## Step cycle
//!
//! ```text
//! IDLE → evaluate_window ──denied──→ sleep(delay), retry
//!              │ allowed
//!              ▼
//!        RUNNING step ──every N steps──→ CHECKPOINTING → RUNNING …
//!              │
//!              └──(max steps / batches exhausted / stop signal)──→ DONE
//! ```
//!
//! ## Failure semantics
//!
//! A denied energy window never aborts training - the loop backs off for
//! the suggested delay and retries, bounded only by the caller's stop
//! signal. A consensus-rejected checkpoint is logged and training
//! continues; only checkpoint store I/O failures are fatal. Stopping is
//! cooperative: the signal is honored between steps, never mid-step, and
//! a final forced checkpoint preserves progress on the way out.

pub mod adapters;
pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use adapters::{SimModelBackend, SyntheticBatchSource};
pub use domain::{RunSummary, StepMetrics, TrainerPhase};
pub use error::{ModelError, TrainerError, TrainerResult};
pub use ports::outbound::{BatchSource, ModelBackend};
pub use service::{Trainer, TrainerConfig};
