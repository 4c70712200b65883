//! Domain entities for training orchestration.

pub mod run;

pub use run::{RunSummary, StepMetrics, TrainerPhase};
