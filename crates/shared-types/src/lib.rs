//! # Shared Types Crate
//!
//! Domain primitives shared across the Colossus training-core subsystems.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: cross-crate types (hashes, timestamps,
//!   the `TimeSource` port) are defined here and nowhere else.
//! - **No subsystem logic**: this crate holds data definitions only;
//!   behavior lives in the owning subsystem crates.

pub mod entities;
pub mod time;

pub use entities::*;
pub use time::{FixedTimeSource, SystemTimeSource, TimeSource};
