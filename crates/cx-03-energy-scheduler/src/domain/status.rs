//! Energy status snapshot.

use serde::{Deserialize, Serialize};
use shared_types::Timestamp;

/// Snapshot of current grid and battery conditions.
///
/// Constructed fresh on each `get_status()` call; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyStatus {
    /// Current grid draw in megawatts.
    pub power_mw: f64,
    /// Battery state of charge in [0, 1].
    pub soc: f64,
    /// Whether the snapshot falls inside the configured off-peak window.
    pub in_offpeak: bool,
    /// Snapshot time (seconds since epoch).
    pub timestamp: Timestamp,
}
