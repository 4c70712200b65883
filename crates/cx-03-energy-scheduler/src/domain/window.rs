//! Daily off-peak window arithmetic.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// A daily time-of-day range during which SoC throttling is relaxed.
///
/// Windows may wrap midnight (e.g. 22:00-06:00). `start == end` denotes
/// an empty window (never off-peak).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OffpeakWindow {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl OffpeakWindow {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    /// Whether `t` falls inside the window. Start-inclusive,
    /// end-exclusive.
    pub fn contains(&self, t: NaiveTime) -> bool {
        if self.start == self.end {
            false
        } else if self.start < self.end {
            self.start <= t && t < self.end
        } else {
            t >= self.start || t < self.end
        }
    }
}

impl Default for OffpeakWindow {
    /// 22:00-06:00, the overnight charging window.
    fn default() -> Self {
        Self {
            start: NaiveTime::from_hms_opt(22, 0, 0).unwrap(),
            end: NaiveTime::from_hms_opt(6, 0, 0).unwrap(),
        }
    }
}
