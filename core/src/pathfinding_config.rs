use serde::{Deserialize, Serialize};

/// Remaining budget, in nanoseconds, at or below which time-sliced work yields.
pub const DEFAULT_TIME_TOLERANCE_NS: i64 = 100;

/// Configuration shared by the search engine, the request controller and the
/// request queue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathfindingConfig {
    /// Stop working on a request once the frame budget left is at or below this (ns)
    pub time_tolerance_ns: i64,
    /// Collect visited-node and open-list statistics for every search
    pub calculate_metrics: bool,
    /// Initial capacity of the request queue
    pub queue_capacity: usize,
}

impl PathfindingConfig {
    pub fn new(time_tolerance_ns: i64, calculate_metrics: bool, queue_capacity: usize) -> Self {
        Self {
            time_tolerance_ns,
            calculate_metrics,
            queue_capacity,
        }
    }
}

impl Default for PathfindingConfig {
    fn default() -> Self {
        Self {
            time_tolerance_ns: DEFAULT_TIME_TOLERANCE_NS,
            calculate_metrics: false,
            queue_capacity: 16,
        }
    }
}
