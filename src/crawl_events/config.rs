//! Configuration for the event bus

use std::time::Duration;

use crate::utils::constants::DEFAULT_EVENT_BUS_CAPACITY;

/// Configuration for the event bus
#[derive(Debug, Clone)]
pub struct EventBusConfig {
    /// Maximum number of events buffered per subscriber before the oldest
    /// are dropped
    pub capacity: usize,

    /// Whether to collect publish/drop counters
    pub enable_metrics: bool,

    /// How long `shutdown_gracefully` waits for subscribers to drain after
    /// publishing the `Shutdown` event
    pub shutdown_drain: Duration,
}

impl Default for EventBusConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_EVENT_BUS_CAPACITY,
            enable_metrics: true,
            shutdown_drain: Duration::from_millis(200),
        }
    }
}
