//! Structured crawl events
//!
//! The orchestrator publishes page, match and lifecycle events on a tokio
//! broadcast bus. Subscribers (the CLI logger, tests, external tooling)
//! consume them without the crawl knowing who is listening.

pub mod bus;
pub mod config;
pub mod errors;
pub mod metrics;
pub mod streaming;
pub mod types;

pub use bus::CrawlEventBus;
pub use config::EventBusConfig;
pub use errors::EventBusError;
pub use metrics::{EventBusMetrics, MetricsSnapshot};
pub use streaming::FilteredReceiver;
pub use types::{CrawlEvent, CrawlSummary, PageVisitMetadata, ShutdownReason};
