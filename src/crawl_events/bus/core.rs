//! The `CrawlEventBus` handle: construction, cloning and subscriptions

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::{Notify, broadcast};

use crate::crawl_events::config::EventBusConfig;
use crate::crawl_events::metrics::EventBusMetrics;
use crate::crawl_events::streaming::FilteredReceiver;
use crate::crawl_events::types::CrawlEvent;

/// Fan-out of crawl events to any number of listeners
///
/// Clones share one channel, one set of metrics and one shutdown signal.
/// Dropping the last clone counts as a shutdown.
#[derive(Debug)]
pub struct CrawlEventBus {
    pub(super) sender: broadcast::Sender<CrawlEvent>,
    pub(super) config: Arc<EventBusConfig>,
    pub(super) metrics: EventBusMetrics,
    pub(super) shutdown: Arc<Notify>,
    pub(super) shutdown_flag: Arc<AtomicBool>,
    handles: Arc<AtomicUsize>,
}

impl CrawlEventBus {
    /// Bus buffering up to `capacity` events per subscriber
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self::with_config(EventBusConfig {
            capacity,
            ..EventBusConfig::default()
        })
    }

    #[must_use]
    pub fn with_config(config: EventBusConfig) -> Self {
        // broadcast::channel rejects a zero capacity
        let (sender, _) = broadcast::channel(config.capacity.max(1));
        Self {
            sender,
            config: Arc::new(config),
            metrics: EventBusMetrics::new(),
            shutdown: Arc::new(Notify::new()),
            shutdown_flag: Arc::new(AtomicBool::new(false)),
            handles: Arc::new(AtomicUsize::new(1)),
        }
    }

    #[must_use]
    pub fn config(&self) -> &EventBusConfig {
        &self.config
    }

    /// Publish/drop counters; take a `snapshot()` for a consistent view
    #[must_use]
    pub fn metrics(&self) -> &EventBusMetrics {
        &self.metrics
    }

    /// Receive every event published from now on
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<CrawlEvent> {
        self.sender.subscribe()
    }

    /// Receive only the events `filter` accepts. `Shutdown` is always
    /// delivered so a filtered listener can still exit its loop.
    pub fn subscribe_filtered<F>(&self, filter: F) -> FilteredReceiver<F>
    where
        F: Fn(&CrawlEvent) -> bool + Send + Sync + 'static,
    {
        FilteredReceiver::new(self.sender.subscribe(), filter)
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    #[must_use]
    pub fn has_subscribers(&self) -> bool {
        self.sender.receiver_count() > 0
    }
}

impl Default for CrawlEventBus {
    fn default() -> Self {
        Self::with_config(EventBusConfig::default())
    }
}

impl Clone for CrawlEventBus {
    fn clone(&self) -> Self {
        self.handles.fetch_add(1, Ordering::Relaxed);
        Self {
            sender: self.sender.clone(),
            config: Arc::clone(&self.config),
            metrics: self.metrics.clone(),
            shutdown: Arc::clone(&self.shutdown),
            shutdown_flag: Arc::clone(&self.shutdown_flag),
            handles: Arc::clone(&self.handles),
        }
    }
}

impl Drop for CrawlEventBus {
    fn drop(&mut self) {
        // Previous value 1 means this was the last handle
        if self.handles.fetch_sub(1, Ordering::AcqRel) == 1 {
            self.shutdown_flag.store(true, Ordering::SeqCst);
            self.shutdown.notify_waiters();
            log::trace!(target: "brandcheck::events", "Last event bus handle dropped");
        }
    }
}
