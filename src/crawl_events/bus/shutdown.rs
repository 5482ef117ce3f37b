//! Shutdown operations for `CrawlEventBus`

use std::sync::atomic::Ordering;

use crate::crawl_events::types::{CrawlEvent, ShutdownReason};

use super::core::CrawlEventBus;

impl CrawlEventBus {
    /// Signal shutdown to all subscribers without publishing an event.
    /// Idempotent; shared by every clone.
    pub fn shutdown(&self) {
        self.shutdown_flag.store(true, Ordering::SeqCst);
        self.shutdown.notify_waiters();
        log::debug!(target: "brandcheck::events", "Event bus shutdown signaled");
    }

    /// Wait for the shutdown signal
    ///
    /// ```rust,ignore
    /// tokio::select! {
    ///     Ok(event) = rx.recv() => { /* handle event */ }
    ///     _ = bus.wait_for_shutdown() => break,
    /// }
    /// ```
    pub async fn wait_for_shutdown(&self) {
        if self.is_shutdown() {
            return;
        }
        self.shutdown.notified().await;
    }

    #[must_use]
    pub fn is_shutdown(&self) -> bool {
        self.shutdown_flag.load(Ordering::SeqCst)
    }

    /// Stop accepting events, publish `Shutdown`, give subscribers
    /// `config.shutdown_drain` to catch up, then wake anyone waiting on
    /// [`wait_for_shutdown`](Self::wait_for_shutdown).
    pub async fn shutdown_gracefully(&self, reason: ShutdownReason) {
        log::debug!(target: "brandcheck::events", "Shutting down event bus: {reason:?}");

        self.shutdown_flag.store(true, Ordering::SeqCst);
        let _ = self.publish(CrawlEvent::shutdown(reason));

        if self.has_subscribers() && !self.config.shutdown_drain.is_zero() {
            tokio::time::sleep(self.config.shutdown_drain).await;
        }

        self.shutdown.notify_waiters();
    }
}
