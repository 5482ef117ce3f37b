//! Publishing operations for `CrawlEventBus`

use crate::crawl_events::errors::EventBusError;
use crate::crawl_events::types::CrawlEvent;

use super::core::CrawlEventBus;

impl CrawlEventBus {
    /// Publish an event to all subscribers.
    ///
    /// Returns the number of subscribers that will see it. With nobody
    /// listening the event is counted as dropped and
    /// `EventBusError::NoSubscribers` is returned; the crawl ignores that.
    /// When the channel is full the oldest buffered event is overwritten and
    /// slow receivers observe a lag.
    pub fn publish(&self, event: CrawlEvent) -> Result<usize, EventBusError> {
        if self.is_shutdown() && !matches!(event, CrawlEvent::Shutdown { .. }) {
            return Err(EventBusError::Shutdown);
        }

        match self.sender.send(event) {
            Ok(subscriber_count) => {
                if self.config.enable_metrics {
                    self.metrics.increment_published();
                    self.metrics.update_subscriber_count(subscriber_count);
                }
                Ok(subscriber_count)
            }
            Err(_) => {
                if self.config.enable_metrics {
                    self.metrics.increment_dropped();
                    self.metrics.update_subscriber_count(0);
                }
                Err(EventBusError::NoSubscribers)
            }
        }
    }

    /// Publish several events in order, best effort.
    /// Returns how many were delivered to at least one subscriber.
    pub fn publish_all(&self, events: impl IntoIterator<Item = CrawlEvent>) -> usize {
        events
            .into_iter()
            .map(|event| self.publish(event))
            .filter(Result::is_ok)
            .count()
    }
}
