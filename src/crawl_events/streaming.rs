//! Filtered event receivers

use tokio::sync::broadcast;

use super::errors::EventBusError;
use super::types::CrawlEvent;

/// Receiver that only yields events passing a predicate
///
/// `Shutdown` events bypass the predicate.
pub struct FilteredReceiver<F>
where
    F: Fn(&CrawlEvent) -> bool + Send + Sync + 'static,
{
    receiver: broadcast::Receiver<CrawlEvent>,
    filter: F,
}

impl<F> FilteredReceiver<F>
where
    F: Fn(&CrawlEvent) -> bool + Send + Sync + 'static,
{
    pub fn new(receiver: broadcast::Receiver<CrawlEvent>, filter: F) -> Self {
        Self { receiver, filter }
    }

    /// Wait for the next event that passes the filter.
    ///
    /// # Errors
    ///
    /// `Shutdown` once every sender is gone, `ReceiverLagged` if the buffer
    /// overflowed since the last call. The receiver stays usable after a lag.
    pub async fn recv(&mut self) -> Result<CrawlEvent, EventBusError> {
        loop {
            match self.receiver.recv().await {
                Ok(event) if self.would_receive(&event) => return Ok(event),
                Ok(_) => {}
                Err(broadcast::error::RecvError::Closed) => return Err(EventBusError::Shutdown),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    return Err(EventBusError::ReceiverLagged(skipped));
                }
            }
        }
    }

    /// Drain buffered events until one passes the filter, without waiting.
    pub fn try_recv(&mut self) -> Result<Option<CrawlEvent>, EventBusError> {
        loop {
            match self.receiver.try_recv() {
                Ok(event) if self.would_receive(&event) => return Ok(Some(event)),
                Ok(_) => {}
                Err(broadcast::error::TryRecvError::Empty) => return Ok(None),
                Err(broadcast::error::TryRecvError::Closed) => return Err(EventBusError::Shutdown),
                Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                    return Err(EventBusError::ReceiverLagged(skipped));
                }
            }
        }
    }

    #[must_use]
    pub fn would_receive(&self, event: &CrawlEvent) -> bool {
        matches!(event, CrawlEvent::Shutdown { .. }) || (self.filter)(event)
    }
}
