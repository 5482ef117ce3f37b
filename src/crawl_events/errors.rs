//! Event bus errors

/// Why an event could not be published or received
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EventBusError {
    /// Nobody is listening; the crawl treats this as a no-op
    #[error("no subscriber is listening for crawl events")]
    NoSubscribers,

    /// A slow receiver was overrun and lost the given number of events
    #[error("subscriber fell behind and lost {0} event(s)")]
    ReceiverLagged(u64),

    /// The bus no longer accepts events, or every sender is gone
    #[error("crawl event bus is shut down")]
    Shutdown,
}
