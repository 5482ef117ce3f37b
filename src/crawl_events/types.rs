//! Event type definitions for the crawl event system

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::crawl_engine::crawl_types::StopReason;
use crate::matcher::MatchRecord;

/// Reason for event bus shutdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShutdownReason {
    /// Crawl ran to its end (frontier exhausted or a budget reached)
    CrawlCompleted,
    /// Crawl aborted with an error
    Error(String),
    /// Crawl was cancelled by the user
    Cancelled,
}

/// Per-page details attached to `PageVisited`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageVisitMetadata {
    /// Characters of visible text scanned
    pub text_len: usize,
    /// Records produced by the match engine for this page
    pub matches: usize,
    /// Raw hrefs returned by the renderer
    pub links_found: usize,
    /// Links newly added to the frontier
    pub links_enqueued: usize,
    /// Whether extraction only partially succeeded
    pub partial: bool,
    /// Time from dispatch to scanned
    pub processing_duration: Duration,
}

/// Totals carried by `CrawlCompleted`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrawlSummary {
    pub pages_visited: usize,
    pub pages_skipped: usize,
    pub total_matches: usize,
    pub stop_reason: StopReason,
    pub duration: Duration,
}

/// Event types emitted during a crawl
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum CrawlEvent {
    /// Emitted once the renderer is ready and the frontier is seeded
    CrawlStarted {
        start_url: String,
        domain: String,
        max_depth: Option<u32>,
        timestamp: chrono::DateTime<chrono::Utc>,
    },
    /// A page was rendered and scanned
    PageVisited {
        url: String,
        depth: u32,
        metadata: PageVisitMetadata,
        timestamp: chrono::DateTime<chrono::Utc>,
    },
    /// A page failed to load or timed out and was skipped
    PageSkipped {
        url: String,
        depth: u32,
        reason: String,
        timestamp: chrono::DateTime<chrono::Utc>,
    },
    /// One match record was produced
    MatchFound {
        record: MatchRecord,
        timestamp: chrono::DateTime<chrono::Utc>,
    },
    /// A page limit, time budget or cancellation stopped dispatching
    BudgetExhausted {
        reason: StopReason,
        timestamp: chrono::DateTime<chrono::Utc>,
    },
    /// Emitted when the crawl ends, before results are written
    CrawlCompleted {
        summary: CrawlSummary,
        timestamp: chrono::DateTime<chrono::Utc>,
    },
    /// Signals that the event bus is shutting down
    ///
    /// Subscribers should exit their event loops when receiving this event.
    Shutdown {
        reason: ShutdownReason,
        timestamp: chrono::DateTime<chrono::Utc>,
    },
}

/// Helper functions for creating common events
impl CrawlEvent {
    #[must_use]
    pub fn crawl_started(start_url: String, domain: String, max_depth: Option<u32>) -> Self {
        Self::CrawlStarted {
            start_url,
            domain,
            max_depth,
            timestamp: chrono::Utc::now(),
        }
    }

    #[must_use]
    pub fn page_visited(url: String, depth: u32, metadata: PageVisitMetadata) -> Self {
        Self::PageVisited {
            url,
            depth,
            metadata,
            timestamp: chrono::Utc::now(),
        }
    }

    #[must_use]
    pub fn page_skipped(url: String, depth: u32, reason: String) -> Self {
        Self::PageSkipped {
            url,
            depth,
            reason,
            timestamp: chrono::Utc::now(),
        }
    }

    #[must_use]
    pub fn match_found(record: MatchRecord) -> Self {
        Self::MatchFound {
            record,
            timestamp: chrono::Utc::now(),
        }
    }

    #[must_use]
    pub fn budget_exhausted(reason: StopReason) -> Self {
        Self::BudgetExhausted {
            reason,
            timestamp: chrono::Utc::now(),
        }
    }

    #[must_use]
    pub fn crawl_completed(summary: CrawlSummary) -> Self {
        Self::CrawlCompleted {
            summary,
            timestamp: chrono::Utc::now(),
        }
    }

    #[must_use]
    pub fn shutdown(reason: ShutdownReason) -> Self {
        Self::Shutdown {
            reason,
            timestamp: chrono::Utc::now(),
        }
    }

    /// Short variant name, used in log lines and filters
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::CrawlStarted { .. } => "crawl_started",
            Self::PageVisited { .. } => "page_visited",
            Self::PageSkipped { .. } => "page_skipped",
            Self::MatchFound { .. } => "match_found",
            Self::BudgetExhausted { .. } => "budget_exhausted",
            Self::CrawlCompleted { .. } => "crawl_completed",
            Self::Shutdown { .. } => "shutdown",
        }
    }

    #[must_use]
    pub fn timestamp(&self) -> chrono::DateTime<chrono::Utc> {
        match self {
            Self::CrawlStarted { timestamp, .. }
            | Self::PageVisited { timestamp, .. }
            | Self::PageSkipped { timestamp, .. }
            | Self::MatchFound { timestamp, .. }
            | Self::BudgetExhausted { timestamp, .. }
            | Self::CrawlCompleted { timestamp, .. }
            | Self::Shutdown { timestamp, .. } => *timestamp,
        }
    }
}
