//! Core types for crawl operations.
//!
//! This module contains the error taxonomy, the queue item carried by the
//! frontier, and the report handed to the result sink when a crawl ends.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::matcher::MatchRecord;

/// Error type for crawl operations
///
/// Only [`CrawlError::Config`] aborts a crawl, and only before it starts.
/// `InvalidUrl` is a per-URL condition the frontier logs and moves past.
/// Fetch and extraction failures are [`RenderError`](crate::renderer::RenderError)s
/// and never leave the page task.
#[derive(Debug, thiserror::Error)]
pub enum CrawlError {
    /// Malformed or incomplete configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// A URL that could not be parsed or normalized
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Browser launch or control failure
    #[error("Browser error: {0}")]
    Browser(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Report serialization that failed outside serde, e.g. a timed-out
    /// writer task
    #[error("Crawl error: {0}")]
    Other(String),
}

/// Convenience alias for Result with `CrawlError`
pub type CrawlResult<T> = Result<T, CrawlError>;

/// An item in the crawl queue with URL and depth tracking
///
/// `url` is always in normalized form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlQueue {
    pub url: String,
    pub depth: u32,
}

/// Why the orchestrator stopped dispatching pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopReason {
    /// The frontier ran dry; every reachable in-scope page was visited
    FrontierExhausted,
    /// The configured page limit was reached
    PageLimit,
    /// The configured wall-clock budget ran out
    TimeBudget,
    /// The cancel flag was raised
    Cancelled,
}

impl std::fmt::Display for StopReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FrontierExhausted => write!(f, "frontier exhausted"),
            Self::PageLimit => write!(f, "page limit reached"),
            Self::TimeBudget => write!(f, "time budget exhausted"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Everything a finished crawl produced
///
/// A partial crawl (budget exhausted, cancelled) still yields a report with
/// every record gathered up to that point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlReport {
    pub start_url: String,
    pub domain: String,
    /// Match records in the order they were collected
    pub records: Vec<MatchRecord>,
    /// Normalized URLs in the order they were dequeued
    pub visited_urls: Vec<String>,
    pub pages_visited: usize,
    pub pages_skipped: usize,
    pub stop_reason: StopReason,
    pub duration: Duration,
}

impl CrawlReport {
    /// Number of records of a given kind
    #[must_use]
    pub fn count_of(&self, kind: crate::matcher::MatchKind) -> usize {
        self.records.iter().filter(|r| r.kind == kind).count()
    }
}
