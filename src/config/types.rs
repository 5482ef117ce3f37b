//! Core configuration types for brand-consistency crawls
//!
//! `CrawlConfig` is immutable once built and shared by every page task of a
//! crawl.

use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::crawl_events::CrawlEventBus;
use crate::matcher::StringSets;

/// Cooperative cancellation signal checked once per orchestrator iteration
///
/// Clones share the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the crawl to stop dispatching new pages
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Main configuration struct for a crawl
#[derive(Debug, Clone, Serialize)]
pub struct CrawlConfig {
    /// Absolute http(s) start URL
    pub(crate) start_url: String,

    /// Host of `start_url`; all traversal is scoped to it
    pub(crate) domain: String,

    /// Official, detect and fuzzy strings plus regex pattern sources,
    /// trimmed and deduplicated
    pub(crate) strings: StringSets,

    /// Regexes compiled from `strings.regex_patterns` at build time
    #[serde(skip)]
    pub(crate) compiled_patterns: Vec<regex::Regex>,

    pub(crate) regex_case_insensitive: bool,

    /// Inclusive fuzzy cutoff on the 0-100 similarity scale
    ///
    /// Default: 85
    pub(crate) fuzzy_threshold: f64,

    /// Deepest link level to visit; the start page is depth 0
    ///
    /// Default: unlimited
    pub(crate) max_depth: Option<u32>,

    /// Maximum number of pages to fetch
    pub(crate) limit: Option<usize>,

    /// Wall-clock budget for the whole crawl, in seconds
    pub(crate) time_budget_secs: Option<u64>,

    /// Timeout for one render (navigation, settle, extraction)
    ///
    /// Default: 20 seconds
    pub(crate) fetch_timeout_secs: u64,

    /// Pause after navigation so client-side content can settle
    ///
    /// Default: 1000 ms
    pub(crate) settle_delay_ms: u64,

    /// Minimum spacing between consecutive page dispatches, across all
    /// concurrent tasks. The first fetch is not delayed.
    ///
    /// Default: 0
    pub(crate) politeness_delay_ms: u64,

    /// Number of pages rendered at once
    /// Default: 1, Range: 1-32
    pub(crate) max_concurrent_pages: usize,

    pub(crate) headless: bool,

    /// Chrome user data directory for profile isolation
    #[serde(skip)]
    pub(crate) chrome_data_dir: Option<PathBuf>,

    /// Optional event bus for publishing crawl events
    #[serde(skip)]
    pub(crate) event_bus: Option<Arc<CrawlEventBus>>,

    /// Optional cooperative cancellation flag
    #[serde(skip)]
    pub(crate) cancel_flag: Option<CancelFlag>,
}

impl CrawlConfig {
    /// Attach an event bus for real-time crawl events
    #[must_use]
    pub fn with_event_bus(mut self, bus: Arc<CrawlEventBus>) -> Self {
        self.event_bus = Some(bus);
        self
    }

    /// Set Chrome user data directory for browser profile isolation
    #[must_use]
    pub fn with_chrome_data_dir(mut self, dir: PathBuf) -> Self {
        self.chrome_data_dir = Some(dir);
        self
    }

    /// Attach a cancel flag; raising it stops the crawl at the next
    /// iteration and still yields the records gathered so far
    #[must_use]
    pub fn with_cancel_flag(mut self, flag: CancelFlag) -> Self {
        self.cancel_flag = Some(flag);
        self
    }
}
