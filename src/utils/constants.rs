//! Shared configuration constants for brandcheck
//!
//! This module contains default values and configuration constants used
//! throughout the codebase to ensure consistency and avoid magic numbers.

/// Default fuzzy similarity threshold (inclusive, on a 0-100 scale)
///
/// A one-character difference in an eleven-character name scores about 91,
/// so 85 catches single typos and hyphenation slips without flagging
/// unrelated lines.
pub const DEFAULT_FUZZY_THRESHOLD: f64 = 85.0;

/// Default per-fetch timeout: 20 seconds
///
/// Covers navigation, load and text extraction for one page. A page that
/// exceeds it is skipped like any other fetch failure.
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 20;

/// Default settle delay after navigation: 1 second
///
/// Gives client-side rendering a moment to populate the document before the
/// visible text is read.
pub const DEFAULT_SETTLE_DELAY_MS: u64 = 1000;

/// Default number of pages rendered concurrently
///
/// One page at a time keeps the output order identical to the breadth-first
/// visit order.
pub const DEFAULT_MAX_CONCURRENT_PAGES: usize = 1;

/// Upper bound accepted for `max_concurrent_pages`
pub const MAX_CONCURRENT_PAGES_LIMIT: usize = 32;

/// Capacity of the crawl event bus when the CLI creates one
pub const DEFAULT_EVENT_BUS_CAPACITY: usize = 1024;

/// Chrome user agent string
///
/// Updated: 2025-01-29 to Chrome 132 (current stable)
pub const CHROME_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/132.0.6834.160 Safari/537.36";
