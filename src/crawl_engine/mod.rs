//! Crawl Engine Module
//!
//! The frontier, per-page processing and the orchestration loop, plus the
//! browser-backed crawler that wires them to Chrome.

pub mod cleanup;
pub mod crawl_types;
pub mod crawler;
pub mod execution;
pub mod frontier;
pub mod link_processor;
pub mod orchestrator;
pub mod page_processor;
pub mod page_timeout;
pub mod progress;

pub use execution::crawl_impl;

pub use orchestrator::crawl_pages;
pub use progress::{NoOpProgress, ProgressReporter};

pub use crawler::ChromiumoxideCrawler;
pub use frontier::Frontier;
pub use link_processor::{LinkStats, process_page_links};
pub use page_processor::{PageOutcome, PageResult};

pub use crawl_types::{CrawlError, CrawlQueue, CrawlReport, CrawlResult, StopReason};
