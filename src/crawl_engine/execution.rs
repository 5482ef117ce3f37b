//! Simple async crawling execution
//!
//! `crawl_impl` runs a crawl over any renderer and returns the report. It
//! uses `NoOpProgress` and the event bus attached to the config, if any.

use std::sync::Arc;

use crate::config::CrawlConfig;
use crate::renderer::PageRenderer;

use super::crawl_types::{CrawlReport, CrawlResult};
use super::orchestrator::crawl_pages;
use super::progress::NoOpProgress;

/// Thin wrapper around `crawl_pages` with no progress reporting.
///
/// The renderer's lifecycle stays with the caller.
pub async fn crawl_impl<R>(config: &CrawlConfig, renderer: Arc<R>) -> CrawlResult<CrawlReport>
where
    R: PageRenderer + 'static,
{
    let event_bus = config.event_bus().cloned();
    crawl_pages(config, renderer, NoOpProgress, event_bus).await
}
