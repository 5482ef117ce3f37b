//! Browser-backed crawler
//!
//! Owns the Chrome session for exactly one crawl: launched at the start,
//! released at the end whatever the outcome.

use log::{debug, warn};
use std::sync::Arc;

use super::cleanup::CleanupResult;
use super::crawl_types::{CrawlReport, CrawlResult};
use super::orchestrator::crawl_pages;
use super::progress::{NoOpProgress, ProgressReporter};
use crate::config::CrawlConfig;
use crate::renderer::ChromeRenderer;

pub struct ChromiumoxideCrawler {
    config: CrawlConfig,
}

impl ChromiumoxideCrawler {
    #[must_use]
    pub fn new(config: CrawlConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &CrawlConfig {
        &self.config
    }

    /// Launch Chrome, crawl, and shut Chrome down again.
    ///
    /// # Errors
    ///
    /// `CrawlError::Browser` if Chrome cannot be started, or a configuration
    /// error from the orchestrator. Page-level failures never surface here.
    pub async fn crawl(&self) -> CrawlResult<CrawlReport> {
        self.crawl_with_progress(NoOpProgress).await
    }

    pub async fn crawl_with_progress<P: ProgressReporter>(
        &self,
        progress: P,
    ) -> CrawlResult<CrawlReport> {
        progress.report_initializing();

        let renderer = match ChromeRenderer::launch(&self.config).await {
            Ok(renderer) => Arc::new(renderer),
            Err(e) => {
                progress.report_error(&e.to_string());
                return Err(e);
            }
        };
        progress.report_renderer_ready();

        let event_bus = self.config.event_bus().cloned();
        let result = crawl_pages(&self.config, Arc::clone(&renderer), &progress, event_bus).await;

        progress.report_cleanup_started();
        // Every page task has finished, so this is the last reference
        match Arc::try_unwrap(renderer) {
            Ok(renderer) => match renderer.shutdown().await {
                CleanupResult::Success => debug!(target: "brandcheck::cleanup", "Browser released"),
                CleanupResult::PartialFailure(errors) => {
                    warn!(target: "brandcheck::cleanup", "Browser cleanup incomplete: {errors:?}");
                    for error in &errors {
                        progress.report_error(&format!("Cleanup error: {error}"));
                    }
                }
            },
            Err(arc) => warn!(
                target: "brandcheck::cleanup",
                "Renderer still has {} references, cleanup will happen on drop",
                Arc::strong_count(&arc)
            ),
        }

        result
    }
}
