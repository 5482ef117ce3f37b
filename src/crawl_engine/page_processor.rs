//! Single page processing
//!
//! Renders one dequeued URL under the fetch timeout and scans the result.
//! The outcome goes back to the orchestrator, which owns the frontier and
//! the record accumulator.

use log::{debug, info, warn};
use std::sync::Arc;
use std::time::{Duration, Instant};

use super::crawl_types::CrawlQueue;
use super::page_timeout::with_fetch_timeout;
use crate::matcher::{MatchEngine, MatchRecord};
use crate::renderer::{PageRenderer, RenderError, RenderedPage};

/// Settings every page task needs, cloned into each task
#[derive(Debug, Clone)]
pub struct PageProcessorContext {
    pub engine: MatchEngine,
    pub fetch_timeout: Duration,
}

/// What came of processing one page
#[derive(Debug, Clone)]
pub enum PageResult {
    /// Rendered (at least partly) and scanned
    Visited {
        records: Vec<MatchRecord>,
        hrefs: Vec<String>,
        text_len: usize,
        /// Extraction error, if only part of the page was recovered
        partial: Option<String>,
    },
    /// Fetch failed or timed out; the page contributes nothing
    Skipped { reason: String },
}

#[derive(Debug, Clone)]
pub struct PageOutcome {
    pub item: CrawlQueue,
    pub result: PageResult,
    pub elapsed: Duration,
}

/// Process a single page.
///
/// 1. Render under the fetch timeout
/// 2. On fetch failure or timeout, report the page as skipped
/// 3. On extraction failure, scan whatever was recovered
/// 4. Scan the text with the match engine
///
/// Spacing between fetches is the orchestrator's job, not this function's.
pub async fn process_single_page<R>(
    renderer: Arc<R>,
    item: CrawlQueue,
    ctx: PageProcessorContext,
) -> PageOutcome
where
    R: PageRenderer,
{
    let page_start = Instant::now();
    info!(target: "brandcheck::crawl", "Visiting [depth {}]: {}", item.depth, item.url);

    let rendered = with_fetch_timeout(renderer.render(&item.url), ctx.fetch_timeout).await;

    let (page, partial) = match rendered {
        Ok(page) => (page, None),
        Err(RenderError::Extraction { reason, partial }) => {
            warn!(
                target: "brandcheck::crawl",
                "Partial extraction on {}: {reason}",
                item.url
            );
            (partial, Some(reason))
        }
        Err(e) => {
            warn!(target: "brandcheck::crawl", "Skipping {}: {e}", item.url);
            return PageOutcome {
                item,
                result: PageResult::Skipped {
                    reason: e.to_string(),
                },
                elapsed: page_start.elapsed(),
            };
        }
    };

    let RenderedPage { text, hrefs } = page;
    let records = ctx.engine.scan(&text, &item.url);
    debug!(
        target: "brandcheck::crawl",
        "Scanned {} ({} chars): {} match(es), {} link(s)",
        item.url,
        text.len(),
        records.len(),
        hrefs.len()
    );

    PageOutcome {
        item,
        result: PageResult::Visited {
            records,
            hrefs,
            text_len: text.len(),
            partial,
        },
        elapsed: page_start.elapsed(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::{MatchKind, StringClassifier, StringSets};

    struct OneShot(Result<RenderedPage, RenderError>);

    impl PageRenderer for OneShot {
        async fn render(&self, _url: &str) -> Result<RenderedPage, RenderError> {
            self.0.clone()
        }
    }

    fn ctx() -> PageProcessorContext {
        let sets = StringSets {
            detect: vec!["Acme Inc".to_string()],
            ..StringSets::default()
        };
        let classifier = StringClassifier::from_sets(sets, true).unwrap();
        PageProcessorContext {
            engine: MatchEngine::new(Arc::new(classifier), 85.0),
            fetch_timeout: Duration::from_secs(5),
        }
    }

    fn item() -> CrawlQueue {
        CrawlQueue {
            url: "https://acme.test/".to_string(),
            depth: 0,
        }
    }

    #[tokio::test]
    async fn fetch_failure_is_skipped_with_render_reason() {
        let renderer = Arc::new(OneShot(Err(RenderError::Fetch {
            reason: "connection refused".to_string(),
        })));

        let outcome = process_single_page(renderer, item(), ctx()).await;

        match outcome.result {
            PageResult::Skipped { reason } => {
                assert_eq!(reason, "fetch failed: connection refused");
            }
            other => panic!("expected skip, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn partial_extraction_is_scanned() {
        let renderer = Arc::new(OneShot(Err(RenderError::Extraction {
            reason: "links: script error".to_string(),
            partial: RenderedPage::new("Welcome to Acme Inc", Vec::new()),
        })));

        let outcome = process_single_page(renderer, item(), ctx()).await;

        match outcome.result {
            PageResult::Visited { records, partial, .. } => {
                assert_eq!(partial.as_deref(), Some("links: script error"));
                assert_eq!(records.len(), 1);
                assert_eq!(records[0].kind, MatchKind::Detect);
            }
            other => panic!("expected visit, got {other:?}"),
        }
    }
}
