//! Main crawl orchestration logic
//!
//! Coordinates a domain-scoped breadth-first crawl:
//! - Frontier ownership and at-most-once dispatch
//! - A bounded pool of concurrent page tasks
//! - Page limit, time budget and cancellation checks
//! - Record collection and link expansion
//! - Event publishing

use futures::StreamExt;
use futures::stream::FuturesUnordered;
use log::{debug, error, info};
use std::sync::Arc;
use tokio::time::Instant;

use super::crawl_types::{CrawlReport, CrawlResult, StopReason};
use super::frontier::Frontier;
use super::link_processor::process_page_links;
use super::page_processor::{PageOutcome, PageProcessorContext, PageResult, process_single_page};
use super::progress::ProgressReporter;
use crate::config::CrawlConfig;
use crate::crawl_events::{
    CrawlEventBus,
    types::{CrawlEvent, CrawlSummary, PageVisitMetadata, ShutdownReason},
};
use crate::matcher::{MatchEngine, MatchRecord};
use crate::renderer::PageRenderer;

/// Running totals owned by the orchestrator loop
#[derive(Debug, Default)]
struct Accumulator {
    records: Vec<MatchRecord>,
    visited_urls: Vec<String>,
    pages_visited: usize,
    pages_skipped: usize,
}

/// Main crawl orchestration with event bus integration
///
/// Seeds the frontier with the start URL and keeps up to
/// `max_concurrent_pages` page tasks running. The loop is the only place
/// the frontier is touched, so dequeue-and-mark-visited is atomic and no
/// URL is dispatched twice. Records from every finished page are kept, also
/// when a budget or cancellation stops the crawl early.
///
/// # Arguments
/// * `config` - Crawl configuration
/// * `renderer` - Page renderer shared by all page tasks
/// * `progress` - Progress reporter (`NoOpProgress` for none)
/// * `event_bus` - Optional event bus for crawl events
///
/// # Errors
///
/// Only configuration problems discovered before the first fetch; once
/// pages are being dispatched the crawl always yields a report.
pub async fn crawl_pages<R, P>(
    config: &CrawlConfig,
    renderer: Arc<R>,
    progress: P,
    event_bus: Option<Arc<CrawlEventBus>>,
) -> CrawlResult<CrawlReport>
where
    R: PageRenderer + 'static,
    P: ProgressReporter,
{
    let start_time = Instant::now();

    let prepared = config.classifier().and_then(|classifier| {
        let mut frontier = Frontier::new(config.domain(), config.max_depth());
        frontier.seed(config.start_url())?;
        Ok((classifier, frontier))
    });
    let (classifier, mut frontier) = match prepared {
        Ok(prepared) => prepared,
        Err(e) => {
            error!(target: "brandcheck::crawl", "Crawl cannot start: {e}");
            progress.report_error(&e.to_string());
            if let Some(bus) = &event_bus {
                bus.shutdown_gracefully(ShutdownReason::Error(e.to_string()))
                    .await;
            }
            return Err(e);
        }
    };

    let ctx = PageProcessorContext {
        engine: MatchEngine::new(Arc::new(classifier), config.fuzzy_threshold()),
        fetch_timeout: config.fetch_timeout(),
    };

    info!(
        target: "brandcheck::crawl",
        "Starting crawl of {} (domain {}, max depth {:?}, {} concurrent)",
        config.start_url(),
        config.domain(),
        config.max_depth(),
        config.max_concurrent_pages()
    );
    publish(
        event_bus.as_deref(),
        CrawlEvent::crawl_started(
            config.start_url().to_string(),
            config.domain().to_string(),
            config.max_depth(),
        ),
    );

    let concurrency = config.max_concurrent_pages();
    let politeness_delay = config.politeness_delay();
    let mut acc = Accumulator::default();
    let mut stop_reason: Option<StopReason> = None;
    let mut active_tasks = FuturesUnordered::new();
    let mut last_dispatch: Option<Instant> = None;

    loop {
        // Fill up to the concurrency limit
        while stop_reason.is_none()
            && active_tasks.len() < concurrency
            && !frontier.is_exhausted()
        {
            // Politeness spaces dispatches, not tasks, so concurrent pages
            // still start one delay apart. The first fetch is not delayed.
            if let Some(last) = last_dispatch
                && !politeness_delay.is_zero()
            {
                tokio::time::sleep_until(last + politeness_delay).await;
            }

            if let Some(reason) = check_stop(config, acc.visited_urls.len(), start_time) {
                info!(target: "brandcheck::crawl", "Stopping dispatch: {reason}");
                publish(event_bus.as_deref(), CrawlEvent::budget_exhausted(reason));
                stop_reason = Some(reason);
                break;
            }

            let Some(item) = frontier.dequeue() else {
                break;
            };
            acc.visited_urls.push(item.url.clone());
            last_dispatch = Some(Instant::now());

            let url = item.url.clone();
            let depth = item.depth;
            let handle = tokio::spawn(process_single_page(
                Arc::clone(&renderer),
                item,
                ctx.clone(),
            ));
            active_tasks.push(async move { (url, depth, handle.await) });
        }

        // Wait for at least one task to complete
        match active_tasks.next().await {
            Some((_, _, Ok(outcome))) => {
                collect_outcome(outcome, &mut frontier, &mut acc, &progress, event_bus.as_deref());
            }
            Some((url, depth, Err(e))) => {
                error!(target: "brandcheck::crawl", "Page task for {url} failed: {e}");
                acc.pages_skipped += 1;
                progress.report_page_skipped(&url, &e.to_string());
                publish(
                    event_bus.as_deref(),
                    CrawlEvent::page_skipped(url, depth, format!("page task failed: {e}")),
                );
            }
            None => break,
        }

        if stop_reason.is_some() && active_tasks.is_empty() {
            break;
        }
    }

    let stop_reason = stop_reason.unwrap_or(StopReason::FrontierExhausted);
    let report = CrawlReport {
        start_url: config.start_url().to_string(),
        domain: config.domain().to_string(),
        records: acc.records,
        visited_urls: acc.visited_urls,
        pages_visited: acc.pages_visited,
        pages_skipped: acc.pages_skipped,
        stop_reason,
        duration: start_time.elapsed(),
    };

    info!(
        target: "brandcheck::crawl",
        "Crawl finished ({stop_reason}): {} page(s) visited, {} skipped, {} match(es) in {:.1}s",
        report.pages_visited,
        report.pages_skipped,
        report.records.len(),
        report.duration.as_secs_f64()
    );

    if let Some(bus) = &event_bus {
        publish(
            Some(bus.as_ref()),
            CrawlEvent::crawl_completed(CrawlSummary {
                pages_visited: report.pages_visited,
                pages_skipped: report.pages_skipped,
                total_matches: report.records.len(),
                stop_reason,
                duration: report.duration,
            }),
        );

        let metrics = bus.metrics().snapshot();
        debug!(target: "brandcheck::events", "Event bus metrics: {metrics}");

        let reason = if stop_reason == StopReason::Cancelled {
            ShutdownReason::Cancelled
        } else {
            ShutdownReason::CrawlCompleted
        };
        bus.shutdown_gracefully(reason).await;
    }

    progress.report_completed(&report);
    Ok(report)
}

/// Stop conditions, checked before each dispatch. Cancellation wins over
/// budgets so a user interrupt is reported as such.
fn check_stop(config: &CrawlConfig, dispatched: usize, start_time: Instant) -> Option<StopReason> {
    if config.cancel_flag().is_some_and(|flag| flag.is_cancelled()) {
        return Some(StopReason::Cancelled);
    }
    if config.limit().is_some_and(|limit| dispatched >= limit) {
        return Some(StopReason::PageLimit);
    }
    if config
        .time_budget()
        .is_some_and(|budget| start_time.elapsed() >= budget)
    {
        return Some(StopReason::TimeBudget);
    }
    None
}

/// Fold one finished page into the crawl state
fn collect_outcome<P: ProgressReporter>(
    outcome: PageOutcome,
    frontier: &mut Frontier,
    acc: &mut Accumulator,
    progress: &P,
    event_bus: Option<&CrawlEventBus>,
) {
    let PageOutcome {
        item,
        result,
        elapsed,
    } = outcome;

    match result {
        PageResult::Visited {
            records,
            hrefs,
            text_len,
            partial,
        } => {
            let links = process_page_links(frontier, &item.url, &hrefs, item.depth);
            debug!(
                target: "brandcheck::crawl",
                "{}: {} link(s), {} new, {} off-domain",
                item.url,
                links.found,
                links.enqueued,
                links.out_of_scope
            );

            for record in &records {
                info!(
                    target: "brandcheck::matches",
                    "{} on {}: '{}'",
                    record.match_type_label(),
                    record.source_url,
                    record.matched_text
                );
                publish(event_bus, CrawlEvent::match_found(record.clone()));
            }

            acc.pages_visited += 1;
            progress.report_page_visited(&item.url, records.len());
            publish(
                event_bus,
                CrawlEvent::page_visited(
                    item.url,
                    item.depth,
                    PageVisitMetadata {
                        text_len,
                        matches: records.len(),
                        links_found: links.found,
                        links_enqueued: links.enqueued,
                        partial: partial.is_some(),
                        processing_duration: elapsed,
                    },
                ),
            );
            acc.records.extend(records);
        }
        PageResult::Skipped { reason } => {
            acc.pages_skipped += 1;
            progress.report_page_skipped(&item.url, &reason);
            publish(
                event_bus,
                CrawlEvent::page_skipped(item.url, item.depth, reason),
            );
        }
    }
}

/// Publish without letting the bus affect the crawl. No subscribers is the
/// normal case for library callers.
fn publish(event_bus: Option<&CrawlEventBus>, event: CrawlEvent) {
    if let Some(bus) = event_bus
        && let Err(e) = bus.publish(event)
    {
        log::trace!(target: "brandcheck::events", "Event not delivered: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stop_checks_follow_priority() {
        let flag = crate::config::CancelFlag::new();
        let config = CrawlConfig::builder()
            .start_url("https://example.org/")
            .limit(Some(2))
            .build()
            .unwrap()
            .with_cancel_flag(flag.clone());

        let start = Instant::now();
        assert_eq!(check_stop(&config, 1, start), None);
        assert_eq!(check_stop(&config, 2, start), Some(StopReason::PageLimit));

        flag.cancel();
        assert_eq!(check_stop(&config, 2, start), Some(StopReason::Cancelled));
    }
}
