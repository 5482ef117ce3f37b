//! Progress reporting abstraction for crawl operations
//!
//! Defines the `ProgressReporter` trait for lifecycle callbacks and a no-op
//! implementation for callers that only want the final report.

use super::crawl_types::CrawlReport;

/// Trait for reporting crawl progress at key lifecycle points
///
/// Implementations can forward to channels, log, drive a progress bar, etc.
/// The same crawl core serves both plain and progress-reporting callers.
pub trait ProgressReporter: Send + Sync {
    /// Renderer startup has begun
    fn report_initializing(&self);

    /// The renderer is ready to take URLs
    fn report_renderer_ready(&self);

    /// A page was rendered and scanned
    fn report_page_visited(&self, url: &str, matches: usize);

    /// A page failed to load and was skipped
    fn report_page_skipped(&self, url: &str, reason: &str);

    /// Renderer teardown has begun
    fn report_cleanup_started(&self);

    /// The crawl finished, possibly early
    fn report_completed(&self, report: &CrawlReport);

    /// The crawl could not run
    fn report_error(&self, error: &str);
}

/// Progress reporter that does nothing
///
/// All methods are no-ops and are inlined away.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpProgress;

impl ProgressReporter for NoOpProgress {
    #[inline(always)]
    fn report_initializing(&self) {}

    #[inline(always)]
    fn report_renderer_ready(&self) {}

    #[inline(always)]
    fn report_page_visited(&self, _url: &str, _matches: usize) {}

    #[inline(always)]
    fn report_page_skipped(&self, _url: &str, _reason: &str) {}

    #[inline(always)]
    fn report_cleanup_started(&self) {}

    #[inline(always)]
    fn report_completed(&self, _report: &CrawlReport) {}

    #[inline(always)]
    fn report_error(&self, _error: &str) {}
}

impl<P: ProgressReporter + ?Sized> ProgressReporter for &P {
    fn report_initializing(&self) {
        (**self).report_initializing();
    }

    fn report_renderer_ready(&self) {
        (**self).report_renderer_ready();
    }

    fn report_page_visited(&self, url: &str, matches: usize) {
        (**self).report_page_visited(url, matches);
    }

    fn report_page_skipped(&self, url: &str, reason: &str) {
        (**self).report_page_skipped(url, reason);
    }

    fn report_cleanup_started(&self) {
        (**self).report_cleanup_started();
    }

    fn report_completed(&self, report: &CrawlReport) {
        (**self).report_completed(report);
    }

    fn report_error(&self, error: &str) {
        (**self).report_error(error);
    }
}
