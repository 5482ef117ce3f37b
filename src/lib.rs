pub mod browser_setup;
pub mod config;
pub mod crawl_engine;
pub mod crawl_events;
pub mod matcher;
pub mod renderer;
pub mod report;
pub mod utils;

pub use browser_setup::{download_managed_browser, find_browser_executable, launch_browser};
pub use config::{CancelFlag, ConfigFile, CrawlConfig, RowKind, load_config_file, parse_config};
pub use crawl_engine::{
    ChromiumoxideCrawler, CrawlError, CrawlQueue, CrawlReport, CrawlResult, Frontier,
    NoOpProgress, ProgressReporter, StopReason, crawl_impl, crawl_pages,
};
pub use crawl_events::{CrawlEvent, CrawlEventBus};
pub use matcher::{MatchEngine, MatchKind, MatchRecord, StringClassifier, StringSets, scan};
pub use renderer::{ChromeRenderer, PageRenderer, RenderError, RenderedPage};
pub use report::{csv_to_text, save_matches_csv, save_report_json, write_matches_csv};
pub use utils::{in_scope, normalize_url};

/// Crawl with a Chrome renderer and return the report.
pub async fn crawl(config: CrawlConfig) -> Result<CrawlReport, CrawlError> {
    let crawler = ChromiumoxideCrawler::new(config);
    crawler.crawl().await
}
