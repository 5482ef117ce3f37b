// Category CLI: Brand-consistency crawler
//
// Crawls one domain with a headless browser and writes every off-brand
// spelling it finds to a CSV file.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info, warn};

use kodegen_tools_brandcheck::crawl_events::CrawlEventBus;
use kodegen_tools_brandcheck::utils::constants::{
    DEFAULT_EVENT_BUS_CAPACITY, DEFAULT_FETCH_TIMEOUT_SECS, DEFAULT_FUZZY_THRESHOLD,
    DEFAULT_MAX_CONCURRENT_PAGES, DEFAULT_SETTLE_DELAY_MS,
};
use kodegen_tools_brandcheck::{
    CancelFlag, ChromiumoxideCrawler, CrawlEvent, csv_to_text, load_config_file,
    save_matches_csv, save_report_json,
};

#[derive(Debug, Parser)]
#[command(
    name = "kodegen-brandcheck",
    version,
    about = "Crawl a website and flag spellings of a name that deviate from the official one"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Crawl the site named in a configuration CSV and write the matches
    Crawl(CrawlArgs),
    /// Convert a match CSV into a plain text file
    ToText {
        #[arg(long, value_name = "FILE")]
        input: PathBuf,
        #[arg(long, value_name = "FILE")]
        output: PathBuf,
    },
}

#[derive(Debug, Args)]
struct CrawlArgs {
    /// Configuration CSV: `website, <url>` followed by official/detect/fuzzy/regex rows
    #[arg(short, long, value_name = "FILE")]
    config: PathBuf,

    #[arg(short, long, value_name = "FILE", default_value = "matches.csv")]
    output: PathBuf,

    /// Also write the full crawl report as JSON
    #[arg(long, value_name = "FILE")]
    json: Option<PathBuf>,

    /// Fuzzy similarity cutoff, 0-100 (inclusive)
    #[arg(long, value_name = "N", default_value_t = DEFAULT_FUZZY_THRESHOLD)]
    threshold: f64,

    #[arg(long, value_name = "N")]
    max_depth: Option<u32>,

    #[arg(long, value_name = "N")]
    max_pages: Option<usize>,

    #[arg(long, value_name = "SECS")]
    time_budget_secs: Option<u64>,

    #[arg(long, value_name = "SECS", default_value_t = DEFAULT_FETCH_TIMEOUT_SECS)]
    fetch_timeout_secs: u64,

    /// Pause after navigation before reading the page
    #[arg(long, value_name = "MS", default_value_t = DEFAULT_SETTLE_DELAY_MS)]
    settle_ms: u64,

    /// Minimum spacing between fetches
    #[arg(long, value_name = "MS", default_value_t = 0)]
    delay_ms: u64,

    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_CONCURRENT_PAGES)]
    concurrency: usize,

    /// Extra regex pattern, in addition to `regex` rows in the config file
    #[arg(long = "regex", value_name = "PATTERN")]
    regex: Vec<String>,

    #[arg(long, default_value_t = false)]
    case_sensitive_regex: bool,

    /// Show the browser window
    #[arg(long, default_value_t = false)]
    headed: bool,

    /// Chrome profile directory (default: a per-process temp directory)
    #[arg(long, value_name = "DIR")]
    chrome_data_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    match Cli::parse().command {
        Command::Crawl(args) => run_crawl(args).await,
        Command::ToText { input, output } => {
            let lines = csv_to_text(&input, &output)
                .with_context(|| format!("Failed to convert {}", input.display()))?;
            info!("Wrote {lines} line(s) to {}", output.display());
            Ok(())
        }
    }
}

async fn run_crawl(args: CrawlArgs) -> Result<()> {
    let file = load_config_file(&args.config)
        .with_context(|| format!("Failed to load {}", args.config.display()))?;

    let bus = Arc::new(CrawlEventBus::new(DEFAULT_EVENT_BUS_CAPACITY));
    let cancel = CancelFlag::new();

    let mut config = file
        .into_builder()
        .regex_patterns(args.regex)
        .regex_case_insensitive(!args.case_sensitive_regex)
        .fuzzy_threshold(args.threshold)
        .max_depth(args.max_depth)
        .limit(args.max_pages)
        .time_budget_secs(args.time_budget_secs)
        .fetch_timeout_secs(args.fetch_timeout_secs)
        .settle_delay_ms(args.settle_ms)
        .politeness_delay_ms(args.delay_ms)
        .max_concurrent_pages(args.concurrency)
        .headless(!args.headed)
        .build()
        .context("Invalid crawl configuration")?
        .with_event_bus(Arc::clone(&bus))
        .with_cancel_flag(cancel.clone());
    if let Some(dir) = args.chrome_data_dir {
        config = config.with_chrome_data_dir(dir);
    }

    if config.strings().is_empty() {
        warn!("No detect, fuzzy or regex strings configured; the crawl will report nothing");
    }

    let logger = tokio::spawn(log_events(Arc::clone(&bus)));

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received, finishing pages in flight");
            cancel.cancel();
        }
    });

    let report = ChromiumoxideCrawler::new(config).crawl().await?;

    if let Err(e) = logger.await {
        debug!("Event logger ended abnormally: {e}");
    }

    info!("Visited {} page(s):", report.visited_urls.len());
    for url in &report.visited_urls {
        info!("  {url}");
    }

    save_matches_csv(&args.output, &report.records)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    if let Some(json_path) = args.json {
        save_report_json(report, &json_path)
            .await
            .with_context(|| format!("Failed to write {}", json_path.display()))?;
    }

    Ok(())
}

/// Log crawl events until the bus shuts down
async fn log_events(bus: Arc<CrawlEventBus>) {
    let mut rx = bus.subscribe();
    // Hold only the receiver so the bus can drop when the crawl is done
    drop(bus);

    loop {
        match rx.recv().await {
            Ok(CrawlEvent::CrawlStarted { start_url, domain, .. }) => {
                info!("Crawling {start_url} (scoped to {domain})");
            }
            Ok(CrawlEvent::PageVisited { url, metadata, .. }) => {
                debug!(
                    "{url}: {} match(es), {}/{} link(s) queued in {:?}",
                    metadata.matches,
                    metadata.links_enqueued,
                    metadata.links_found,
                    metadata.processing_duration
                );
            }
            Ok(CrawlEvent::PageSkipped { url, reason, .. }) => warn!("Skipped {url}: {reason}"),
            Ok(CrawlEvent::BudgetExhausted { reason, .. }) => warn!("Crawl stopped early: {reason}"),
            Ok(CrawlEvent::CrawlCompleted { summary, .. }) => {
                info!(
                    "Done: {} visited, {} skipped, {} match(es)",
                    summary.pages_visited, summary.pages_skipped, summary.total_matches
                );
            }
            Ok(CrawlEvent::MatchFound { .. }) => {}
            Ok(CrawlEvent::Shutdown { .. }) | Err(RecvError::Closed) => break,
            Err(RecvError::Lagged(skipped)) => warn!("Event log fell behind, {skipped} event(s) missed"),
        }
    }
}
