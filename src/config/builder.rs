//! Type-safe builder for `CrawlConfig` using the typestate pattern
//!
//! `build()` only exists once a start URL has been supplied, so a config
//! without one cannot be constructed.

use std::marker::PhantomData;
use url::Url;

use super::types::CrawlConfig;
use crate::crawl_engine::CrawlError;
use crate::matcher::StringSets;
use crate::matcher::classifier::compile_patterns;
use crate::utils::{
    DEFAULT_FETCH_TIMEOUT_SECS, DEFAULT_FUZZY_THRESHOLD, DEFAULT_MAX_CONCURRENT_PAGES,
    DEFAULT_SETTLE_DELAY_MS, MAX_CONCURRENT_PAGES_LIMIT,
};

// Type state for the builder
pub struct WithStartUrl;

/// Settings that can be supplied in any builder state
#[derive(Debug, Clone)]
struct Settings {
    strings: StringSets,
    regex_case_insensitive: bool,
    fuzzy_threshold: f64,
    max_depth: Option<u32>,
    limit: Option<usize>,
    time_budget_secs: Option<u64>,
    fetch_timeout_secs: u64,
    settle_delay_ms: u64,
    politeness_delay_ms: u64,
    max_concurrent_pages: usize,
    headless: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            strings: StringSets::default(),
            regex_case_insensitive: true,
            fuzzy_threshold: DEFAULT_FUZZY_THRESHOLD,
            max_depth: None,
            limit: None,
            time_budget_secs: None,
            fetch_timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
            settle_delay_ms: DEFAULT_SETTLE_DELAY_MS,
            politeness_delay_ms: 0,
            max_concurrent_pages: DEFAULT_MAX_CONCURRENT_PAGES,
            headless: true,
        }
    }
}

pub struct CrawlConfigBuilder<State = ()> {
    start_url: Option<String>,
    settings: Settings,
    _phantom: PhantomData<State>,
}

impl Default for CrawlConfigBuilder<()> {
    fn default() -> Self {
        Self {
            start_url: None,
            settings: Settings::default(),
            _phantom: PhantomData,
        }
    }
}

impl CrawlConfig {
    /// Create a builder for configuring a `CrawlConfig` with a fluent interface
    #[must_use]
    pub fn builder() -> CrawlConfigBuilder<()> {
        CrawlConfigBuilder::default()
    }
}

impl CrawlConfigBuilder<()> {
    /// Set the crawl's starting URL. `https://` is assumed when no scheme is
    /// given; the URL is parsed and checked in `build()`.
    pub fn start_url(self, url: impl Into<String>) -> CrawlConfigBuilder<WithStartUrl> {
        CrawlConfigBuilder {
            start_url: Some(url.into().trim().to_string()),
            settings: self.settings,
            _phantom: PhantomData,
        }
    }
}

// Build method only available when the start URL is set
impl CrawlConfigBuilder<WithStartUrl> {
    /// Validate and freeze the configuration.
    ///
    /// # Errors
    ///
    /// `CrawlError::Config` when the start URL is not http(s) or has no
    /// host, the threshold is
    /// outside 0-100, the concurrency is out of range, or a regex pattern
    /// fails to compile.
    pub fn build(self) -> Result<CrawlConfig, CrawlError> {
        let start_url = self
            .start_url
            .ok_or_else(|| CrawlError::Config("start_url is required".to_string()))?;

        let parsed = parse_start_url(&start_url)?;
        let domain = parsed
            .host_str()
            .filter(|h| !h.is_empty())
            .ok_or_else(|| CrawlError::Config(format!("Start URL '{start_url}' has no host")))?
            .to_string();

        let settings = self.settings;

        if !(0.0..=100.0).contains(&settings.fuzzy_threshold) {
            return Err(CrawlError::Config(format!(
                "fuzzy_threshold must be within 0-100, got {}",
                settings.fuzzy_threshold
            )));
        }

        if !(1..=MAX_CONCURRENT_PAGES_LIMIT).contains(&settings.max_concurrent_pages) {
            return Err(CrawlError::Config(format!(
                "max_concurrent_pages must be within 1-{MAX_CONCURRENT_PAGES_LIMIT}, got {}",
                settings.max_concurrent_pages
            )));
        }

        if settings.fetch_timeout_secs == 0 {
            return Err(CrawlError::Config(
                "fetch_timeout_secs must be at least 1".to_string(),
            ));
        }

        // Compile patterns once at config creation
        let strings = settings.strings.cleaned();
        let compiled_patterns =
            compile_patterns(&strings.regex_patterns, settings.regex_case_insensitive)?;

        Ok(CrawlConfig {
            start_url: parsed.into(),
            domain,
            strings,
            compiled_patterns,
            regex_case_insensitive: settings.regex_case_insensitive,
            fuzzy_threshold: settings.fuzzy_threshold,
            max_depth: settings.max_depth,
            limit: settings.limit,
            time_budget_secs: settings.time_budget_secs,
            fetch_timeout_secs: settings.fetch_timeout_secs,
            settle_delay_ms: settings.settle_delay_ms,
            politeness_delay_ms: settings.politeness_delay_ms,
            max_concurrent_pages: settings.max_concurrent_pages,
            headless: settings.headless,
            chrome_data_dir: None,
            event_bus: None,
            cancel_flag: None,
        })
    }
}

/// Parse a start URL, assuming `https://` only when no scheme was written.
/// Scheme matching is case-insensitive; anything but http(s) is rejected.
fn parse_start_url(raw: &str) -> Result<Url, CrawlError> {
    let invalid = |reason: String| CrawlError::Config(format!("Invalid start URL '{raw}': {reason}"));

    let parsed = if raw.contains("://") {
        Url::parse(raw)
    } else {
        Url::parse(&format!("https://{raw}"))
    }
    .map_err(|e| invalid(e.to_string()))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", parsed.scheme())));
    }
    Ok(parsed)
}

// Builder methods available at any state
impl<State> CrawlConfigBuilder<State> {
    /// Replace all string sets at once
    #[must_use]
    pub fn strings(mut self, strings: StringSets) -> Self {
        self.settings.strings = strings;
        self
    }

    #[must_use]
    pub fn official<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.settings.strings.official.extend(values.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn detect<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.settings.strings.detect.extend(values.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn fuzzy<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.settings.strings.fuzzy.extend(values.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn regex_patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.settings
            .strings
            .regex_patterns
            .extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Compile regex patterns case-insensitively (default: true)
    #[must_use]
    pub fn regex_case_insensitive(mut self, enabled: bool) -> Self {
        self.settings.regex_case_insensitive = enabled;
        self
    }

    #[must_use]
    pub fn fuzzy_threshold(mut self, threshold: f64) -> Self {
        self.settings.fuzzy_threshold = threshold;
        self
    }

    #[must_use]
    pub fn max_depth(mut self, depth: Option<u32>) -> Self {
        self.settings.max_depth = depth;
        self
    }

    /// Maximum number of pages to fetch
    #[must_use]
    pub fn limit(mut self, limit: Option<usize>) -> Self {
        self.settings.limit = limit;
        self
    }

    #[must_use]
    pub fn time_budget_secs(mut self, secs: Option<u64>) -> Self {
        self.settings.time_budget_secs = secs;
        self
    }

    #[must_use]
    pub fn fetch_timeout_secs(mut self, secs: u64) -> Self {
        self.settings.fetch_timeout_secs = secs;
        self
    }

    #[must_use]
    pub fn settle_delay_ms(mut self, ms: u64) -> Self {
        self.settings.settle_delay_ms = ms;
        self
    }

    #[must_use]
    pub fn politeness_delay_ms(mut self, ms: u64) -> Self {
        self.settings.politeness_delay_ms = ms;
        self
    }

    #[must_use]
    pub fn max_concurrent_pages(mut self, pages: usize) -> Self {
        self.settings.max_concurrent_pages = pages;
        self
    }

    #[must_use]
    pub fn headless(mut self, headless: bool) -> Self {
        self.settings.headless = headless;
        self
    }
}
