//! Getter methods for `CrawlConfig`
//!
//! This module provides all the accessor methods for retrieving configuration
//! values from a `CrawlConfig` instance.

use regex::Regex;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use super::types::{CancelFlag, CrawlConfig};
use crate::crawl_engine::CrawlError;
use crate::crawl_events::CrawlEventBus;
use crate::matcher::{StringClassifier, StringSets};

impl CrawlConfig {
    #[must_use]
    pub fn start_url(&self) -> &str {
        &self.start_url
    }

    /// Host every visited page must share with the start URL
    #[must_use]
    pub fn domain(&self) -> &str {
        &self.domain
    }

    #[must_use]
    pub fn strings(&self) -> &StringSets {
        &self.strings
    }

    #[must_use]
    pub fn official(&self) -> &[String] {
        &self.strings.official
    }

    #[must_use]
    pub fn detect(&self) -> &[String] {
        &self.strings.detect
    }

    #[must_use]
    pub fn fuzzy(&self) -> &[String] {
        &self.strings.fuzzy
    }

    #[must_use]
    pub fn regex_patterns(&self) -> &[String] {
        &self.strings.regex_patterns
    }

    #[must_use]
    pub fn compiled_patterns(&self) -> &[Regex] {
        &self.compiled_patterns
    }

    #[must_use]
    pub fn regex_case_insensitive(&self) -> bool {
        self.regex_case_insensitive
    }

    #[must_use]
    pub fn fuzzy_threshold(&self) -> f64 {
        self.fuzzy_threshold
    }

    #[must_use]
    pub fn max_depth(&self) -> Option<u32> {
        self.max_depth
    }

    #[must_use]
    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    #[must_use]
    pub fn time_budget(&self) -> Option<Duration> {
        self.time_budget_secs.map(Duration::from_secs)
    }

    #[must_use]
    pub fn fetch_timeout_secs(&self) -> u64 {
        self.fetch_timeout_secs
    }

    #[must_use]
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    #[must_use]
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    #[must_use]
    pub fn politeness_delay(&self) -> Duration {
        Duration::from_millis(self.politeness_delay_ms)
    }

    #[must_use]
    pub fn max_concurrent_pages(&self) -> usize {
        self.max_concurrent_pages
    }

    #[must_use]
    pub fn headless(&self) -> bool {
        self.headless
    }

    #[must_use]
    pub fn chrome_data_dir(&self) -> Option<&PathBuf> {
        self.chrome_data_dir.as_ref()
    }

    #[must_use]
    pub fn event_bus(&self) -> Option<&Arc<CrawlEventBus>> {
        self.event_bus.as_ref()
    }

    #[must_use]
    pub fn cancel_flag(&self) -> Option<&CancelFlag> {
        self.cancel_flag.as_ref()
    }

    /// Build the classifier for this crawl from the already-compiled patterns.
    ///
    /// # Errors
    ///
    /// Fails only if a detect variant cannot be turned into a searcher.
    pub fn classifier(&self) -> Result<StringClassifier, CrawlError> {
        StringClassifier::new(self.strings.clone(), self.compiled_patterns.clone())
    }
}
