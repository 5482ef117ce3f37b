//! Test utilities shared by the integration tests

use kodegen_tools_brandcheck::{PageRenderer, RenderError, RenderedPage};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::Duration;
use tokio::time::Instant;

/// In-memory site standing in for the browser
///
/// Unknown URLs fail like an unreachable page.
#[derive(Debug, Default)]
pub struct StaticSiteRenderer {
    pages: HashMap<String, Result<RenderedPage, RenderError>>,
    delays: HashMap<String, Duration>,
    calls: Mutex<Vec<(String, Instant)>>,
}

#[allow(dead_code)]
impl StaticSiteRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A page with visible text and raw hrefs
    pub fn page(mut self, url: &str, text: &str, hrefs: &[&str]) -> Self {
        self.pages.insert(
            url.to_string(),
            Ok(RenderedPage::new(
                text,
                hrefs.iter().map(|h| h.to_string()).collect(),
            )),
        );
        self
    }

    /// A page whose fetch fails
    pub fn failing(mut self, url: &str) -> Self {
        self.pages.insert(
            url.to_string(),
            Err(RenderError::Fetch {
                reason: "connection refused".to_string(),
            }),
        );
        self
    }

    /// A page that loads but only partly extracts
    pub fn partial(mut self, url: &str, text: &str, hrefs: &[&str]) -> Self {
        self.pages.insert(
            url.to_string(),
            Err(RenderError::Extraction {
                reason: "links: script error".to_string(),
                partial: RenderedPage::new(text, hrefs.iter().map(|h| h.to_string()).collect()),
            }),
        );
        self
    }

    /// Delay the response for `url`
    pub fn slow(mut self, url: &str, delay: Duration) -> Self {
        self.delays.insert(url.to_string(), delay);
        self
    }

    /// URLs in the order they were rendered
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().iter().map(|(url, _)| url.clone()).collect()
    }

    /// When each render started, in call order
    pub fn call_times(&self) -> Vec<Instant> {
        self.calls.lock().iter().map(|(_, at)| *at).collect()
    }
}

impl PageRenderer for StaticSiteRenderer {
    async fn render(&self, url: &str) -> Result<RenderedPage, RenderError> {
        self.calls.lock().push((url.to_string(), Instant::now()));

        if let Some(delay) = self.delays.get(url) {
            tokio::time::sleep(*delay).await;
        }

        self.pages.get(url).cloned().unwrap_or_else(|| {
            Err(RenderError::Fetch {
                reason: format!("no such page: {url}"),
            })
        })
    }
}

/// Helper to turn string slices into owned strings
#[allow(dead_code)]
pub fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}
