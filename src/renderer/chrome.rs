//! Chromium-backed page renderer
//!
//! One browser session per crawl. Each render opens a fresh tab, navigates,
//! waits for the document to settle, reads visible text and anchor targets,
//! and closes the tab again.

use chromiumoxide::Page;
use chromiumoxide::browser::Browser;
use futures::future::BoxFuture;
use log::{debug, warn};
use serde::de::DeserializeOwned;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;

use super::js_scripts::{LINKS_SCRIPT, READY_STATE_SCRIPT, VISIBLE_TEXT_SCRIPT};
use super::tab_guard::TabGuard;
use super::{PageRenderer, RenderError, RenderedPage};
use crate::browser_setup::launch_browser;
use crate::config::CrawlConfig;
use crate::crawl_engine::CrawlError;
use crate::crawl_engine::cleanup::{CleanupResult, cleanup_browser_and_data};

/// Upper bound on polling `document.readyState` before reading content
const READY_STATE_MAX_WAIT: Duration = Duration::from_secs(10);
const READY_STATE_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Renderer driving a headless (or headed) Chrome over CDP
pub struct ChromeRenderer {
    browser: Option<Browser>,
    handler_task: Option<JoinHandle<()>>,
    data_dir: Option<PathBuf>,
    settle_delay: Duration,
}

impl ChromeRenderer {
    /// Launch the browser session for a crawl.
    ///
    /// # Errors
    ///
    /// Returns `CrawlError::Browser` when no browser can be found,
    /// downloaded or started.
    pub async fn launch(config: &CrawlConfig) -> Result<Self, CrawlError> {
        let (browser, handler_task, data_dir) =
            launch_browser(config.headless(), config.chrome_data_dir().cloned())
                .await
                .map_err(|e| CrawlError::Browser(format!("{e:#}")))?;

        Ok(Self {
            browser: Some(browser),
            handler_task: Some(handler_task),
            data_dir: Some(data_dir),
            settle_delay: config.settle_delay(),
        })
    }

    /// Close the browser, remove its profile directory and stop the CDP
    /// handler. Safe to call on every exit path; failures are reported, not
    /// raised.
    pub async fn shutdown(mut self) -> CleanupResult {
        let result = match (self.browser.take(), self.data_dir.take()) {
            (Some(browser), Some(data_dir)) => cleanup_browser_and_data(browser, data_dir).await,
            _ => CleanupResult::Success,
        };

        if let Some(handler_task) = self.handler_task.take() {
            debug!(target: "brandcheck::cleanup", "Aborting browser handler task");
            handler_task.abort();
            if let Err(e) = handler_task.await
                && !e.is_cancelled()
            {
                warn!(target: "brandcheck::cleanup", "Handler task failed during abort: {e}");
            }
        }

        result
    }

    async fn render_in(&self, page: &Page, url: &str) -> Result<RenderedPage, RenderError> {
        page.goto(url).await.map_err(|e| RenderError::Fetch {
            reason: format!("navigation failed: {e}"),
        })?;
        page.wait_for_navigation()
            .await
            .map_err(|e| RenderError::Fetch {
                reason: format!("page load failed: {e}"),
            })?;

        wait_until_settled(page, self.settle_delay).await;

        let text = evaluate::<String>(page, VISIBLE_TEXT_SCRIPT).await;
        let hrefs = evaluate::<Vec<String>>(page, LINKS_SCRIPT).await;

        match (text, hrefs) {
            (Ok(text), Ok(hrefs)) => Ok(RenderedPage { text, hrefs }),
            (text, hrefs) => {
                let mut reasons = Vec::new();
                if let Err(e) = &text {
                    reasons.push(format!("text: {e}"));
                }
                if let Err(e) = &hrefs {
                    reasons.push(format!("links: {e}"));
                }
                Err(RenderError::Extraction {
                    reason: reasons.join("; "),
                    partial: RenderedPage {
                        text: text.unwrap_or_default(),
                        hrefs: hrefs.unwrap_or_default(),
                    },
                })
            }
        }
    }
}

impl PageRenderer for ChromeRenderer {
    async fn render(&self, url: &str) -> Result<RenderedPage, RenderError> {
        let browser = self.browser.as_ref().ok_or_else(|| RenderError::Fetch {
            reason: "browser session already closed".to_string(),
        })?;

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| RenderError::Fetch {
                reason: format!("failed to open tab: {e}"),
            })?;

        // Closes the tab even if the fetch deadline drops this future
        let tab = TabGuard::new(page.clone(), close_tab);
        let result = self.render_in(&page, url).await;
        tab.close().await;

        result
    }
}

fn close_tab(page: Page) -> BoxFuture<'static, ()> {
    Box::pin(async move {
        if let Err(e) = page.close().await {
            debug!(target: "brandcheck::render", "Failed to close tab: {e}");
        }
    })
}

impl Drop for ChromeRenderer {
    fn drop(&mut self) {
        if let Some(handler_task) = self.handler_task.take() {
            handler_task.abort();
        }
        if let Some(data_dir) = self.data_dir.take() {
            let _ = std::fs::remove_dir_all(data_dir);
        }
    }
}

async fn evaluate<T: DeserializeOwned>(page: &Page, script: &str) -> Result<T, String> {
    page.evaluate(script)
        .await
        .map_err(|e| e.to_string())?
        .into_value::<T>()
        .map_err(|e| e.to_string())
}

/// Poll until `document.readyState` is complete, then hold for `settle_delay`
/// so client-side rendering can finish.
async fn wait_until_settled(page: &Page, settle_delay: Duration) {
    let start = Instant::now();

    while start.elapsed() < READY_STATE_MAX_WAIT {
        match evaluate::<serde_json::Value>(page, READY_STATE_SCRIPT).await {
            Ok(state) => {
                let complete = state.get("readyState").and_then(|v| v.as_str()) == Some("complete");
                let has_body = state
                    .get("bodyExists")
                    .and_then(serde_json::Value::as_bool)
                    .unwrap_or(false);
                if complete && has_body {
                    break;
                }
            }
            Err(e) => debug!(target: "brandcheck::render", "readyState check failed: {e}"),
        }
        tokio::time::sleep(READY_STATE_POLL_INTERVAL).await;
    }

    if !settle_delay.is_zero() {
        tokio::time::sleep(settle_delay).await;
    }
}
