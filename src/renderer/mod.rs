//! Page rendering seam
//!
//! The crawl core never talks to a browser directly. It asks a
//! [`PageRenderer`] for a page's visible text and raw link targets, and
//! handles the typed [`RenderError`] it gets back.

pub mod chrome;
pub mod js_scripts;
pub mod tab_guard;

use serde::{Deserialize, Serialize};
use std::future::Future;

pub use chrome::ChromeRenderer;

/// Visible text and raw anchor targets of a rendered page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedPage {
    /// Visible text, lines separated by `\n`
    pub text: String,
    /// `href` attributes as written, possibly relative or empty
    pub hrefs: Vec<String>,
}

impl RenderedPage {
    #[must_use]
    pub fn new(text: impl Into<String>, hrefs: Vec<String>) -> Self {
        Self {
            text: text.into(),
            hrefs,
        }
    }
}

/// Why a render did not produce a complete page
#[derive(Debug, Clone, thiserror::Error)]
pub enum RenderError {
    /// Navigation or page creation failed
    #[error("fetch failed: {reason}")]
    Fetch { reason: String },

    /// The page did not finish within the per-fetch timeout
    #[error("fetch timed out after {secs} seconds")]
    Timeout { secs: u64 },

    /// The page loaded but text or link extraction failed. `partial` holds
    /// whatever was recovered; missing parts are empty.
    #[error("extraction failed: {reason}")]
    Extraction {
        reason: String,
        partial: RenderedPage,
    },
}

/// Turns a URL into visible text plus outbound links.
///
/// Implementations own whatever session they need. The crawl engine shares
/// one renderer across page tasks, so `render` takes `&self`.
pub trait PageRenderer: Send + Sync {
    fn render(
        &self,
        url: &str,
    ) -> impl Future<Output = Result<RenderedPage, RenderError>> + Send;
}
