//! Link processing: turning a page's raw hrefs into frontier entries

use log::trace;

use super::frontier::Frontier;
use crate::utils::url_utils::{in_scope, normalize_url, resolve_href};

/// What happened to the hrefs of one page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkStats {
    /// Raw hrefs returned by the renderer, including empty ones
    pub found: usize,
    /// Newly added to the frontier
    pub enqueued: usize,
    /// Empty, unparsable or non-http(s)
    pub invalid: usize,
    /// Host differs from the crawl domain
    pub out_of_scope: usize,
    /// Already visited or already queued
    pub duplicate: usize,
}

/// Resolve each href against `page_url` and enqueue the in-scope ones one
/// level deeper than the page.
pub fn process_page_links(
    frontier: &mut Frontier,
    page_url: &str,
    hrefs: &[String],
    page_depth: u32,
) -> LinkStats {
    let mut stats = LinkStats {
        found: hrefs.len(),
        ..LinkStats::default()
    };

    for href in hrefs {
        let href = href.trim();
        if href.is_empty() {
            stats.invalid += 1;
            continue;
        }

        let normalized = match resolve_href(page_url, href).and_then(|u| normalize_url(&u)) {
            Ok(url) => url,
            Err(e) => {
                trace!(target: "brandcheck::links", "Ignoring href on {page_url}: {e}");
                stats.invalid += 1;
                continue;
            }
        };

        if !in_scope(&normalized, frontier.domain()) {
            stats.out_of_scope += 1;
            continue;
        }

        if frontier.enqueue(&normalized, page_depth + 1) {
            stats.enqueued += 1;
        } else {
            stats.duplicate += 1;
        }
    }

    stats
}
