//! Breadth-first crawl frontier
//!
//! FIFO queue of pending URLs plus the visited set. A URL is queued at most
//! once while unvisited, and once dequeued it is marked visited before the
//! page is fetched, so a failed fetch is never retried.

use log::{debug, trace};
use std::collections::{HashSet, VecDeque};

use super::crawl_types::{CrawlError, CrawlQueue};
use crate::utils::{in_scope, normalize_url};

/// Crawl frontier scoped to a single host
#[derive(Debug)]
pub struct Frontier {
    domain: String,
    max_depth: Option<u32>,
    queue: VecDeque<CrawlQueue>,
    queued: HashSet<String>,
    visited: HashSet<String>,
}

impl Frontier {
    #[must_use]
    pub fn new(domain: impl Into<String>, max_depth: Option<u32>) -> Self {
        Self {
            domain: domain.into(),
            max_depth,
            queue: VecDeque::new(),
            queued: HashSet::new(),
            visited: HashSet::new(),
        }
    }

    /// The host every queued URL must belong to
    #[must_use]
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Seed the frontier with the crawl's starting URL at depth 0
    ///
    /// # Errors
    ///
    /// Returns `InvalidUrl` if the URL does not normalize, and `Config` if
    /// its host is not the frontier's domain.
    pub fn seed(&mut self, url: &str) -> Result<(), CrawlError> {
        let normalized = normalize_url(url)?;
        if !self.enqueue(&normalized, 0) {
            return Err(CrawlError::Config(format!(
                "start URL {normalized} is outside domain {}",
                self.domain
            )));
        }
        Ok(())
    }

    /// Queue a URL for a later visit.
    ///
    /// The URL is normalized here. Returns whether it was actually added:
    /// false when it is invalid, out of scope, already visited or already
    /// waiting in the queue.
    pub fn enqueue(&mut self, url: &str, depth: u32) -> bool {
        let normalized = match normalize_url(url) {
            Ok(n) => n,
            Err(e) => {
                debug!(target: "brandcheck::frontier", "Dropping URL: {e}");
                return false;
            }
        };

        if !in_scope(&normalized, &self.domain)
            || self.visited.contains(&normalized)
            || self.queued.contains(&normalized)
        {
            return false;
        }

        trace!(target: "brandcheck::frontier", "Queued [depth {depth}]: {normalized}");
        self.queued.insert(normalized.clone());
        self.queue.push_back(CrawlQueue {
            url: normalized,
            depth,
        });
        true
    }

    /// Pop the next URL to visit and mark it visited.
    ///
    /// Entries that are already visited, out of scope or deeper than
    /// `max_depth` are skipped without error.
    pub fn dequeue(&mut self) -> Option<CrawlQueue> {
        while let Some(item) = self.queue.pop_front() {
            self.queued.remove(&item.url);

            if self.visited.contains(&item.url) {
                continue;
            }
            if !in_scope(&item.url, &self.domain) {
                debug!(target: "brandcheck::frontier", "Out of scope at dequeue: {}", item.url);
                continue;
            }
            if let Some(max_depth) = self.max_depth
                && item.depth > max_depth
            {
                trace!(target: "brandcheck::frontier", "Beyond max depth {max_depth}: {}", item.url);
                continue;
            }

            self.visited.insert(item.url.clone());
            return Some(item);
        }
        None
    }

    /// Record a URL as visited so it is never queued or dequeued again
    pub fn mark_visited(&mut self, url: &str) {
        if let Ok(normalized) = normalize_url(url) {
            self.queued.remove(&normalized);
            self.visited.insert(normalized);
        }
    }

    #[must_use]
    pub fn is_visited(&self, url: &str) -> bool {
        normalize_url(url).is_ok_and(|n| self.visited.contains(&n))
    }

    #[must_use]
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// Number of entries still waiting, including ones dequeue will skip
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.queue.is_empty()
    }
}
