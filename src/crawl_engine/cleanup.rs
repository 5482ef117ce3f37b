//! Browser and resource cleanup
//!
//! Runs when a crawl ends, whatever the reason it ended.

use chromiumoxide::Browser;
use log::{debug, warn};
use std::path::PathBuf;

/// Result of cleanup operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CleanupResult {
    /// All cleanup operations succeeded
    Success,
    /// Some cleanup operations failed, with error details
    PartialFailure(Vec<String>),
}

/// Close the browser, wait for its process to exit, and remove its profile
/// directory. Every step is attempted even if an earlier one fails.
pub async fn cleanup_browser_and_data(mut browser: Browser, chrome_data_dir: PathBuf) -> CleanupResult {
    let mut errors = Vec::new();

    debug!(target: "brandcheck::cleanup", "Closing browser");
    if let Err(e) = browser.close().await {
        warn!(target: "brandcheck::cleanup", "Failed to close browser: {e}");
        errors.push(format!("Browser close failed: {e}"));
    }

    // Wait for the process to exit so the profile directory is unlocked
    if let Err(e) = browser.wait().await {
        warn!(target: "brandcheck::cleanup", "Failed to wait for browser exit: {e}");
        errors.push(format!("Browser wait failed: {e}"));
    }

    if let Err(e) = std::fs::remove_dir_all(&chrome_data_dir) {
        warn!(target: "brandcheck::cleanup", "Failed to remove Chrome data directory: {e}");
        errors.push(format!("Directory cleanup failed: {e}"));
    } else {
        debug!(
            target: "brandcheck::cleanup",
            "Removed Chrome data directory {}",
            chrome_data_dir.display()
        );
    }

    if errors.is_empty() {
        CleanupResult::Success
    } else {
        CleanupResult::PartialFailure(errors)
    }
}
