//! Full crawl report as pretty-printed JSON

use std::path::Path;
use std::time::Duration;
use tokio::time::timeout;

use crate::crawl_engine::{CrawlError, CrawlReport};

/// Upper bound on serializing one report off the async runtime
const BLOCKING_SERIALIZATION_TIMEOUT: Duration = Duration::from_secs(30);

/// Serialize `report` on a blocking thread and write it to `path`.
pub async fn save_report_json(report: CrawlReport, path: impl AsRef<Path>) -> Result<(), CrawlError> {
    let path = path.as_ref();

    // JSON serialization stays off the async workers
    let blocking_task = tokio::task::spawn_blocking(move || serde_json::to_string_pretty(&report));

    let json_str = match timeout(BLOCKING_SERIALIZATION_TIMEOUT, blocking_task).await {
        Ok(Ok(result)) => result?,
        Ok(Err(e)) => {
            return Err(CrawlError::Other(format!(
                "JSON serialization task panicked: {e}"
            )));
        }
        Err(_) => {
            log::warn!(
                target: "brandcheck::report",
                "JSON serialization timeout (timeout: {BLOCKING_SERIALIZATION_TIMEOUT:?})"
            );
            return Err(CrawlError::Other(format!(
                "JSON serialization timed out after {BLOCKING_SERIALIZATION_TIMEOUT:?}"
            )));
        }
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, json_str).await?;

    log::info!(target: "brandcheck::report", "Wrote JSON report to {}", path.display());
    Ok(())
}
