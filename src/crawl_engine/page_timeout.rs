//! Timeout wrapper for page renders
//!
//! Applied around every renderer so a hung page becomes a fetch failure
//! instead of stalling the crawl.

use std::future::Future;
use std::time::Duration;

use crate::renderer::RenderError;

/// Run a render with an explicit deadline.
///
/// # Returns
/// * the render's own result if it finished in time
/// * `RenderError::Timeout` if the deadline passed first
pub async fn with_fetch_timeout<F, T>(operation: F, timeout: Duration) -> Result<T, RenderError>
where
    F: Future<Output = Result<T, RenderError>>,
{
    match tokio::time::timeout(timeout, operation).await {
        Ok(result) => result,
        Err(_) => Err(RenderError::Timeout {
            secs: timeout.as_secs(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn slow_render_times_out() {
        let slow = async {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok::<_, RenderError>(())
        };
        let result = with_fetch_timeout(slow, Duration::from_secs(5)).await;
        assert!(matches!(result, Err(RenderError::Timeout { secs: 5 })));
    }

    #[tokio::test]
    async fn fast_render_passes_through() {
        let result = with_fetch_timeout(async { Ok::<_, RenderError>(7) }, Duration::from_secs(5)).await;
        assert_eq!(result.ok(), Some(7));
    }
}
