//! Close-on-drop handle for browser tabs
//!
//! A render can be abandoned at any await point when the fetch deadline
//! passes. The guard makes sure the tab it was opened for is still closed.

use futures::future::BoxFuture;
use tokio::runtime::Handle;

/// Closes `tab` exactly once: either through [`TabGuard::close`] or, if the
/// owning future is dropped first, on a task spawned from `Drop`.
pub struct TabGuard<T: Send + 'static> {
    tab: Option<T>,
    close: fn(T) -> BoxFuture<'static, ()>,
}

impl<T: Send + 'static> TabGuard<T> {
    pub fn new(tab: T, close: fn(T) -> BoxFuture<'static, ()>) -> Self {
        Self {
            tab: Some(tab),
            close,
        }
    }

    /// Close the tab now and wait for it
    pub async fn close(mut self) {
        if let Some(tab) = self.tab.take() {
            (self.close)(tab).await;
        }
    }
}

impl<T: Send + 'static> Drop for TabGuard<T> {
    fn drop(&mut self) {
        let Some(tab) = self.tab.take() else {
            return;
        };
        match Handle::try_current() {
            Ok(handle) => {
                handle.spawn((self.close)(tab));
            }
            Err(_) => {
                log::debug!(target: "brandcheck::render", "No runtime left to close an abandoned tab");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawl_engine::page_timeout::with_fetch_timeout;
    use crate::renderer::{PageRenderer, RenderError, RenderedPage};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn count_close(closed: Arc<AtomicUsize>) -> BoxFuture<'static, ()> {
        Box::pin(async move {
            closed.fetch_add(1, Ordering::SeqCst);
        })
    }

    /// Opens a tab per render and then never finishes loading
    #[derive(Default)]
    struct HangingTabs {
        opened: AtomicUsize,
        closed: Arc<AtomicUsize>,
    }

    impl PageRenderer for HangingTabs {
        async fn render(&self, _url: &str) -> Result<RenderedPage, RenderError> {
            self.opened.fetch_add(1, Ordering::SeqCst);
            let tab = TabGuard::new(Arc::clone(&self.closed), count_close);
            std::future::pending::<()>().await;
            tab.close().await;
            Ok(RenderedPage::default())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn timed_out_renders_still_close_their_tabs() {
        let renderer = HangingTabs::default();

        for _ in 0..3 {
            let result =
                with_fetch_timeout(renderer.render("https://example.org/"), Duration::from_millis(20))
                    .await;
            assert!(matches!(result, Err(RenderError::Timeout { .. })));
        }

        // Let the close tasks spawned on drop run
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }

        assert_eq!(renderer.opened.load(Ordering::SeqCst), 3);
        assert_eq!(renderer.closed.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn explicit_close_runs_once() {
        let closed = Arc::new(AtomicUsize::new(0));
        let tab = TabGuard::new(Arc::clone(&closed), count_close);

        tab.close().await;
        tokio::task::yield_now().await;

        assert_eq!(closed.load(Ordering::SeqCst), 1);
    }
}
