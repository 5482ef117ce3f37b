//! Frontier invariants: FIFO order, at-most-once dequeue, domain scoping

use kodegen_tools_brandcheck::Frontier;
use proptest::prelude::*;
use std::collections::HashSet;

#[test]
fn dequeues_breadth_first() {
    let mut frontier = Frontier::new("example.org", None);
    frontier.seed("https://example.org/").unwrap();
    let root = frontier.dequeue().unwrap();
    assert_eq!(root.depth, 0);

    assert!(frontier.enqueue("https://example.org/a", 1));
    assert!(frontier.enqueue("https://example.org/b", 1));
    let a = frontier.dequeue().unwrap();
    assert!(frontier.enqueue("https://example.org/a/child", 2));

    let order: Vec<_> = std::iter::from_fn(|| frontier.dequeue())
        .map(|item| item.url)
        .collect();
    assert_eq!(a.url, "https://example.org/a");
    assert_eq!(
        order,
        vec!["https://example.org/b", "https://example.org/a/child"]
    );
    assert!(frontier.is_exhausted());
}

#[test]
fn rejects_other_hosts() {
    let mut frontier = Frontier::new("example.org", None);
    assert!(!frontier.enqueue("https://www.example.org/", 1));
    assert!(!frontier.enqueue("https://evil.org/example.org", 1));
    assert!(!frontier.enqueue("not a url", 1));
    assert_eq!(frontier.pending(), 0);
}

#[test]
fn marked_urls_are_never_dequeued() {
    let mut frontier = Frontier::new("example.org", None);
    assert!(frontier.enqueue("https://example.org/skip", 1));
    frontier.mark_visited("https://example.org/skip#top");
    assert!(frontier.dequeue().is_none());
    assert_eq!(frontier.visited_count(), 1);
}

proptest! {
    #[test]
    fn no_url_is_dequeued_twice(
        ops in proptest::collection::vec((0u8..12, any::<bool>(), any::<bool>()), 1..80),
    ) {
        let mut frontier = Frontier::new("example.org", Some(3));
        let mut seen = HashSet::new();

        for (page, with_query, dequeue) in ops {
            let url = if with_query {
                format!("https://example.org/p{page}?v={page}")
            } else {
                format!("https://example.org/p{page}")
            };
            frontier.enqueue(&url, u32::from(page % 5));

            if dequeue && let Some(item) = frontier.dequeue() {
                prop_assert!(item.depth <= 3);
                prop_assert!(seen.insert(item.url), "dequeued twice");
            }
        }

        while let Some(item) = frontier.dequeue() {
            prop_assert!(seen.insert(item.url), "dequeued twice");
        }
        prop_assert_eq!(seen.len(), frontier.visited_count());
    }
}
