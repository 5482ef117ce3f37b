//! Broadcast bus for crawl events
//!
//! `core` holds the handle and its subscriptions, `publishing` the send
//! path, `shutdown` the end-of-crawl signalling.

mod core;
mod publishing;
mod shutdown;

pub use core::CrawlEventBus;
