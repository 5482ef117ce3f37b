//! Configuration module for brand-consistency crawls
//!
//! This module provides the `CrawlConfig` struct, its type-safe builder, and
//! the loader for the comma-separated string-set file.

// Sub-modules
pub mod builder;
pub mod getters;
pub mod loader;
pub mod types;

// Re-exports for public API
pub use builder::{CrawlConfigBuilder, WithStartUrl};
pub use loader::{ConfigFile, RowKind, UnknownRowKind, load_config_file, parse_config};
pub use types::{CancelFlag, CrawlConfig};
