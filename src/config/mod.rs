//! Configuration management for the catalog feed exporter.
//!
//! This module provides TOML-based configuration loading, parsing, and validation.
//!
//! # Overview
//!
//! Configuration files support:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `CATALOG_FEED_<SECTION>_<KEY>` environment overrides
//! - Default values for optional settings
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use catalog_feed::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("catalog-feed.toml")?;
//!
//! println!("Domain: {}", config.feed.domain_id);
//! println!("Page size: {}", config.feed.page_size);
//! println!("Output: {}", config.export.output_path);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Log level and dry run
//! - [`FeedConfig`] - Domain, page size, delivery days, image size limit
//! - [`ExportConfig`] - Output path, retries, resume cursor
//! - [`LoggingConfig`] - Local file logging
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [feed]
//! domain_id = 1
//! page_size = 1000
//! out_of_stock_delivery_days = 10
//!
//! [export]
//! output_path = "${FEED_OUTPUT_DIR}/feed.jsonl"
//! max_retries = 3
//! ```

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use loader::{load_config, parse_config};
pub use schema::{ApplicationConfig, ExportConfig, FeedAppConfig, FeedConfig, LoggingConfig};
