//! Configuration schema types
//!
//! This module defines the configuration structure of the catalog feed exporter.

use crate::core::feed::{FeedSettings, ImageSizeLimit};
use crate::domain::ids::{DomainId, ProductId};
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;

/// Largest accepted page size
pub const MAX_PAGE_SIZE: usize = 10_000;

/// Main catalog feed configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedAppConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Feed generation settings
    pub feed: FeedConfig,

    /// Export loop settings
    #[serde(default)]
    pub export: ExportConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl FeedAppConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.feed.validate()?;
        self.export.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Dry run mode (assemble records but don't write them)
    #[serde(default)]
    pub dry_run: bool,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            dry_run: false,
        }
    }
}

/// Feed generation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Domain to export
    pub domain_id: DomainId,

    /// Number of products per page (1-10000)
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Delivery days reported for products that are out of stock
    #[serde(default = "default_out_of_stock_delivery_days")]
    pub out_of_stock_delivery_days: u32,

    /// Maximum width of exported image URLs
    #[serde(default = "default_image_max_dimension")]
    pub image_max_width: u32,

    /// Maximum height of exported image URLs
    #[serde(default = "default_image_max_dimension")]
    pub image_max_height: u32,
}

impl FeedConfig {
    fn validate(&self) -> Result<(), String> {
        if self.domain_id.get() == 0 {
            return Err("feed.domain_id must be > 0".to_string());
        }

        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            return Err(format!(
                "feed.page_size must be between 1 and {}, got {}",
                MAX_PAGE_SIZE, self.page_size
            ));
        }

        if self.image_max_width == 0 || self.image_max_height == 0 {
            return Err("feed.image_max_width and feed.image_max_height must be > 0".to_string());
        }

        Ok(())
    }

    /// Page size as a non-zero limit
    pub fn page_limit(&self) -> Result<NonZeroUsize, String> {
        NonZeroUsize::new(self.page_size).ok_or_else(|| "feed.page_size must be > 0".to_string())
    }

    /// Record assembly settings
    pub fn settings(&self) -> FeedSettings {
        FeedSettings {
            out_of_stock_delivery_days: self.out_of_stock_delivery_days,
            image_limit: ImageSizeLimit::new(self.image_max_width, self.image_max_height),
        }
    }
}

/// Export loop configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Output file (JSON Lines)
    #[serde(default = "default_output_path")]
    pub output_path: String,

    /// Maximum retry attempts per page
    #[serde(default = "default_max_retries")]
    pub max_retries: usize,

    /// Retry backoff intervals in milliseconds
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: Vec<u64>,

    /// Cursor to resume from (seek id of the last exported product)
    #[serde(default)]
    pub start_cursor: Option<ProductId>,
}

impl ExportConfig {
    fn validate(&self) -> Result<(), String> {
        if self.output_path.trim().is_empty() {
            return Err("export.output_path cannot be empty".to_string());
        }

        if self.max_retries > 10 {
            return Err(format!(
                "export.max_retries must be <= 10, got {}",
                self.max_retries
            ));
        }

        if self.max_retries > 0 && self.retry_backoff_ms.is_empty() {
            return Err(
                "export.retry_backoff_ms cannot be empty when max_retries > 0".to_string(),
            );
        }

        Ok(())
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_path: default_output_path(),
            max_retries: default_max_retries(),
            retry_backoff_ms: default_retry_backoff_ms(),
            start_cursor: None,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default = "default_true")]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily or hourly)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local logging is enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: true,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_page_size() -> usize {
    1000
}

fn default_out_of_stock_delivery_days() -> u32 {
    crate::core::feed::DEFAULT_OUT_OF_STOCK_DELIVERY_DAYS
}

fn default_image_max_dimension() -> u32 {
    crate::core::feed::image::DEFAULT_IMAGE_MAX_WIDTH
}

fn default_output_path() -> String {
    "feed.jsonl".to_string()
}

fn default_max_retries() -> usize {
    3
}

fn default_retry_backoff_ms() -> Vec<u64> {
    vec![1000, 2000, 4000]
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
