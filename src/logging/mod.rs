//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Console output for interactive runs
//! - JSON-formatted local log files with rotation
//! - Configurable log levels
//!
//! # Example
//!
//! ```no_run
//! use catalog_feed::logging::init_logging;
//! use catalog_feed::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log a fetched catalog page
///
/// # Example
///
/// ```no_run
/// use catalog_feed::log_page_fetched;
/// use catalog_feed::domain::ids::ProductId;
///
/// let cursor: Option<ProductId> = None;
/// log_page_fetched!(&cursor, 1000, 250);
/// ```
#[macro_export]
macro_rules! log_page_fetched {
    ($cursor:expr, $limit:expr, $count:expr) => {
        tracing::debug!(
            cursor = ?$cursor,
            page_size = $limit,
            count = $count,
            "Fetched catalog page"
        );
    };
}

/// Log the completion of an export operation
///
/// # Example
///
/// ```no_run
/// use catalog_feed::log_export_complete;
/// use std::time::Duration;
///
/// let count = 42;
/// let duration = Duration::from_secs(10);
/// log_export_complete!(count, duration);
/// ```
#[macro_export]
macro_rules! log_export_complete {
    ($count:expr, $duration:expr) => {
        tracing::info!(
            count = $count,
            duration_ms = $duration.as_millis(),
            "Export completed"
        );
    };
}

/// Log a retry attempt
///
/// # Example
///
/// ```no_run
/// use catalog_feed::log_retry_attempt;
///
/// log_retry_attempt!(2, 3, "Query failed");
/// ```
#[macro_export]
macro_rules! log_retry_attempt {
    ($attempt:expr, $max_attempts:expr, $reason:expr) => {
        tracing::warn!(
            attempt = $attempt,
            max_attempts = $max_attempts,
            reason = $reason,
            "Retrying operation"
        );
    };
}
