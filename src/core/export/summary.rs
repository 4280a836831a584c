//! Export summary and reporting
//!
//! This module defines structures for tracking and reporting export results.

use crate::domain::ids::ProductId;
use chrono::{DateTime, Utc};
use std::time::Duration;

/// Summary of an export run
#[derive(Debug, Clone)]
pub struct ExportSummary {
    /// When the export started
    pub started_at: DateTime<Utc>,

    /// Number of non-empty pages exported
    pub pages: usize,

    /// Number of records exported
    pub records: usize,

    /// Number of recoverable attribute warnings (missing images)
    pub warnings: usize,

    /// Number of page retries performed
    pub retries: usize,

    /// Seek id of the last exported record, the resume cursor
    pub last_cursor: Option<ProductId>,

    /// Whether the export stopped on a shutdown signal
    pub interrupted: bool,

    /// Whether records were discarded instead of written
    pub dry_run: bool,

    /// Duration of the export
    pub duration: Duration,

    /// Errors that stopped the export
    pub errors: Vec<ExportError>,
}

impl ExportSummary {
    /// Create a new empty export summary
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            pages: 0,
            records: 0,
            warnings: 0,
            retries: 0,
            last_cursor: None,
            interrupted: false,
            dry_run: false,
            duration: Duration::from_secs(0),
            errors: Vec::new(),
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Add an error
    pub fn add_error(&mut self, error: ExportError) {
        self.errors.push(error);
    }

    /// Account for one exported page
    pub fn add_page(&mut self, records: usize, warnings: usize, last_cursor: Option<ProductId>) {
        self.pages += 1;
        self.records += records;
        self.warnings += warnings;
        if last_cursor.is_some() {
            self.last_cursor = last_cursor;
        }
    }

    /// Whether the whole catalog was exported without errors
    pub fn is_successful(&self) -> bool {
        self.errors.is_empty() && !self.interrupted
    }

    /// Records exported per second
    pub fn records_per_second(&self) -> f64 {
        let secs = self.duration.as_secs_f64();
        if secs == 0.0 {
            return 0.0;
        }
        self.records as f64 / secs
    }

    /// Log the summary
    pub fn log_summary(&self) {
        crate::log_export_complete!(self.records, self.duration);
        tracing::info!(
            started_at = %self.started_at.to_rfc3339(),
            pages = self.pages,
            records = self.records,
            warnings = self.warnings,
            retries = self.retries,
            last_cursor = ?self.last_cursor.map(ProductId::get),
            interrupted = self.interrupted,
            dry_run = self.dry_run,
            records_per_second = format!("{:.1}", self.records_per_second()),
            "Export summary"
        );

        if !self.errors.is_empty() {
            tracing::warn!(
                error_count = self.errors.len(),
                "Export completed with errors"
            );
            for error in &self.errors {
                tracing::warn!(
                    error_type = ?error.error_type,
                    message = %error.message,
                    context = ?error.context,
                    "Export error"
                );
            }
        }
    }
}

impl Default for ExportSummary {
    fn default() -> Self {
        Self::new()
    }
}

/// Type of export error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportErrorType {
    /// Page fetch or attribute prefetch failed
    Page,
    /// Record assembly failed
    Record,
    /// Writing to the output failed
    Sink,
    /// Configuration error
    Configuration,
    /// Unknown error
    Unknown,
}

/// Export error with context
#[derive(Debug, Clone)]
pub struct ExportError {
    /// Type of error
    pub error_type: ExportErrorType,

    /// Error message
    pub message: String,

    /// Optional context (e.g. cursor)
    pub context: Option<String>,
}

impl ExportError {
    /// Create a new export error
    pub fn new(error_type: ExportErrorType, message: impl Into<String>) -> Self {
        Self {
            error_type,
            message: message.into(),
            context: None,
        }
    }

    /// Add context to the error
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}
