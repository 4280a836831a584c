//! Export coordinator - caller-side pagination loop
//!
//! The feed pipeline produces exactly one page per call. The coordinator
//! drives it from a start cursor until the catalog is exhausted, hands every
//! complete page to a [`RecordSink`], retries failed pages from the same
//! cursor and stops between pages when a shutdown is signalled.

use super::sink::RecordSink;
use super::summary::{ExportError, ExportErrorType, ExportSummary};
use crate::config::FeedAppConfig;
use crate::core::feed::FeedPipeline;
use crate::domain::ids::ProductId;
use crate::domain::{DomainConfig, ExportRecord, FeedError, Result};
use std::num::NonZeroUsize;
use std::time::{Duration, Instant};
use tokio::sync::watch;

/// Settings of the export loop
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Page size passed to the pipeline
    pub page_size: NonZeroUsize,
    /// Retries per page after the first attempt
    pub max_retries: usize,
    /// Delay before each retry; the last value is reused
    pub retry_backoff: Vec<Duration>,
    /// Assemble records without writing them
    pub dry_run: bool,
}

impl ExportOptions {
    /// Build options from the configuration
    pub fn from_config(config: &FeedAppConfig) -> Result<Self> {
        Ok(Self {
            page_size: config.feed.page_limit().map_err(FeedError::Configuration)?,
            max_retries: config.export.max_retries,
            retry_backoff: config
                .export
                .retry_backoff_ms
                .iter()
                .map(|ms| Duration::from_millis(*ms))
                .collect(),
            dry_run: config.application.dry_run,
        })
    }

    fn backoff_for(&self, retry: usize) -> Duration {
        let index = retry
            .saturating_sub(1)
            .min(self.retry_backoff.len().saturating_sub(1));
        self.retry_backoff.get(index).copied().unwrap_or_default()
    }
}

/// A successfully assembled page
struct ExportedPage {
    records: Vec<ExportRecord>,
    warnings: usize,
    last_seek_id: Option<ProductId>,
}

/// Drives the feed pipeline over the whole catalog
pub struct ExportCoordinator {
    pipeline: FeedPipeline,
    options: ExportOptions,
    shutdown_signal: watch::Receiver<bool>,
}

impl ExportCoordinator {
    /// Create a new export coordinator
    pub fn new(
        pipeline: FeedPipeline,
        options: ExportOptions,
        shutdown_signal: watch::Receiver<bool>,
    ) -> Self {
        Self {
            pipeline,
            options,
            shutdown_signal,
        }
    }

    /// Export every page after `start_cursor` into the sink
    ///
    /// A page that still fails after all retries stops the export; the error
    /// is recorded in the summary and `last_cursor` is the resume point.
    ///
    /// # Errors
    ///
    /// Returns an error only when the sink fails.
    pub async fn run(
        &self,
        domain: &DomainConfig,
        start_cursor: Option<ProductId>,
        sink: &mut dyn RecordSink,
    ) -> Result<ExportSummary> {
        let start_time = Instant::now();
        let mut summary = ExportSummary::new();
        summary.dry_run = self.options.dry_run;
        summary.last_cursor = start_cursor;

        tracing::info!(
            domain_id = %domain.id,
            cursor = ?start_cursor.map(ProductId::get),
            page_size = self.options.page_size.get(),
            dry_run = self.options.dry_run,
            "Starting export"
        );

        let mut cursor = start_cursor;
        loop {
            if self.is_shutdown_requested() {
                tracing::info!(
                    cursor = ?cursor.map(ProductId::get),
                    "Shutdown requested, stopping before next page"
                );
                summary.interrupted = true;
                break;
            }

            let page = match self.export_page(domain, cursor, &mut summary).await {
                Ok(Some(page)) => page,
                Ok(None) => break,
                Err(e) => {
                    let error_type = match &e {
                        FeedError::Record { .. }
                        | FeedError::Pricing(_)
                        | FeedError::Category(_)
                        | FeedError::AttributeNotLoaded { .. } => ExportErrorType::Record,
                        _ => ExportErrorType::Page,
                    };
                    summary.add_error(
                        ExportError::new(error_type, e.to_string())
                            .with_context(format!("cursor={}", describe_cursor(cursor))),
                    );
                    summary.interrupted = self.is_shutdown_requested();
                    break;
                }
            };

            if !self.options.dry_run {
                if let Err(e) = sink.write_page(&page.records) {
                    summary.add_error(
                        ExportError::new(ExportErrorType::Sink, e.to_string())
                            .with_context(format!("cursor={}", describe_cursor(cursor))),
                    );
                    summary = summary.with_duration(start_time.elapsed());
                    summary.log_summary();
                    return Err(e);
                }
            }

            summary.add_page(page.records.len(), page.warnings, page.last_seek_id);
            tracing::info!(
                page = summary.pages,
                records = page.records.len(),
                cursor = ?page.last_seek_id.map(ProductId::get),
                "Exported page"
            );
            cursor = page.last_seek_id;
        }

        if !self.options.dry_run {
            sink.finish()?;
        }

        summary = summary.with_duration(start_time.elapsed());
        summary.log_summary();

        Ok(summary)
    }

    /// Export one page, retrying from the same cursor
    ///
    /// Returns `None` when the catalog is exhausted.
    async fn export_page(
        &self,
        domain: &DomainConfig,
        cursor: Option<ProductId>,
        summary: &mut ExportSummary,
    ) -> Result<Option<ExportedPage>> {
        let max_attempts = self.options.max_retries + 1;
        let mut attempt = 1;

        loop {
            match self.try_page(domain, cursor).await {
                Ok(page) => return Ok(page),
                Err(e) if attempt < max_attempts => {
                    let reason = e.to_string();
                    crate::log_retry_attempt!(attempt, self.options.max_retries, reason.as_str());

                    summary.retries += 1;
                    if !self.wait_before_retry(self.options.backoff_for(attempt)).await {
                        return Err(e);
                    }
                    attempt += 1;
                }
                Err(e) => {
                    tracing::error!(
                        cursor = ?cursor.map(ProductId::get),
                        attempts = attempt,
                        error = %e,
                        "Page failed, giving up"
                    );
                    return Err(e);
                }
            }
        }
    }

    async fn try_page(
        &self,
        domain: &DomainConfig,
        cursor: Option<ProductId>,
    ) -> Result<Option<ExportedPage>> {
        let mut page = self
            .pipeline
            .items(domain, cursor, self.options.page_size)
            .await?;

        if page.is_empty() {
            tracing::debug!(cursor = ?cursor.map(ProductId::get), "Catalog exhausted");
            return Ok(None);
        }

        let records = page.collect_records()?;
        Ok(Some(ExportedPage {
            warnings: page.warnings().len(),
            last_seek_id: records.last().map(ExportRecord::seek_id),
            records,
        }))
    }

    /// Sleep before a retry; returns `false` if shutdown was requested meanwhile
    async fn wait_before_retry(&self, delay: Duration) -> bool {
        let mut shutdown = self.shutdown_signal.clone();
        tokio::select! {
            _ = tokio::time::sleep(delay) => {}
            _ = shutdown.changed() => {}
        }
        !self.is_shutdown_requested()
    }

    fn is_shutdown_requested(&self) -> bool {
        *self.shutdown_signal.borrow()
    }
}

fn describe_cursor(cursor: Option<ProductId>) -> String {
    cursor.map_or_else(|| "start".to_string(), |c| c.to_string())
}
