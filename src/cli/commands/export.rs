//! Export command implementation
//!
//! This module implements the `export` command, which exports the catalog of
//! a snapshot file to a JSON Lines feed.

use crate::adapters::catalog::CatalogServices;
use crate::adapters::memory::{CatalogSnapshot, MemoryCatalog};
use crate::config::{load_config, FeedAppConfig};
use crate::core::export::{
    DiscardSink, ExportCoordinator, ExportOptions, ExportSummary, JsonLinesSink, RecordSink,
};
use crate::core::feed::FeedPipeline;
use crate::domain::ids::ProductId;
use clap::Args;
use std::sync::Arc;
use tokio::sync::watch;

/// Arguments for the export command
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Catalog snapshot (JSON) to export from
    #[arg(long)]
    pub catalog: String,

    /// Override the output file
    #[arg(short, long)]
    pub output: Option<String>,

    /// Resume after this product id
    #[arg(long)]
    pub cursor: Option<ProductId>,

    /// Override the page size
    #[arg(long)]
    pub page_size: Option<usize>,

    /// Dry run mode - assemble records without writing them
    #[arg(long)]
    pub dry_run: bool,
}

impl ExportArgs {
    /// Execute the export command
    pub async fn execute(
        &self,
        config_path: &str,
        shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        tracing::info!("Starting export command");

        let mut config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("Failed to load configuration: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        self.apply_overrides(&mut config);

        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "Configuration validation failed");
            eprintln!("Configuration validation failed: {e}");
            return Ok(2);
        }

        let snapshot = match CatalogSnapshot::from_json_file(&self.catalog) {
            Ok(s) => s,
            Err(e) => {
                tracing::error!(catalog = %self.catalog, error = %e, "Failed to load catalog snapshot");
                eprintln!("Failed to load catalog snapshot: {e}");
                return Ok(5); // Fatal error exit code
            }
        };
        let store = Arc::new(MemoryCatalog::from_snapshot(snapshot)?);

        let domain = match store.domain(config.feed.domain_id) {
            Ok(d) => d.clone(),
            Err(e) => {
                eprintln!("Domain {} is not part of the catalog: {e}", config.feed.domain_id);
                return Ok(2);
            }
        };

        if config.application.dry_run {
            tracing::info!("Dry run mode enabled - no records will be written");
            println!("🔍 DRY RUN MODE - No records will be written");
            println!();
        }

        let pipeline = FeedPipeline::new(&CatalogServices::from_store(store), config.feed.settings());
        let coordinator = ExportCoordinator::new(
            pipeline,
            ExportOptions::from_config(&config)?,
            shutdown_signal,
        );

        // The output file is only opened (and truncated) for a real export
        let mut sink: Box<dyn RecordSink> = if config.application.dry_run {
            println!("🚀 Exporting domain {} (dry run)", domain.id);
            Box::new(DiscardSink)
        } else {
            println!("🚀 Exporting domain {} to {}", domain.id, config.export.output_path);
            Box::new(JsonLinesSink::create(&config.export.output_path)?)
        };
        println!();

        let summary = match coordinator
            .run(&domain, config.export.start_cursor, sink.as_mut())
            .await
        {
            Ok(s) => s,
            Err(e) => {
                tracing::error!(error = %e, "Export failed");
                eprintln!("Export failed: {e}");
                return Ok(5);
            }
        };

        print_summary(&summary);
        Ok(exit_code(&summary))
    }

    fn apply_overrides(&self, config: &mut FeedAppConfig) {
        if let Some(output) = &self.output {
            tracing::info!(output = %output, "Overriding output path from CLI");
            config.export.output_path = output.clone();
        }

        if let Some(cursor) = self.cursor {
            tracing::info!(cursor = %cursor, "Overriding start cursor from CLI");
            config.export.start_cursor = Some(cursor);
        }

        if let Some(page_size) = self.page_size {
            tracing::info!(page_size, "Overriding page size from CLI");
            config.feed.page_size = page_size;
        }

        if self.dry_run {
            tracing::info!("Enabling dry-run mode from CLI");
            config.application.dry_run = true;
        }
    }
}

fn print_summary(summary: &ExportSummary) {
    println!();
    println!("📊 Export Summary:");
    println!("  Started: {}", summary.started_at.to_rfc3339());
    println!("  Pages: {}", summary.pages);
    println!("  Records: {}", summary.records);
    println!("  Missing images: {}", summary.warnings);
    println!("  Page retries: {}", summary.retries);
    println!("  Duration: {:.2}s", summary.duration.as_secs_f64());
    if let Some(cursor) = summary.last_cursor {
        println!("  Last cursor: {cursor}");
    }
    println!();

    if !summary.errors.is_empty() {
        println!("⚠️  Errors encountered:");
        for error in &summary.errors {
            println!("  - {:?}: {}", error.error_type, error.message);
            if let Some(context) = &error.context {
                println!("    Context: {context}");
            }
        }
        println!();
    }
}

/// Exit code for a finished export
pub fn exit_code(summary: &ExportSummary) -> i32 {
    if summary.is_successful() {
        println!("✅ Export completed successfully!");
        return 0;
    }

    if summary.interrupted {
        println!("⚠️  Export interrupted.");
    } else {
        println!("⚠️  Export stopped on a failing page.");
    }
    if let Some(cursor) = summary.last_cursor {
        println!("   Resume with: --cursor {cursor}");
    }
    1 // Partial export
}
