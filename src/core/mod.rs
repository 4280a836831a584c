//! Core business logic of the catalog feed.
//!
//! # Modules
//!
//! - [`feed`] - The per-page feed pipeline: pricing context, keyset page
//!   fetch, attribute batch prefetch and record assembly
//! - [`export`] - The pagination loop that drives the pipeline over the
//!   whole catalog, with retries, shutdown handling and record sinks
//!
//! # Export Workflow
//!
//! 1. **Resolve**: Look up the default pricing group of the domain
//! 2. **Fetch**: Read the page of products after the cursor
//! 3. **Prefetch**: Load URLs and parameters for the whole page in bulk
//! 4. **Assemble**: Build one export record per product, in page order
//! 5. **Write**: Hand the complete page to the sink
//! 6. **Advance**: Continue from the last record's seek id until a page is empty
//!
//! # Example
//!
//! ```rust,no_run
//! use catalog_feed::adapters::catalog::CatalogServices;
//! use catalog_feed::adapters::memory::{CatalogSnapshot, MemoryCatalog};
//! use catalog_feed::config::load_config;
//! use catalog_feed::core::export::{ExportCoordinator, ExportOptions, VecSink};
//! use catalog_feed::core::feed::FeedPipeline;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("catalog-feed.toml")?;
//! let store = Arc::new(MemoryCatalog::from_snapshot(CatalogSnapshot::from_json_file("catalog.json")?)?);
//! let domain = store.domain(config.feed.domain_id)?.clone();
//!
//! let pipeline = FeedPipeline::new(&CatalogServices::from_store(store), config.feed.settings());
//! let (_shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
//! let coordinator = ExportCoordinator::new(pipeline, ExportOptions::from_config(&config)?, shutdown_rx);
//!
//! let mut sink = VecSink::new();
//! let summary = coordinator.run(&domain, None, &mut sink).await?;
//! println!("Exported {} records in {} pages", summary.records, summary.pages);
//! # Ok(())
//! # }
//! ```

pub mod export;
pub mod feed;
