// Catalog Feed - Product catalog export for shopping-comparison feeds
// Copyright (c) 2025 Catalog Feed Contributors
// Licensed under the MIT License

//! # Catalog Feed
//!
//! Catalog Feed exports a storefront's product catalog as a feed for
//! shopping-comparison services.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Paginating** the catalog with keyset (seek) pagination over product ids
//! - **Prefetching** URLs and parameters for a whole page in one query each
//! - **Assembling** one [`domain::ExportRecord`] per product with prices,
//!   availability, category path and images
//! - **Driving** the page loop with retries and graceful shutdown
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Feed pipeline and export loop
//! - [`adapters`] - Catalog service traits and the in-memory catalog store
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use catalog_feed::adapters::catalog::CatalogServices;
//! use catalog_feed::adapters::memory::{CatalogSnapshot, MemoryCatalog};
//! use catalog_feed::core::feed::{FeedPipeline, FeedSettings};
//! use catalog_feed::domain::ids::DomainId;
//! use std::num::NonZeroUsize;
//! use std::sync::Arc;
//!
//! # async fn example() -> catalog_feed::domain::Result<()> {
//! let store = Arc::new(MemoryCatalog::from_snapshot(
//!     CatalogSnapshot::from_json_file("catalog.json")?,
//! )?);
//! let domain = store.domain(DomainId::FIRST)?.clone();
//! let pipeline = FeedPipeline::new(&CatalogServices::from_store(store), FeedSettings::default());
//!
//! let limit = NonZeroUsize::new(100).unwrap();
//! let mut cursor = None;
//! loop {
//!     let mut page = pipeline.items(&domain, cursor, limit).await?;
//!     if page.is_empty() {
//!         break;
//!     }
//!     let records = page.collect_records()?;
//!     cursor = records.last().map(|r| r.seek_id());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! All fallible operations return [`domain::Result`], whose error type is
//! [`domain::FeedError`].

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
