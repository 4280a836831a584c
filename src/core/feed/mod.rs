//! Feed generation pipeline
//!
//! - [`pricing`] - default pricing group resolution
//! - [`page`] - keyset page fetching and seek contract checks
//! - [`loaders`] - per-page attribute batch loaders
//! - [`factory`] - export record assembly
//! - [`pipeline`] - the per-page pipeline and its lazy record iterator
//! - [`image`] - image URL size limiting
//!
//! # Example
//!
//! ```rust,no_run
//! use catalog_feed::adapters::catalog::CatalogServices;
//! use catalog_feed::adapters::memory::{CatalogSnapshot, MemoryCatalog};
//! use catalog_feed::core::feed::{FeedPipeline, FeedSettings};
//! use catalog_feed::domain::DomainId;
//! use std::num::NonZeroUsize;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = Arc::new(MemoryCatalog::from_snapshot(CatalogSnapshot::from_json_file("catalog.json")?)?);
//! let domain = store.domain(DomainId::FIRST)?.clone();
//! let pipeline = FeedPipeline::new(&CatalogServices::from_store(store), FeedSettings::default());
//!
//! let limit = NonZeroUsize::new(1000).unwrap();
//! let mut cursor = None;
//! loop {
//!     let mut page = pipeline.items(&domain, cursor, limit).await?;
//!     if page.is_empty() {
//!         break;
//!     }
//!     for record in page.by_ref() {
//!         println!("{}", record?.name());
//!     }
//!     cursor = page.last_seek_id();
//! }
//! # Ok(())
//! # }
//! ```

pub mod factory;
pub mod image;
pub mod loaders;
pub mod page;
pub mod pipeline;
pub mod pricing;

pub use factory::{FeedSettings, RecordFactory, RecordWarning, DEFAULT_OUT_OF_STOCK_DELIVERY_DAYS};
pub use image::{limit_size_in_image_url, ImageSizeLimit};
pub use loaders::{
    AttributeBatchLoaders, PageAttributes, ProductParametersBatchLoader, ProductUrlsBatchLoader,
};
pub use page::{CatalogPageReader, PageRequest};
pub use pipeline::{FeedPage, FeedPipeline};
pub use pricing::PricingContextResolver;
