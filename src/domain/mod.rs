//! Domain models and types for the catalog feed.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`ProductId`], [`DomainId`], [`PricingGroupId`], [`ImageId`])
//! - **Catalog models** ([`CatalogEntry`], [`Image`], [`Brand`], [`DomainConfig`])
//! - **Pricing values** ([`Money`], [`Price`], [`ProductPrice`], [`Currency`], [`PricingGroup`])
//! - **The export record** ([`ExportRecord`], [`Availability`])
//! - **Error types** ([`FeedError`], [`CatalogError`], [`ImageError`])
//! - **Result type alias** ([`Result`])
//!
//! # Type Safety
//!
//! Identifiers are newtypes, so a product id cannot be used as a cursor for
//! some other entity:
//!
//! ```rust
//! use catalog_feed::domain::{ImageId, ProductId};
//!
//! let cursor = ProductId::new(1000);
//! let image = ImageId::new(1000);
//!
//! // This won't compile - type safety prevents mixing IDs
//! // let wrong: ProductId = image;
//! # let _ = (cursor, image);
//! ```

pub mod context;
pub mod errors;
pub mod ids;
pub mod pricing;
pub mod product;
pub mod record;
pub mod result;

// Re-export commonly used types for convenience
pub use context::DomainConfig;
pub use errors::{AttributeKind, CatalogError, FeedError, ImageError};
pub use ids::{DomainId, ImageId, PricingGroupId, ProductId};
pub use pricing::{Currency, Money, Price, PricingGroup, ProductPrice};
pub use product::{Brand, CatalogEntry, CatalogEntryBuilder, Image, ProductDomainData};
pub use record::{Availability, ExportRecord, ExportRecordBuilder};
pub use result::Result;
