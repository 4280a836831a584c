//! Catalog integrations.
//!
//! - [`catalog`] - Service traits the feed pipeline depends on
//! - [`memory`] - In-memory catalog store loaded from a JSON snapshot
//!
//! The pipeline only sees the traits, held as `Arc<dyn Trait>` inside
//! [`catalog::CatalogServices`], so a database-backed store can replace the
//! in-memory one without touching the core.

pub mod catalog;
pub mod memory;
