//! In-memory catalog store
//!
//! Loads a [`CatalogSnapshot`] from JSON and serves every catalog
//! collaborator from it. Used by the CLI for file-based exports and by the
//! test suite as a deterministic stand-in for a real store.

pub mod snapshot;
pub mod store;

pub use snapshot::{CatalogSnapshot, ProductListing, SnapshotDomain, SnapshotProduct, StoredImage};
pub use store::{MemoryCatalog, QueryCounters};
