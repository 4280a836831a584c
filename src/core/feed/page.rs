//! Keyset-paginated page fetching
//!
//! Wraps a [`CatalogPageSource`] and checks every page it returns against the
//! seek contract: ids strictly ascending, all greater than the cursor, and no
//! more than the requested limit. A page that breaks the contract is rejected
//! as a whole, since a misordered page would corrupt the next cursor.

use crate::adapters::catalog::CatalogPageSource;
use crate::domain::ids::ProductId;
use crate::domain::{CatalogEntry, DomainConfig, FeedError, PricingGroup, Result};
use std::num::NonZeroUsize;
use std::sync::Arc;

/// Cursor and limit of one page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Id of the last product of the previous page, `None` for the first page
    pub cursor: Option<ProductId>,
    /// Maximum number of entries on the page
    pub limit: NonZeroUsize,
}

impl PageRequest {
    /// Request the first page
    pub fn first(limit: NonZeroUsize) -> Self {
        Self {
            cursor: None,
            limit,
        }
    }

    /// Request the page after the given cursor
    pub fn after(cursor: Option<ProductId>, limit: NonZeroUsize) -> Self {
        Self { cursor, limit }
    }

    /// Request for the page following a page that ended at `last_seek_id`
    pub fn next(&self, last_seek_id: ProductId) -> Self {
        Self {
            cursor: Some(last_seek_id),
            limit: self.limit,
        }
    }
}

/// Fetches contract-checked catalog pages
#[derive(Clone)]
pub struct CatalogPageReader {
    source: Arc<dyn CatalogPageSource>,
}

impl CatalogPageReader {
    pub fn new(source: Arc<dyn CatalogPageSource>) -> Self {
        Self { source }
    }

    /// Fetch one page of entries
    ///
    /// # Errors
    ///
    /// Propagates storage errors unchanged and returns
    /// [`FeedError::Validation`] when the page violates the seek contract.
    pub async fn fetch(
        &self,
        domain: &DomainConfig,
        pricing_group: &PricingGroup,
        request: PageRequest,
    ) -> Result<Vec<CatalogEntry>> {
        let entries = self
            .source
            .fetch_page(domain, pricing_group, request.cursor, request.limit)
            .await?;

        check_page(&entries, request)?;
        crate::log_page_fetched!(&request.cursor, request.limit.get(), entries.len());

        Ok(entries)
    }
}

/// Check a page against the seek contract
pub fn check_page(entries: &[CatalogEntry], request: PageRequest) -> Result<()> {
    if entries.len() > request.limit.get() {
        return Err(FeedError::Validation(format!(
            "Catalog page has {} entries, limit is {}",
            entries.len(),
            request.limit
        )));
    }

    let mut previous = request.cursor;
    for entry in entries {
        if let Some(previous) = previous {
            if entry.id <= previous {
                return Err(FeedError::Validation(format!(
                    "Catalog page is not in seek order: product {} follows {}",
                    entry.id, previous
                )));
            }
        }
        previous = Some(entry.id);
    }

    Ok(())
}
