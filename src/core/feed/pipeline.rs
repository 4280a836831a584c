//! Feed pipeline
//!
//! One call to [`FeedPipeline::items`] resolves the pricing context, fetches
//! one page, prefetches its attributes and hands back a [`FeedPage`] that
//! assembles records lazily in page order. The pipeline never fetches the
//! next page itself; the caller carries the cursor forward.

use super::factory::{FeedSettings, RecordFactory, RecordWarning};
use super::loaders::{
    AttributeBatchLoaders, PageAttributes, ProductParametersBatchLoader, ProductUrlsBatchLoader,
};
use super::page::{CatalogPageReader, PageRequest};
use super::pricing::PricingContextResolver;
use crate::adapters::catalog::CatalogServices;
use crate::domain::ids::ProductId;
use crate::domain::{CatalogEntry, DomainConfig, ExportRecord, PricingGroup, Result};
use std::iter::FusedIterator;
use std::num::NonZeroUsize;
use std::sync::Arc;

/// Produces one page of export records per call
#[derive(Clone)]
pub struct FeedPipeline {
    pricing: PricingContextResolver,
    pages: CatalogPageReader,
    loaders: AttributeBatchLoaders,
    factory: Arc<RecordFactory>,
}

impl FeedPipeline {
    /// Wire a pipeline over the catalog services
    pub fn new(services: &CatalogServices, settings: FeedSettings) -> Self {
        let loaders = AttributeBatchLoaders::new(
            ProductUrlsBatchLoader::new(services.urls.clone(), settings.image_limit),
            ProductParametersBatchLoader::new(services.parameters.clone()),
        );

        Self {
            pricing: PricingContextResolver::new(services.pricing_groups.clone()),
            pages: CatalogPageReader::new(services.page_source.clone()),
            loaders,
            factory: Arc::new(RecordFactory::new(services, settings)),
        }
    }

    /// Records of the page after `cursor`
    ///
    /// Returns an empty page once the catalog is exhausted. Pass the
    /// `seek_id` of the last record as the next `cursor` to continue.
    ///
    /// # Errors
    ///
    /// Pricing context, page fetch and prefetch failures are returned here;
    /// record assembly failures are yielded by the returned page.
    pub async fn items(
        &self,
        domain: &DomainConfig,
        cursor: Option<ProductId>,
        limit: NonZeroUsize,
    ) -> Result<FeedPage> {
        let pricing_group = self.pricing.resolve(domain).await?;

        let request = PageRequest::after(cursor, limit);
        let entries = self.pages.fetch(domain, &pricing_group, request).await?;

        let attributes = self.loaders.prefetch(&entries, domain).await?;

        Ok(FeedPage::new(
            domain.clone(),
            pricing_group,
            entries,
            attributes,
            self.factory.clone(),
        ))
    }
}

impl std::fmt::Debug for FeedPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeedPipeline")
            .field("factory", &self.factory)
            .finish_non_exhaustive()
    }
}

/// Lazily assembled records of one prefetched page
///
/// Yields `Ok(record)` per entry in page order. The first `Err` ends the
/// page: the iterator returns `None` afterwards. Dropping the page early
/// releases everything it holds.
pub struct FeedPage {
    domain: DomainConfig,
    pricing_group: PricingGroup,
    last_seek_id: Option<ProductId>,
    entry_count: usize,
    entries: std::vec::IntoIter<CatalogEntry>,
    attributes: PageAttributes,
    factory: Arc<RecordFactory>,
    warnings: Vec<RecordWarning>,
    failed: bool,
}

impl FeedPage {
    fn new(
        domain: DomainConfig,
        pricing_group: PricingGroup,
        entries: Vec<CatalogEntry>,
        attributes: PageAttributes,
        factory: Arc<RecordFactory>,
    ) -> Self {
        Self {
            domain,
            pricing_group,
            last_seek_id: entries.last().map(|entry| entry.id),
            entry_count: entries.len(),
            entries: entries.into_iter(),
            attributes,
            factory,
            warnings: Vec::new(),
            failed: false,
        }
    }

    /// Whether the catalog is exhausted
    pub fn is_empty(&self) -> bool {
        self.entry_count == 0
    }

    /// Number of entries fetched for the page
    pub fn entry_count(&self) -> usize {
        self.entry_count
    }

    /// Cursor for the next page, `None` for an empty page
    pub fn last_seek_id(&self) -> Option<ProductId> {
        self.last_seek_id
    }

    /// Pricing group the page was fetched for
    pub fn pricing_group(&self) -> &PricingGroup {
        &self.pricing_group
    }

    /// Warnings raised by the records assembled so far
    pub fn warnings(&self) -> &[RecordWarning] {
        &self.warnings
    }

    /// Assemble every remaining record
    ///
    /// # Errors
    ///
    /// Returns the first record error; no records are returned in that case.
    pub fn collect_records(&mut self) -> Result<Vec<ExportRecord>> {
        self.by_ref().collect()
    }
}

impl Iterator for FeedPage {
    type Item = Result<ExportRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        let entry = self.entries.next()?;
        match self.factory.assemble_reporting(
            &entry,
            &self.domain,
            &self.pricing_group,
            &self.attributes,
        ) {
            Ok((record, warnings)) => {
                self.warnings.extend(warnings);
                Some(Ok(record))
            }
            Err(e) => {
                tracing::error!(
                    product_id = %entry.id,
                    domain_id = %self.domain.id,
                    error = %e,
                    "Failed to assemble export record"
                );
                self.failed = true;
                Some(Err(e))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.failed {
            (0, Some(0))
        } else {
            (0, Some(self.entries.len()))
        }
    }
}

impl FusedIterator for FeedPage {}

impl std::fmt::Debug for FeedPage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeedPage")
            .field("domain_id", &self.domain.id)
            .field("entry_count", &self.entry_count)
            .field("last_seek_id", &self.last_seek_id)
            .field("warnings", &self.warnings.len())
            .field("failed", &self.failed)
            .finish_non_exhaustive()
    }
}
