//! Per-page attribute batch loaders
//!
//! Each loader performs exactly one bulk lookup for a whole page of entries.
//! The results are held in a [`PageAttributes`] value that lives as long as
//! the page it was built for; nothing is cached across pages.
//!
//! Accessors on [`PageAttributes`] only answer for products of the prefetched
//! page. Asking about any other product is a programming error and fails with
//! [`FeedError::AttributeNotLoaded`].

use super::image::ImageSizeLimit;
use crate::adapters::catalog::{ProductParameterQuery, ProductUrlQuery, ProductUrls};
use crate::domain::errors::AttributeKind;
use crate::domain::ids::ProductId;
use crate::domain::{CatalogEntry, CatalogError, DomainConfig, FeedError, Result};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

/// Bulk loader of canonical and main image URLs
#[derive(Clone)]
pub struct ProductUrlsBatchLoader {
    query: Arc<dyn ProductUrlQuery>,
    image_limit: ImageSizeLimit,
}

impl ProductUrlsBatchLoader {
    pub fn new(query: Arc<dyn ProductUrlQuery>, image_limit: ImageSizeLimit) -> Self {
        Self { query, image_limit }
    }

    /// Load URLs for the products, with the main image URL already size limited
    pub async fn load(
        &self,
        product_ids: &[ProductId],
        domain: &DomainConfig,
    ) -> Result<HashMap<ProductId, ProductUrls>> {
        let urls = self
            .query
            .urls_for_products(product_ids, domain)
            .await
            .map_err(|e| batch_load_failed(AttributeKind::Url, e))?;

        Ok(urls
            .into_iter()
            .map(|(id, urls)| {
                let main_image_url = urls.main_image_url.map(|url| self.image_limit.apply(&url));
                (
                    id,
                    ProductUrls {
                        url: urls.url,
                        main_image_url,
                    },
                )
            })
            .collect())
    }
}

/// Bulk loader of product parameters
#[derive(Clone)]
pub struct ProductParametersBatchLoader {
    query: Arc<dyn ProductParameterQuery>,
}

impl ProductParametersBatchLoader {
    pub fn new(query: Arc<dyn ProductParameterQuery>) -> Self {
        Self { query }
    }

    pub async fn load(
        &self,
        product_ids: &[ProductId],
        domain: &DomainConfig,
    ) -> Result<HashMap<ProductId, BTreeMap<String, String>>> {
        self.query
            .parameters_for_products(product_ids, domain)
            .await
            .map_err(|e| batch_load_failed(AttributeKind::Parameters, e))
    }
}

/// All batch loaders used for a page
#[derive(Clone)]
pub struct AttributeBatchLoaders {
    urls: ProductUrlsBatchLoader,
    parameters: ProductParametersBatchLoader,
}

impl AttributeBatchLoaders {
    pub fn new(urls: ProductUrlsBatchLoader, parameters: ProductParametersBatchLoader) -> Self {
        Self { urls, parameters }
    }

    /// Prefetch every batch-loaded attribute for a page
    ///
    /// Runs one URL lookup and one parameter lookup for the whole page. The
    /// two lookups are independent and run concurrently. An empty page issues
    /// no lookups.
    ///
    /// # Errors
    ///
    /// Any lookup failure is fatal for the page.
    pub async fn prefetch(
        &self,
        entries: &[CatalogEntry],
        domain: &DomainConfig,
    ) -> Result<PageAttributes> {
        if entries.is_empty() {
            return Ok(PageAttributes::default());
        }

        let product_ids: Vec<ProductId> = entries.iter().map(|e| e.id).collect();

        let (urls, parameters) = futures::try_join!(
            self.urls.load(&product_ids, domain),
            self.parameters.load(&product_ids, domain),
        )?;

        tracing::debug!(
            domain_id = %domain.id,
            products = product_ids.len(),
            urls = urls.len(),
            parameters = parameters.len(),
            "Prefetched page attributes"
        );

        Ok(PageAttributes {
            page: product_ids.into_iter().collect(),
            urls,
            parameters,
        })
    }
}

/// Batch-loaded attributes of one page, keyed by product id
#[derive(Debug, Default)]
pub struct PageAttributes {
    page: HashSet<ProductId>,
    urls: HashMap<ProductId, ProductUrls>,
    parameters: HashMap<ProductId, BTreeMap<String, String>>,
}

impl PageAttributes {
    /// Number of products the attributes were prefetched for
    pub fn len(&self) -> usize {
        self.page.len()
    }

    pub fn is_empty(&self) -> bool {
        self.page.is_empty()
    }

    /// Whether the product belongs to the prefetched page
    pub fn contains(&self, product_id: ProductId) -> bool {
        self.page.contains(&product_id)
    }

    /// Canonical URL of the entry
    ///
    /// # Errors
    ///
    /// [`FeedError::AttributeNotLoaded`] when the entry is not on the page, and
    /// [`FeedError::Record`] when the catalog has no URL for it.
    pub fn url_for(&self, entry: &CatalogEntry) -> Result<&str> {
        self.ensure_loaded(entry.id, AttributeKind::Url)?;
        self.urls
            .get(&entry.id)
            .map(|urls| urls.url.as_str())
            .ok_or_else(|| FeedError::Record {
                product_id: entry.id,
                message: "product has no canonical URL".to_string(),
            })
    }

    /// Size-limited main image URL of the entry, if it has an image
    pub fn resized_image_url_for(&self, entry: &CatalogEntry) -> Result<Option<&str>> {
        self.ensure_loaded(entry.id, AttributeKind::ImageUrl)?;
        Ok(self
            .urls
            .get(&entry.id)
            .and_then(|urls| urls.main_image_url.as_deref()))
    }

    /// Parameters of the entry, empty when it has none
    pub fn parameters_for(&self, entry: &CatalogEntry) -> Result<BTreeMap<String, String>> {
        self.ensure_loaded(entry.id, AttributeKind::Parameters)?;
        Ok(self.parameters.get(&entry.id).cloned().unwrap_or_default())
    }

    fn ensure_loaded(&self, product_id: ProductId, kind: AttributeKind) -> Result<()> {
        if self.page.contains(&product_id) {
            return Ok(());
        }

        tracing::error!(
            product_id = %product_id,
            attribute = %kind,
            "Attribute accessed for a product outside the prefetched page"
        );
        Err(FeedError::AttributeNotLoaded { product_id, kind })
    }
}

fn batch_load_failed(kind: AttributeKind, error: FeedError) -> FeedError {
    match error {
        FeedError::Catalog(CatalogError::BatchLoadFailed { .. }) => error,
        other => CatalogError::BatchLoadFailed {
            kind,
            message: other.to_string(),
        }
        .into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingQuery {
        url_calls: AtomicUsize,
        parameter_calls: AtomicUsize,
    }

    #[async_trait]
    impl ProductUrlQuery for CountingQuery {
        async fn urls_for_products(
            &self,
            product_ids: &[ProductId],
            domain: &DomainConfig,
        ) -> Result<HashMap<ProductId, ProductUrls>> {
            self.url_calls.fetch_add(1, Ordering::SeqCst);
            Ok(product_ids
                .iter()
                .map(|id| {
                    (
                        *id,
                        ProductUrls {
                            url: format!("{}/p/{}", domain.base_url(), id),
                            main_image_url: Some(format!("{}/img/{}.jpg", domain.base_url(), id)),
                        },
                    )
                })
                .collect())
        }
    }

    #[async_trait]
    impl ProductParameterQuery for CountingQuery {
        async fn parameters_for_products(
            &self,
            product_ids: &[ProductId],
            _domain: &DomainConfig,
        ) -> Result<HashMap<ProductId, BTreeMap<String, String>>> {
            self.parameter_calls.fetch_add(1, Ordering::SeqCst);
            Ok(product_ids
                .iter()
                .filter(|id| id.get() % 2 == 0)
                .map(|id| {
                    let mut parameters = BTreeMap::new();
                    parameters.insert("Color".to_string(), "Red".to_string());
                    (*id, parameters)
                })
                .collect())
        }
    }

    fn loaders(query: Arc<CountingQuery>) -> AttributeBatchLoaders {
        AttributeBatchLoaders::new(
            ProductUrlsBatchLoader::new(query.clone(), ImageSizeLimit::new(100, 50)),
            ProductParametersBatchLoader::new(query),
        )
    }

    fn entry(id: u64) -> CatalogEntry {
        CatalogEntry::builder()
            .id(ProductId::new(id))
            .catnum(format!("cat-{id}"))
            .build()
            .unwrap()
    }

    fn domain() -> DomainConfig {
        DomainConfig::new(crate::domain::DomainId::FIRST, "https://example.com", "en")
    }

    #[tokio::test]
    async fn test_prefetch_issues_one_lookup_per_kind() {
        let query = Arc::new(CountingQuery::default());
        let page: Vec<CatalogEntry> = (1..=50).map(entry).collect();

        let attributes = loaders(query.clone()).prefetch(&page, &domain()).await.unwrap();

        assert_eq!(attributes.len(), 50);
        assert_eq!(query.url_calls.load(Ordering::SeqCst), 1);
        assert_eq!(query.parameter_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_empty_page_issues_no_lookups() {
        let query = Arc::new(CountingQuery::default());
        let attributes = loaders(query.clone()).prefetch(&[], &domain()).await.unwrap();

        assert!(attributes.is_empty());
        assert_eq!(query.url_calls.load(Ordering::SeqCst), 0);
        assert_eq!(query.parameter_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_accessors_answer_for_page_products() {
        let query = Arc::new(CountingQuery::default());
        let page = vec![entry(1), entry(2)];
        let attributes = loaders(query).prefetch(&page, &domain()).await.unwrap();

        assert_eq!(attributes.url_for(&page[0]).unwrap(), "https://example.com/p/1");
        assert_eq!(
            attributes.resized_image_url_for(&page[0]).unwrap(),
            Some("https://example.com/img/1.jpg?width=100&height=50")
        );
        assert!(attributes.parameters_for(&page[0]).unwrap().is_empty());
        assert_eq!(attributes.parameters_for(&page[1]).unwrap()["Color"], "Red");
    }

    #[tokio::test]
    async fn test_access_outside_page_fails() {
        let query = Arc::new(CountingQuery::default());
        let attributes = loaders(query).prefetch(&[entry(1)], &domain()).await.unwrap();

        let err = attributes.url_for(&entry(7)).unwrap_err();
        assert!(matches!(
            err,
            FeedError::AttributeNotLoaded { product_id, kind: AttributeKind::Url }
                if product_id == ProductId::new(7)
        ));
        assert!(attributes.parameters_for(&entry(7)).is_err());
        assert!(attributes.resized_image_url_for(&entry(7)).is_err());
    }

    #[test]
    fn test_access_without_prefetch_fails() {
        let attributes = PageAttributes::default();
        assert!(attributes.url_for(&entry(1)).is_err());
    }
}
