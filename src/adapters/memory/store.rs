//! In-memory catalog store
//!
//! Implements every catalog collaborator over a [`CatalogSnapshot`]. Products
//! are kept in a `BTreeMap` keyed by id so page reads are ordered range scans.
//! Every image id is owned by exactly one product; an index over the owners
//! answers image file lookups without scanning the catalog.
//! Query counters and failure injection make it usable as a test stand-in.

use super::snapshot::{CatalogSnapshot, SnapshotDomain, SnapshotProduct, StoredImage};
use crate::adapters::catalog::traits::{
    AvailabilityChecker, CatalogPageSource, CategoryPathResolver, CurrencyResolver,
    CustomerPriceCalculator, ImageStore, PricingGroupSettings, ProductParameterQuery,
    ProductPriceCalculator, ProductUrlQuery, ProductUrls,
};
use crate::domain::errors::{AttributeKind, CatalogError, FeedError, ImageError};
use crate::domain::ids::{DomainId, ImageId, ProductId};
use crate::domain::{
    CatalogEntry, Currency, DomainConfig, Image, PricingGroup, ProductPrice, Result,
};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::num::NonZeroUsize;
use std::ops::Bound;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{RwLock, RwLockReadGuard};

/// Counters of storage round trips
#[derive(Debug, Default)]
pub struct QueryCounters {
    page_fetches: AtomicUsize,
    url_batches: AtomicUsize,
    parameter_batches: AtomicUsize,
}

impl QueryCounters {
    /// Number of page queries executed
    pub fn page_fetches(&self) -> usize {
        self.page_fetches.load(Ordering::SeqCst)
    }

    /// Number of bulk URL queries executed
    pub fn url_batches(&self) -> usize {
        self.url_batches.load(Ordering::SeqCst)
    }

    /// Number of bulk parameter queries executed
    pub fn parameter_batches(&self) -> usize {
        self.parameter_batches.load(Ordering::SeqCst)
    }
}

/// Storage state of one image file
#[derive(Debug, Clone, Copy)]
struct ImageFile {
    owner: ProductId,
    present: bool,
}

/// Products together with the image index derived from them
#[derive(Debug, Default)]
struct Inventory {
    products: BTreeMap<ProductId, SnapshotProduct>,
    image_files: HashMap<ImageId, ImageFile>,
}

impl Inventory {
    fn insert(&mut self, product: SnapshotProduct) -> Result<()> {
        let id = product.entry.id;
        if let Some(image) = product.images.iter().find(|stored| {
            self.image_files
                .get(&stored.image.id)
                .is_some_and(|file| file.owner != id)
        }) {
            return Err(FeedError::Validation(format!(
                "Image {} of product {} already belongs to another product",
                image.image.id, id
            )));
        }

        if let Some(previous) = self.products.get(&id) {
            for stored in &previous.images {
                self.image_files.remove(&stored.image.id);
            }
        }
        for stored in &product.images {
            self.image_files.insert(
                stored.image.id,
                ImageFile {
                    owner: id,
                    present: stored.file_present,
                },
            );
        }
        self.products.insert(id, product);
        Ok(())
    }
}

/// Images of a product in presentation order; the first one is the main image
fn ordered_images(product: &SnapshotProduct) -> Vec<&StoredImage> {
    let mut images: Vec<&StoredImage> = product.images.iter().collect();
    images.sort_by_key(|stored| (stored.image.position, stored.image.id));
    images
}

/// Catalog store backed by an in-memory snapshot
#[derive(Debug)]
pub struct MemoryCatalog {
    domains: HashMap<DomainId, SnapshotDomain>,
    inventory: RwLock<Inventory>,
    counters: QueryCounters,
    page_failures: AtomicUsize,
    url_batch_failures: AtomicUsize,
}

impl MemoryCatalog {
    /// Build a store from a validated snapshot
    pub fn from_snapshot(snapshot: CatalogSnapshot) -> Result<Self> {
        snapshot.validate()?;

        let domains = snapshot
            .domains
            .into_iter()
            .map(|d| (d.config.id, d))
            .collect();
        let mut inventory = Inventory::default();
        for product in snapshot.products {
            inventory.insert(product)?;
        }

        Ok(Self {
            domains,
            inventory: RwLock::new(inventory),
            counters: QueryCounters::default(),
            page_failures: AtomicUsize::new(0),
            url_batch_failures: AtomicUsize::new(0),
        })
    }

    /// Domain configuration by id
    pub fn domain(&self, domain_id: DomainId) -> Result<&DomainConfig> {
        self.domain_entry(domain_id).map(|d| &d.config)
    }

    /// Insert or replace a product
    ///
    /// # Errors
    ///
    /// Returns an error if one of its images belongs to another product
    pub fn insert_product(&self, product: SnapshotProduct) -> Result<()> {
        self.inventory
            .write()
            .map_err(|_| CatalogError::QueryFailed("catalog lock poisoned".to_string()))?
            .insert(product)
    }

    /// Number of stored products
    pub fn product_count(&self) -> usize {
        self.inventory.read().map(|i| i.products.len()).unwrap_or(0)
    }

    /// Storage round-trip counters
    pub fn counters(&self) -> &QueryCounters {
        &self.counters
    }

    /// Make the next `count` page fetches fail
    pub fn fail_next_page_fetches(&self, count: usize) {
        self.page_failures.store(count, Ordering::SeqCst);
    }

    /// Make the next `count` bulk URL queries fail
    pub fn fail_next_url_batches(&self, count: usize) {
        self.url_batch_failures.store(count, Ordering::SeqCst);
    }

    fn domain_entry(&self, domain_id: DomainId) -> Result<&SnapshotDomain> {
        self.domains
            .get(&domain_id)
            .ok_or_else(|| CatalogError::DomainNotFound(domain_id.to_string()).into())
    }

    fn read_inventory(&self) -> Result<RwLockReadGuard<'_, Inventory>> {
        self.inventory
            .read()
            .map_err(|_| CatalogError::QueryFailed("catalog lock poisoned".to_string()).into())
    }

    fn take_failure(counter: &AtomicUsize) -> bool {
        counter
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }

    fn image_path(domain: &DomainConfig, image: &Image) -> String {
        format!(
            "{}/content/images/product/{}.{}",
            domain.base_url(),
            image.id,
            image.extension
        )
    }

    fn listing_price(
        &self,
        entry: &CatalogEntry,
        domain_id: DomainId,
        customer_facing: bool,
    ) -> Result<ProductPrice> {
        let inventory = self.read_inventory()?;
        let listing = inventory
            .products
            .get(&entry.id)
            .and_then(|p| p.listing(domain_id))
            .ok_or_else(|| {
                FeedError::Pricing(format!(
                    "Product {} has no listing on domain {}",
                    entry.id, domain_id
                ))
            })?;

        let price = if customer_facing {
            listing.customer_price.or(listing.price)
        } else {
            listing.price
        };

        let price = price.ok_or_else(|| {
            FeedError::Pricing(format!(
                "Product {} has no price on domain {}",
                entry.id, domain_id
            ))
        })?;

        Ok(ProductPrice::new(price, false))
    }
}

#[async_trait]
impl CatalogPageSource for MemoryCatalog {
    async fn fetch_page(
        &self,
        domain: &DomainConfig,
        pricing_group: &PricingGroup,
        last_seek_id: Option<ProductId>,
        max_results: NonZeroUsize,
    ) -> Result<Vec<CatalogEntry>> {
        self.counters.page_fetches.fetch_add(1, Ordering::SeqCst);

        if Self::take_failure(&self.page_failures) {
            return Err(CatalogError::QueryFailed("injected page fetch failure".to_string()).into());
        }

        let lower = match last_seek_id {
            Some(id) => Bound::Excluded(id),
            None => Bound::Unbounded,
        };

        let inventory = self.read_inventory()?;
        let page = inventory
            .products
            .range((lower, Bound::Unbounded))
            .map(|(_, product)| product)
            .filter(|product| {
                product.listing(domain.id).is_some_and(|listing| {
                    listing.visible && !listing.excluded_pricing_groups.contains(&pricing_group.id)
                })
            })
            .take(max_results.get())
            .map(|product| product.entry.clone())
            .collect();

        Ok(page)
    }
}

#[async_trait]
impl PricingGroupSettings for MemoryCatalog {
    async fn default_pricing_group(&self, domain_id: DomainId) -> Result<PricingGroup> {
        self.domain_entry(domain_id)?
            .default_pricing_group
            .clone()
            .ok_or_else(|| CatalogError::PricingGroupNotFound(domain_id.to_string()).into())
    }
}

#[async_trait]
impl ProductUrlQuery for MemoryCatalog {
    async fn urls_for_products(
        &self,
        product_ids: &[ProductId],
        domain: &DomainConfig,
    ) -> Result<HashMap<ProductId, ProductUrls>> {
        self.counters.url_batches.fetch_add(1, Ordering::SeqCst);

        if Self::take_failure(&self.url_batch_failures) {
            return Err(CatalogError::BatchLoadFailed {
                kind: AttributeKind::Url,
                message: "injected url batch failure".to_string(),
            }
            .into());
        }

        let inventory = self.read_inventory()?;
        let urls = product_ids
            .iter()
            .filter_map(|id| inventory.products.get(id))
            .filter_map(|product| {
                let slug = product.listing(domain.id)?.slug.as_deref()?;
                let main_image_url = ordered_images(product)
                    .first()
                    .map(|stored| Self::image_path(domain, &stored.image));

                Some((
                    product.entry.id,
                    ProductUrls {
                        url: format!("{}/{}", domain.base_url(), slug.trim_start_matches('/')),
                        main_image_url,
                    },
                ))
            })
            .collect();

        Ok(urls)
    }
}

#[async_trait]
impl ProductParameterQuery for MemoryCatalog {
    async fn parameters_for_products(
        &self,
        product_ids: &[ProductId],
        domain: &DomainConfig,
    ) -> Result<HashMap<ProductId, BTreeMap<String, String>>> {
        self.counters.parameter_batches.fetch_add(1, Ordering::SeqCst);

        let inventory = self.read_inventory()?;
        let parameters = product_ids
            .iter()
            .filter_map(|id| inventory.products.get(id))
            .map(|product| {
                let parameters = product
                    .listing(domain.id)
                    .map(|listing| listing.parameters.clone())
                    .unwrap_or_default();
                (product.entry.id, parameters)
            })
            .collect();

        Ok(parameters)
    }
}

impl CurrencyResolver for MemoryCatalog {
    fn domain_default_currency(&self, domain_id: DomainId) -> Result<Currency> {
        self.domains
            .get(&domain_id)
            .map(|d| d.currency.clone())
            .ok_or_else(|| CatalogError::CurrencyNotFound(domain_id.to_string()).into())
    }
}

impl ProductPriceCalculator for MemoryCatalog {
    fn calculate_price(
        &self,
        entry: &CatalogEntry,
        domain_id: DomainId,
        pricing_group: &PricingGroup,
    ) -> Result<ProductPrice> {
        if pricing_group.domain_id != domain_id {
            return Err(FeedError::Pricing(format!(
                "Pricing group {} belongs to domain {}, not {}",
                pricing_group.id, pricing_group.domain_id, domain_id
            )));
        }
        self.listing_price(entry, domain_id, false)
    }
}

impl CustomerPriceCalculator for MemoryCatalog {
    fn calculate_price_for_customer(
        &self,
        entry: &CatalogEntry,
        domain_id: DomainId,
    ) -> Result<ProductPrice> {
        self.listing_price(entry, domain_id, true)
    }
}

impl AvailabilityChecker for MemoryCatalog {
    fn is_available_on_domain_cached(&self, entry: &CatalogEntry, domain_id: DomainId) -> bool {
        match self.read_inventory() {
            Ok(inventory) => inventory
                .products
                .get(&entry.id)
                .and_then(|p| p.listing(domain_id))
                .is_some_and(|listing| listing.available),
            Err(e) => {
                tracing::error!(
                    product_id = %entry.id,
                    domain_id = %domain_id,
                    error = %e,
                    "Availability cache unreadable, reporting product as unavailable"
                );
                false
            }
        }
    }
}

impl CategoryPathResolver for MemoryCatalog {
    fn category_names_from_root(
        &self,
        entry: &CatalogEntry,
        domain: &DomainConfig,
    ) -> Result<Vec<String>> {
        let inventory = self.read_inventory()?;
        let product = inventory
            .products
            .get(&entry.id)
            .ok_or_else(|| CatalogError::ProductNotFound(entry.id.to_string()))?;

        Ok(product
            .listing(domain.id)
            .map(|listing| listing.category_path.clone())
            .unwrap_or_default())
    }
}

impl ImageStore for MemoryCatalog {
    fn images_for_product(&self, product_id: ProductId) -> Result<Vec<Image>> {
        let inventory = self.read_inventory()?;
        Ok(inventory
            .products
            .get(&product_id)
            .map(|p| {
                ordered_images(p)
                    .into_iter()
                    .map(|stored| stored.image.clone())
                    .collect()
            })
            .unwrap_or_default())
    }

    fn image_url(
        &self,
        domain: &DomainConfig,
        image: &Image,
    ) -> std::result::Result<String, ImageError> {
        let inventory = self
            .inventory
            .read()
            .map_err(|_| ImageError::Storage("catalog lock poisoned".to_string()))?;

        let file_present = inventory
            .image_files
            .get(&image.id)
            .is_some_and(|file| file.present);

        if !file_present {
            return Err(ImageError::NotFound { image_id: image.id });
        }

        Ok(Self::image_path(domain, image))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::snapshot::{ProductListing, StoredImage};
    use crate::domain::ids::{ImageId, PricingGroupId};
    use crate::domain::{Money, Price};

    fn price(amount: i64) -> Price {
        Price::new(Money::from_minor(amount), Money::from_minor(amount * 121 / 100))
    }

    fn catalog() -> MemoryCatalog {
        let domain = DomainConfig::new(DomainId::FIRST, "https://example.com", "en");
        let group = PricingGroup::new(PricingGroupId::new(1), "Ordinary", DomainId::FIRST);
        let mut snapshot = CatalogSnapshot {
            domains: vec![SnapshotDomain {
                config: domain,
                currency: Currency::new("EUR").unwrap(),
                default_pricing_group: Some(group),
            }],
            products: Vec::new(),
        };

        for id in 1..=5u64 {
            let entry = CatalogEntry::builder()
                .id(ProductId::new(id))
                .catnum(format!("cat-{id}"))
                .name("en", format!("Product {id}"))
                .build()
                .unwrap();
            let mut listing = ProductListing::new(DomainId::FIRST, format!("product-{id}"), price(100));
            if id == 3 {
                listing = listing.excluded_for(PricingGroupId::new(1));
            }
            snapshot.products.push(
                SnapshotProduct::new(entry)
                    .with_listing(listing)
                    .with_image(StoredImage::present(Image::new(ImageId::new(id * 10 + 1), 1)))
                    .with_image(StoredImage::missing(Image::new(ImageId::new(id * 10), 0))),
            );
        }

        MemoryCatalog::from_snapshot(snapshot).unwrap()
    }

    async fn page(catalog: &MemoryCatalog, cursor: Option<u64>, limit: usize) -> Vec<u64> {
        let domain = catalog.domain(DomainId::FIRST).unwrap().clone();
        let group = catalog.default_pricing_group(DomainId::FIRST).await.unwrap();
        catalog
            .fetch_page(
                &domain,
                &group,
                cursor.map(ProductId::new),
                NonZeroUsize::new(limit).unwrap(),
            )
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.id.get())
            .collect()
    }

    #[tokio::test]
    async fn test_fetch_page_orders_and_limits() {
        let catalog = catalog();
        assert_eq!(page(&catalog, None, 2).await, vec![1, 2]);
        assert_eq!(page(&catalog, Some(2), 2).await, vec![4, 5]);
        assert!(page(&catalog, Some(5), 2).await.is_empty());
        assert_eq!(catalog.counters().page_fetches(), 3);
    }

    #[tokio::test]
    async fn test_fetch_page_injected_failure() {
        let catalog = catalog();
        catalog.fail_next_page_fetches(1);
        let domain = catalog.domain(DomainId::FIRST).unwrap().clone();
        let group = catalog.default_pricing_group(DomainId::FIRST).await.unwrap();
        let limit = NonZeroUsize::new(10).unwrap();

        assert!(catalog.fetch_page(&domain, &group, None, limit).await.is_err());
        assert!(catalog.fetch_page(&domain, &group, None, limit).await.is_ok());
    }

    #[tokio::test]
    async fn test_urls_use_lowest_positioned_image() {
        let catalog = catalog();
        let domain = catalog.domain(DomainId::FIRST).unwrap().clone();
        let urls = catalog
            .urls_for_products(&[ProductId::new(1), ProductId::new(99)], &domain)
            .await
            .unwrap();

        assert_eq!(urls.len(), 1);
        let product_urls = &urls[&ProductId::new(1)];
        assert_eq!(product_urls.url, "https://example.com/product-1");
        assert_eq!(
            product_urls.main_image_url.as_deref(),
            Some("https://example.com/content/images/product/10.jpg")
        );
    }

    #[test]
    fn test_images_sorted_by_position() {
        let catalog = catalog();
        let images = catalog.images_for_product(ProductId::new(2)).unwrap();
        let ids: Vec<u64> = images.iter().map(|i| i.id.get()).collect();
        assert_eq!(ids, vec![20, 21]);
    }

    #[test]
    fn test_image_url_missing_file() {
        let catalog = catalog();
        let domain = catalog.domain(DomainId::FIRST).unwrap().clone();
        let err = catalog
            .image_url(&domain, &Image::new(ImageId::new(10), 0))
            .unwrap_err();
        assert!(matches!(err, ImageError::NotFound { image_id } if image_id == ImageId::new(10)));
    }

    fn product_with_images(id: u64, images: Vec<StoredImage>) -> SnapshotProduct {
        let entry = CatalogEntry::builder()
            .id(ProductId::new(id))
            .catnum(format!("cat-{id}"))
            .build()
            .unwrap();
        let listing = ProductListing::new(DomainId::FIRST, format!("product-{id}"), price(100));
        images
            .into_iter()
            .fold(SnapshotProduct::new(entry).with_listing(listing), |p, image| {
                p.with_image(image)
            })
    }

    #[tokio::test]
    async fn test_main_image_is_first_gallery_image_on_equal_positions() {
        let catalog = catalog();
        catalog
            .insert_product(product_with_images(
                6,
                vec![
                    StoredImage::present(Image::new(ImageId::new(65), 0)),
                    StoredImage::present(Image::new(ImageId::new(63), 0)),
                ],
            ))
            .unwrap();
        let domain = catalog.domain(DomainId::FIRST).unwrap().clone();

        let urls = catalog
            .urls_for_products(&[ProductId::new(6)], &domain)
            .await
            .unwrap();
        let images = catalog.images_for_product(ProductId::new(6)).unwrap();

        assert_eq!(images[0].id, ImageId::new(63));
        assert_eq!(
            urls[&ProductId::new(6)].main_image_url.as_deref(),
            Some("https://example.com/content/images/product/63.jpg")
        );
    }

    #[test]
    fn test_insert_rejects_image_of_another_product() {
        let catalog = catalog();
        let err = catalog
            .insert_product(product_with_images(
                6,
                vec![StoredImage::present(Image::new(ImageId::new(10), 0))],
            ))
            .unwrap_err();
        assert!(err.to_string().contains("already belongs to another product"));

        let domain = catalog.domain(DomainId::FIRST).unwrap().clone();
        assert!(catalog
            .image_url(&domain, &Image::new(ImageId::new(10), 0))
            .is_err());
    }

    #[test]
    fn test_replacing_product_reindexes_images() {
        let catalog = catalog();
        catalog
            .insert_product(product_with_images(
                1,
                vec![StoredImage::present(Image::new(ImageId::new(10), 0))],
            ))
            .unwrap();
        let domain = catalog.domain(DomainId::FIRST).unwrap().clone();

        assert!(catalog
            .image_url(&domain, &Image::new(ImageId::new(10), 0))
            .is_ok());
        assert!(matches!(
            catalog.image_url(&domain, &Image::new(ImageId::new(11), 1)),
            Err(ImageError::NotFound { .. })
        ));
    }

    #[test]
    fn test_poisoned_lock_reports_unavailable_and_fails_queries() {
        let catalog = catalog();
        let entry = catalog.inventory.read().unwrap().products[&ProductId::new(1)]
            .entry
            .clone();
        let mut listing = ProductListing::new(DomainId::FIRST, "product-1", price(100));
        listing.available = true;
        catalog
            .insert_product(SnapshotProduct::new(entry.clone()).with_listing(listing))
            .unwrap();
        assert!(catalog.is_available_on_domain_cached(&entry, DomainId::FIRST));

        std::thread::scope(|scope| {
            let poisoner = scope.spawn(|| {
                let _guard = catalog.inventory.write().unwrap();
                panic!("writer panicked");
            });
            assert!(poisoner.join().is_err());
        });

        assert!(!catalog.is_available_on_domain_cached(&entry, DomainId::FIRST));
        assert!(catalog.images_for_product(ProductId::new(1)).is_err());
    }

    #[test]
    fn test_price_without_listing_fails() {
        let catalog = catalog();
        let entry = CatalogEntry::builder()
            .id(ProductId::new(1))
            .catnum("cat-1")
            .build()
            .unwrap();
        assert!(catalog
            .calculate_price_for_customer(&entry, DomainId::new(2))
            .is_err());
    }
}
