//! Catalog store collaborator traits
//!
//! The feed treats the catalog store as a set of opaque, already-correct
//! services. Query-shaped capabilities that hit storage are async; business
//! rule calculators that read cached data are synchronous, so that a page of
//! records can be assembled by a plain iterator once the page is prefetched.

use crate::domain::errors::ImageError;
use crate::domain::ids::{DomainId, ProductId};
use crate::domain::{
    CatalogEntry, Currency, DomainConfig, Image, PricingGroup, ProductPrice, Result,
};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::num::NonZeroUsize;

/// URLs of a product loaded in bulk for a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductUrls {
    /// Canonical product detail URL
    pub url: String,

    /// Main image URL before size limiting, if the product has an image
    pub main_image_url: Option<String>,
}

/// Source of keyset-paginated catalog pages
#[async_trait]
pub trait CatalogPageSource: Send + Sync {
    /// Fetch the products with `id > last_seek_id`, ascending by id, at most `max_results`
    ///
    /// Products that are not sellable for the given pricing group must not be
    /// returned. An empty vector means the catalog is exhausted.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails. The caller decides about retries.
    async fn fetch_page(
        &self,
        domain: &DomainConfig,
        pricing_group: &PricingGroup,
        last_seek_id: Option<ProductId>,
        max_results: NonZeroUsize,
    ) -> Result<Vec<CatalogEntry>>;
}

/// Pricing group settings per domain
#[async_trait]
pub trait PricingGroupSettings: Send + Sync {
    /// Default pricing group of the domain
    ///
    /// # Errors
    ///
    /// Returns an error if no default pricing group is configured.
    async fn default_pricing_group(&self, domain_id: DomainId) -> Result<PricingGroup>;
}

/// Bulk lookup of product URLs
#[async_trait]
pub trait ProductUrlQuery: Send + Sync {
    /// URLs for all given products on the domain, keyed by product id
    ///
    /// Products without a URL are absent from the map.
    async fn urls_for_products(
        &self,
        product_ids: &[ProductId],
        domain: &DomainConfig,
    ) -> Result<HashMap<ProductId, ProductUrls>>;
}

/// Bulk lookup of product parameters
#[async_trait]
pub trait ProductParameterQuery: Send + Sync {
    /// Parameter name/value maps for all given products, keyed by product id
    ///
    /// Products without parameters may be absent from the map.
    async fn parameters_for_products(
        &self,
        product_ids: &[ProductId],
        domain: &DomainConfig,
    ) -> Result<HashMap<ProductId, BTreeMap<String, String>>>;
}

/// Domain currency master data
pub trait CurrencyResolver: Send + Sync {
    /// Default currency of the domain
    fn domain_default_currency(&self, domain_id: DomainId) -> Result<Currency>;
}

/// Tier-based price calculation, without customer context
pub trait ProductPriceCalculator: Send + Sync {
    /// Price of the product for the pricing group on the domain
    fn calculate_price(
        &self,
        entry: &CatalogEntry,
        domain_id: DomainId,
        pricing_group: &PricingGroup,
    ) -> Result<ProductPrice>;
}

/// Customer-facing price calculation
///
/// May apply customer-specific discounts. The feed has no logged-in customer,
/// so implementations resolve the anonymous customer of the domain.
pub trait CustomerPriceCalculator: Send + Sync {
    /// Price of the product for the current customer on the domain
    fn calculate_price_for_customer(
        &self,
        entry: &CatalogEntry,
        domain_id: DomainId,
    ) -> Result<ProductPrice>;
}

/// Cached product availability
pub trait AvailabilityChecker: Send + Sync {
    /// Whether the product is available on the domain (cached value)
    fn is_available_on_domain_cached(&self, entry: &CatalogEntry, domain_id: DomainId) -> bool;
}

/// Category tree lookups
pub trait CategoryPathResolver: Send + Sync {
    /// Category names from the root to the product's main category on the domain
    ///
    /// Returns an empty vector for products without a main category.
    fn category_names_from_root(
        &self,
        entry: &CatalogEntry,
        domain: &DomainConfig,
    ) -> Result<Vec<String>>;
}

/// Image metadata and file storage
pub trait ImageStore: Send + Sync {
    /// Images of the product ordered by presentation rank
    fn images_for_product(&self, product_id: ProductId) -> Result<Vec<Image>>;

    /// Public URL of the image file on the domain
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::NotFound`] when the file is missing from storage.
    fn image_url(&self, domain: &DomainConfig, image: &Image) -> std::result::Result<String, ImageError>;
}
