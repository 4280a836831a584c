//! Catalog snapshot file format
//!
//! A snapshot is a JSON document holding domain master data and products
//! together with everything the catalog store would normally compute for
//! them (listings per domain, prices, category paths, image files).

use crate::domain::ids::{DomainId, PricingGroupId};
use crate::domain::{CatalogEntry, Currency, DomainConfig, Image, Price, PricingGroup, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

/// Root of a catalog snapshot document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    /// Storefront domains
    pub domains: Vec<SnapshotDomain>,

    /// Products in any order
    #[serde(default)]
    pub products: Vec<SnapshotProduct>,
}

/// Domain master data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotDomain {
    #[serde(flatten)]
    pub config: DomainConfig,

    /// Default currency of the domain
    pub currency: Currency,

    /// Default pricing group of the domain
    #[serde(default)]
    pub default_pricing_group: Option<PricingGroup>,
}

/// A product with its stored derived data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotProduct {
    #[serde(flatten)]
    pub entry: CatalogEntry,

    /// Per-domain listing data
    #[serde(default)]
    pub listings: Vec<ProductListing>,

    /// Registered images
    #[serde(default)]
    pub images: Vec<StoredImage>,
}

impl SnapshotProduct {
    /// Create a product without listings or images
    pub fn new(entry: CatalogEntry) -> Self {
        Self {
            entry,
            listings: Vec::new(),
            images: Vec::new(),
        }
    }

    /// Add a listing
    pub fn with_listing(mut self, listing: ProductListing) -> Self {
        self.listings.push(listing);
        self
    }

    /// Add an image
    pub fn with_image(mut self, image: StoredImage) -> Self {
        self.images.push(image);
        self
    }

    /// Listing on the given domain
    pub fn listing(&self, domain_id: DomainId) -> Option<&ProductListing> {
        self.listings.iter().find(|l| l.domain_id == domain_id)
    }
}

/// Data of a product on one domain
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductListing {
    pub domain_id: DomainId,

    /// Whether the product is visible on the domain at all
    #[serde(default = "default_true")]
    pub visible: bool,

    /// Pricing groups in which the product is excluded from sale
    #[serde(default)]
    pub excluded_pricing_groups: Vec<PricingGroupId>,

    /// Canonical URL slug, relative to the domain URL
    #[serde(default)]
    pub slug: Option<String>,

    /// Tier price
    #[serde(default)]
    pub price: Option<Price>,

    /// Customer-facing price, defaults to the tier price
    #[serde(default)]
    pub customer_price: Option<Price>,

    /// Cached availability
    #[serde(default)]
    pub available: bool,

    /// Category names from root to main category
    #[serde(default)]
    pub category_path: Vec<String>,

    /// Parameter values keyed by name
    #[serde(default)]
    pub parameters: BTreeMap<String, String>,
}

impl ProductListing {
    /// Create a visible listing with a price
    pub fn new(domain_id: DomainId, slug: impl Into<String>, price: Price) -> Self {
        Self {
            domain_id,
            visible: true,
            excluded_pricing_groups: Vec::new(),
            slug: Some(slug.into()),
            price: Some(price),
            customer_price: None,
            available: false,
            category_path: Vec::new(),
            parameters: BTreeMap::new(),
        }
    }

    /// Set the cached availability
    pub fn available(mut self, available: bool) -> Self {
        self.available = available;
        self
    }

    /// Set the category path
    pub fn category_path<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.category_path = names.into_iter().map(Into::into).collect();
        self
    }

    /// Add a parameter
    pub fn parameter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.insert(name.into(), value.into());
        self
    }

    /// Set the customer-facing price
    pub fn customer_price(mut self, price: Price) -> Self {
        self.customer_price = Some(price);
        self
    }

    /// Exclude the product from sale in a pricing group
    pub fn excluded_for(mut self, pricing_group_id: PricingGroupId) -> Self {
        self.excluded_pricing_groups.push(pricing_group_id);
        self
    }
}

/// An image with its storage state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredImage {
    #[serde(flatten)]
    pub image: Image,

    /// Whether the image file exists in storage
    #[serde(default = "default_true")]
    pub file_present: bool,
}

impl StoredImage {
    /// An image whose file is present
    pub fn present(image: Image) -> Self {
        Self {
            image,
            file_present: true,
        }
    }

    /// An image whose file is missing from storage
    pub fn missing(image: Image) -> Self {
        Self {
            image,
            file_present: false,
        }
    }
}

impl CatalogSnapshot {
    /// Read a snapshot from a JSON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or fails validation
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            crate::domain::FeedError::Io(format!(
                "Failed to read catalog snapshot {}: {}",
                path.display(),
                e
            ))
        })?;
        let snapshot: CatalogSnapshot = serde_json::from_str(&contents)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Validates uniqueness of domain, product and image ids
    pub fn validate(&self) -> Result<()> {
        let mut domain_ids = HashSet::new();
        for domain in &self.domains {
            if !domain_ids.insert(domain.config.id) {
                return Err(crate::domain::FeedError::Validation(format!(
                    "Duplicate domain id {} in catalog snapshot",
                    domain.config.id
                )));
            }
        }

        let mut product_ids = HashSet::new();
        let mut image_ids = HashSet::new();
        for product in &self.products {
            if !product_ids.insert(product.entry.id) {
                return Err(crate::domain::FeedError::Validation(format!(
                    "Duplicate product id {} in catalog snapshot",
                    product.entry.id
                )));
            }
            for stored in &product.images {
                if !image_ids.insert(stored.image.id) {
                    return Err(crate::domain::FeedError::Validation(format!(
                        "Duplicate image id {} in catalog snapshot (product {})",
                        stored.image.id, product.entry.id
                    )));
                }
            }
        }

        Ok(())
    }
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SNAPSHOT: &str = r#"{
        "domains": [
            {
                "id": 1,
                "url": "https://example.com",
                "locale": "en",
                "currency": "EUR",
                "default_pricing_group": { "id": 1, "name": "Ordinary customer", "domain_id": 1 }
            }
        ],
        "products": [
            {
                "id": 1,
                "catnum": "catnum",
                "names": { "en": "product name" },
                "listings": [
                    {
                        "domain_id": 1,
                        "slug": "product-1",
                        "price": {
                            "price_without_vat": 1000,
                            "price_with_vat": 1210
                        },
                        "available": true,
                        "category_path": ["category1", "category2"]
                    }
                ],
                "images": [
                    { "id": 10, "position": 0 },
                    { "id": 11, "position": 1, "file_present": false }
                ]
            }
        ]
    }"#;

    #[test]
    fn test_parse_snapshot() {
        let snapshot: CatalogSnapshot = serde_json::from_str(SNAPSHOT).unwrap();
        assert_eq!(snapshot.domains.len(), 1);
        assert_eq!(snapshot.domains[0].currency.code(), "EUR");

        let product = &snapshot.products[0];
        assert_eq!(product.entry.catnum, "catnum");
        let listing = product.listing(DomainId::FIRST).unwrap();
        assert!(listing.visible);
        assert!(listing.available);
        assert_eq!(listing.category_path, vec!["category1", "category2"]);
        assert!(product.images[0].file_present);
        assert!(!product.images[1].file_present);
        assert_eq!(product.images[0].image.extension, "jpg");
    }

    #[test]
    fn test_from_json_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(SNAPSHOT.as_bytes()).unwrap();
        file.flush().unwrap();

        let snapshot = CatalogSnapshot::from_json_file(file.path()).unwrap();
        assert_eq!(snapshot.products.len(), 1);
    }

    #[test]
    fn test_duplicate_product_rejected() {
        let mut snapshot: CatalogSnapshot = serde_json::from_str(SNAPSHOT).unwrap();
        let duplicate = snapshot.products[0].clone();
        snapshot.products.push(duplicate);
        let err = snapshot.validate().unwrap_err();
        assert!(err.to_string().contains("Duplicate product id 1"));
    }

    #[test]
    fn test_shared_image_id_rejected() {
        let mut snapshot: CatalogSnapshot = serde_json::from_str(SNAPSHOT).unwrap();
        let mut other = snapshot.products[0].clone();
        other.entry.id = crate::domain::ids::ProductId::new(2);
        other.images.truncate(1);
        snapshot.products.push(other);

        let err = snapshot.validate().unwrap_err();
        assert!(err.to_string().contains("Duplicate image id 10"));
    }

    #[test]
    fn test_missing_file() {
        assert!(CatalogSnapshot::from_json_file("does-not-exist.json").is_err());
    }
}
