//! Shared fixtures for integration tests

#![allow(dead_code)]

use catalog_feed::adapters::catalog::CatalogServices;
use catalog_feed::adapters::memory::{
    CatalogSnapshot, MemoryCatalog, ProductListing, SnapshotDomain, SnapshotProduct, StoredImage,
};
use catalog_feed::domain::ids::{DomainId, ImageId, PricingGroupId, ProductId};
use catalog_feed::domain::{CatalogEntry, Currency, DomainConfig, Image, Money, Price, PricingGroup};
use std::sync::Arc;

pub const BASE_URL: &str = "https://example.com";

pub fn price(without_vat: i64, with_vat: i64) -> Price {
    Price::new(Money::from_minor(without_vat), Money::from_minor(with_vat))
}

pub fn domain() -> DomainConfig {
    DomainConfig::new(DomainId::FIRST, BASE_URL, "en")
}

pub fn pricing_group() -> PricingGroup {
    PricingGroup::new(PricingGroupId::new(1), "Ordinary customer", DomainId::FIRST)
}

pub fn entry(id: u64) -> CatalogEntry {
    CatalogEntry::builder()
        .id(ProductId::new(id))
        .catnum(format!("CAT-{id}"))
        .name("en", format!("Product {id}"))
        .build()
        .unwrap()
}

pub fn listing(id: u64) -> ProductListing {
    ProductListing::new(DomainId::FIRST, format!("product-{id}"), price(1000, 1210))
        .available(true)
}

/// A visible, available product with one main image
pub fn product(id: u64) -> SnapshotProduct {
    SnapshotProduct::new(entry(id))
        .with_listing(listing(id))
        .with_image(StoredImage::present(Image::new(ImageId::new(id * 100), 0)))
}

pub fn snapshot(products: Vec<SnapshotProduct>) -> CatalogSnapshot {
    CatalogSnapshot {
        domains: vec![SnapshotDomain {
            config: domain(),
            currency: Currency::new("EUR").unwrap(),
            default_pricing_group: Some(pricing_group()),
        }],
        products,
    }
}

pub fn catalog(products: Vec<SnapshotProduct>) -> Arc<MemoryCatalog> {
    Arc::new(MemoryCatalog::from_snapshot(snapshot(products)).unwrap())
}

pub fn services(store: &Arc<MemoryCatalog>) -> CatalogServices {
    CatalogServices::from_store(store.clone())
}

pub fn image_url(image_id: u64) -> String {
    format!("{BASE_URL}/content/images/product/{image_id}.jpg?width=1024&height=1024")
}
