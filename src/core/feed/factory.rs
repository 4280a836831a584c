//! Export record assembly
//!
//! The factory turns one catalog entry into one [`ExportRecord`]. Everything it
//! needs is either an already-cached business rule (price, availability,
//! category, images) or comes from the page's [`PageAttributes`], so assembly
//! never performs a per-entry bulk lookup.
//!
//! A missing gallery image file is the only recoverable problem: it is logged,
//! reported as a [`RecordWarning`] and left out of the gallery. Every other
//! failure is returned as an error and halts the page.

use super::image::ImageSizeLimit;
use super::loaders::PageAttributes;
use crate::adapters::catalog::{
    AvailabilityChecker, CatalogServices, CategoryPathResolver, CurrencyResolver,
    CustomerPriceCalculator, ImageStore, ProductPriceCalculator,
};
use crate::domain::errors::ImageError;
use crate::domain::ids::{ImageId, ProductId};
use crate::domain::product::SHORT_DESCRIPTION_SLOTS;
use crate::domain::{
    Availability, CatalogEntry, DomainConfig, ExportRecord, FeedError, PricingGroup, Result,
};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Default delivery days for products that are out of stock
pub const DEFAULT_OUT_OF_STOCK_DELIVERY_DAYS: u32 = 10;

/// Host-supplied settings for record assembly
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedSettings {
    /// Delivery days reported for products that are not in stock
    pub out_of_stock_delivery_days: u32,
    /// Size limit applied to exported image URLs
    pub image_limit: ImageSizeLimit,
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            out_of_stock_delivery_days: DEFAULT_OUT_OF_STOCK_DELIVERY_DAYS,
            image_limit: ImageSizeLimit::default(),
        }
    }
}

/// A non-fatal problem found while assembling a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordWarning {
    /// An image is registered but its file is missing from storage
    MissingImage {
        product_id: ProductId,
        image_id: ImageId,
    },
}

/// Assembles export records from catalog entries
#[derive(Clone)]
pub struct RecordFactory {
    currencies: Arc<dyn CurrencyResolver>,
    prices: Arc<dyn ProductPriceCalculator>,
    customer_prices: Arc<dyn CustomerPriceCalculator>,
    availability: Arc<dyn AvailabilityChecker>,
    categories: Arc<dyn CategoryPathResolver>,
    images: Arc<dyn ImageStore>,
    settings: FeedSettings,
}

impl RecordFactory {
    /// Create a factory over the catalog services
    pub fn new(services: &CatalogServices, settings: FeedSettings) -> Self {
        Self {
            currencies: services.currencies.clone(),
            prices: services.prices.clone(),
            customer_prices: services.customer_prices.clone(),
            availability: services.availability.clone(),
            categories: services.categories.clone(),
            images: services.images.clone(),
            settings,
        }
    }

    pub fn settings(&self) -> &FeedSettings {
        &self.settings
    }

    /// Assemble the record for one entry
    pub fn assemble(
        &self,
        entry: &CatalogEntry,
        domain: &DomainConfig,
        pricing_group: &PricingGroup,
        attributes: &PageAttributes,
    ) -> Result<ExportRecord> {
        self.assemble_reporting(entry, domain, pricing_group, attributes)
            .map(|(record, _)| record)
    }

    /// Assemble the record for one entry, returning the non-fatal warnings too
    pub fn assemble_reporting(
        &self,
        entry: &CatalogEntry,
        domain: &DomainConfig,
        pricing_group: &PricingGroup,
        attributes: &PageAttributes,
    ) -> Result<(ExportRecord, Vec<RecordWarning>)> {
        let currency = self.currencies.domain_default_currency(domain.id)?;
        let price_currency = pricing_group.currency.as_ref().unwrap_or(&currency);

        let price = self
            .prices
            .calculate_price(entry, domain.id, pricing_group)?
            .price();
        let high_product_price = self
            .customer_prices
            .calculate_price_for_customer(entry, domain.id)?
            .price();

        let category_path = self.categories.category_names_from_root(entry, domain)?;

        let short_description_usp = (0..SHORT_DESCRIPTION_SLOTS)
            .filter_map(|slot| entry.short_description_usp(domain.id, slot));

        let availability = Availability::from_available(
            self.availability
                .is_available_on_domain_cached(entry, domain.id),
        );
        let delivery_days = if availability.is_in_stock() {
            0
        } else {
            self.settings.out_of_stock_delivery_days
        };

        let (gallery_image_urls, warnings) = self.gallery_image_urls(entry, domain)?;

        let record = ExportRecord::builder()
            .id(entry.id)
            .product_no(entry.catnum.clone())
            .name(entry.full_name(&domain.locale))
            .url(attributes.url_for(entry)?)
            .category_path(category_path)
            .short_description_usp(short_description_usp)
            .description(entry.description(domain.id).map(str::to_string))
            .delivery_days(delivery_days)
            .price(price)
            .high_product_price(high_product_price)
            .price_currency_code(price_currency.code())
            .currency_code(currency.code())
            .gallery_image_urls(gallery_image_urls)
            .image_url(attributes.resized_image_url_for(entry)?.map(str::to_string))
            .parameters(attributes.parameters_for(entry)?)
            .flags(BTreeSet::new())
            .availability(availability)
            .brand_name(entry.brand.as_ref().map(|brand| brand.name.clone()))
            .main_variant_id(entry.main_variant_id)
            .build()
            .map_err(|message| FeedError::Record {
                product_id: entry.id,
                message,
            })?;

        Ok((record, warnings))
    }

    /// Secondary image URLs; the first image is the main image and is skipped
    fn gallery_image_urls(
        &self,
        entry: &CatalogEntry,
        domain: &DomainConfig,
    ) -> Result<(Vec<String>, Vec<RecordWarning>)> {
        let mut urls = Vec::new();
        let mut warnings = Vec::new();

        for image in self.images.images_for_product(entry.id)?.iter().skip(1) {
            match self.images.image_url(domain, image) {
                Ok(url) => urls.push(self.settings.image_limit.apply(&url)),
                Err(ImageError::NotFound { image_id }) => {
                    tracing::warn!(
                        product_id = %entry.id,
                        image_id = %image_id,
                        "Image not found on filesystem, skipped in gallery"
                    );
                    warnings.push(RecordWarning::MissingImage {
                        product_id: entry.id,
                        image_id,
                    });
                }
                Err(e) => return Err(e.into()),
            }
        }

        Ok((urls, warnings))
    }
}

impl std::fmt::Debug for RecordFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordFactory")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}
