//! Export record model
//!
//! An `ExportRecord` is the flattened, feed-ready representation of one
//! catalog entry. It is assembled once per entry by the record factory and
//! never mutated afterwards; all fields are private behind accessors.

use super::ids::ProductId;
use super::pricing::Price;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Separator used when rendering the category path
pub const CATEGORY_PATH_SEPARATOR: &str = " > ";

/// Separator used when rendering the short description bullets
pub const SHORT_DESCRIPTION_SEPARATOR: &str = ". ";

/// Stock availability of an exported product
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Availability {
    /// Product is available on the domain
    #[serde(rename = "in stock")]
    InStock,
    /// Product is not available on the domain
    #[serde(rename = "out of stock")]
    OutOfStock,
}

impl Availability {
    /// Map a cached availability flag to the feed state
    pub fn from_available(available: bool) -> Self {
        if available {
            Availability::InStock
        } else {
            Availability::OutOfStock
        }
    }

    /// Feed representation of the availability
    pub fn as_str(&self) -> &'static str {
        match self {
            Availability::InStock => "in stock",
            Availability::OutOfStock => "out of stock",
        }
    }

    /// Whether the product is in stock
    pub fn is_in_stock(&self) -> bool {
        matches!(self, Availability::InStock)
    }
}

impl std::fmt::Display for Availability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Feed-ready record for a single catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportRecord {
    id: ProductId,
    product_no: String,
    name: String,
    url: String,
    category_path: Vec<String>,
    short_description_usp: Vec<String>,
    description: Option<String>,
    delivery_days: u32,
    price: Price,
    high_product_price: Price,
    price_currency_code: String,
    currency_code: String,
    gallery_image_urls: Vec<String>,
    image_url: Option<String>,
    parameters: BTreeMap<String, String>,
    flags: BTreeSet<String>,
    availability: Availability,
    brand_name: Option<String>,
    main_variant_id: Option<ProductId>,
}

impl ExportRecord {
    /// Creates a new builder for constructing an ExportRecord
    pub fn builder() -> ExportRecordBuilder {
        ExportRecordBuilder::default()
    }

    /// Product id
    pub fn id(&self) -> ProductId {
        self.id
    }

    /// Seek cursor for the next page (always equal to the id)
    pub fn seek_id(&self) -> ProductId {
        self.id
    }

    /// Catalog number
    pub fn product_no(&self) -> &str {
        &self.product_no
    }

    /// Product name in the domain locale
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Canonical product URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Category names from root to the main category
    pub fn category_names(&self) -> &[String] {
        &self.category_path
    }

    /// Rendered category path (e.g. "Electronics > TV")
    ///
    /// ```
    /// use catalog_feed::domain::record::ExportRecord;
    /// # use catalog_feed::domain::ids::ProductId;
    /// # use catalog_feed::domain::pricing::Price;
    ///
    /// let record = ExportRecord::builder()
    /// #   .id(ProductId::new(1)).product_no("n").name("n").url("u")
    /// #   .price(Price::zero()).high_product_price(Price::zero()).currency_code("EUR")
    ///     .category_path(vec!["A".to_string(), "B".to_string()])
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(record.category_path(), "A > B");
    /// ```
    pub fn category_path(&self) -> String {
        self.category_path.join(CATEGORY_PATH_SEPARATOR)
    }

    /// Short description bullets, empty slots already removed
    pub fn short_description_points(&self) -> &[String] {
        &self.short_description_usp
    }

    /// Rendered short description (bullets joined by ". ")
    pub fn short_description(&self) -> String {
        self.short_description_usp.join(SHORT_DESCRIPTION_SEPARATOR)
    }

    /// Long description
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Delivery days (0 when in stock)
    pub fn delivery_days(&self) -> u32 {
        self.delivery_days
    }

    /// Catalog price for the pricing group
    ///
    /// Both prices are amounts in [`price_currency_code`](Self::price_currency_code),
    /// which is not necessarily the domain default currency.
    pub fn price(&self) -> Price {
        self.price
    }

    /// Reference ("high") price
    pub fn high_product_price(&self) -> Price {
        self.high_product_price
    }

    /// ISO code of the pricing group's currency
    pub fn price_currency_code(&self) -> &str {
        &self.price_currency_code
    }

    /// ISO code of the domain default currency
    pub fn currency_code(&self) -> &str {
        &self.currency_code
    }

    /// Secondary image URLs, primary image excluded
    pub fn gallery_image_urls(&self) -> &[String] {
        &self.gallery_image_urls
    }

    /// Resized primary image URL
    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    /// Parameter values keyed by parameter name
    pub fn parameters(&self) -> &BTreeMap<String, String> {
        &self.parameters
    }

    /// Merchandising flags
    pub fn flags(&self) -> &BTreeSet<String> {
        &self.flags
    }

    /// Availability state
    pub fn availability(&self) -> Availability {
        self.availability
    }

    /// Brand name
    pub fn brand_name(&self) -> Option<&str> {
        self.brand_name.as_deref()
    }

    /// Id of the main variant when this product is a variant
    pub fn main_variant_id(&self) -> Option<ProductId> {
        self.main_variant_id
    }
}

/// Builder for constructing ExportRecord instances
#[derive(Debug, Default)]
pub struct ExportRecordBuilder {
    id: Option<ProductId>,
    product_no: Option<String>,
    name: Option<String>,
    url: Option<String>,
    category_path: Vec<String>,
    short_description_usp: Vec<String>,
    description: Option<String>,
    delivery_days: u32,
    price: Option<Price>,
    high_product_price: Option<Price>,
    price_currency_code: Option<String>,
    currency_code: Option<String>,
    gallery_image_urls: Vec<String>,
    image_url: Option<String>,
    parameters: BTreeMap<String, String>,
    flags: BTreeSet<String>,
    availability: Option<Availability>,
    brand_name: Option<String>,
    main_variant_id: Option<ProductId>,
}

impl ExportRecordBuilder {
    /// Sets the product id
    pub fn id(mut self, id: ProductId) -> Self {
        self.id = Some(id);
        self
    }

    /// Sets the catalog number
    pub fn product_no(mut self, product_no: impl Into<String>) -> Self {
        self.product_no = Some(product_no.into());
        self
    }

    /// Sets the product name
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the canonical URL
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Sets the category names from root to main category
    pub fn category_path(mut self, category_path: Vec<String>) -> Self {
        self.category_path = category_path;
        self
    }

    /// Sets the short description bullets; blank bullets are dropped
    pub fn short_description_usp<I, S>(mut self, bullets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.short_description_usp = bullets
            .into_iter()
            .map(Into::into)
            .filter(|usp: &String| !usp.trim().is_empty())
            .collect();
        self
    }

    /// Sets the long description
    pub fn description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    /// Sets the delivery days
    pub fn delivery_days(mut self, delivery_days: u32) -> Self {
        self.delivery_days = delivery_days;
        self
    }

    /// Sets the catalog price
    pub fn price(mut self, price: Price) -> Self {
        self.price = Some(price);
        self
    }

    /// Sets the reference price
    pub fn high_product_price(mut self, price: Price) -> Self {
        self.high_product_price = Some(price);
        self
    }

    /// Sets the currency of both prices
    pub fn price_currency_code(mut self, code: impl Into<String>) -> Self {
        self.price_currency_code = Some(code.into());
        self
    }

    /// Sets the domain default currency code
    pub fn currency_code(mut self, code: impl Into<String>) -> Self {
        self.currency_code = Some(code.into());
        self
    }

    /// Sets the gallery image URLs
    pub fn gallery_image_urls(mut self, urls: Vec<String>) -> Self {
        self.gallery_image_urls = urls;
        self
    }

    /// Sets the primary image URL
    pub fn image_url(mut self, url: Option<String>) -> Self {
        self.image_url = url;
        self
    }

    /// Sets the parameters
    pub fn parameters(mut self, parameters: BTreeMap<String, String>) -> Self {
        self.parameters = parameters;
        self
    }

    /// Sets the merchandising flags
    pub fn flags(mut self, flags: BTreeSet<String>) -> Self {
        self.flags = flags;
        self
    }

    /// Sets the availability
    pub fn availability(mut self, availability: Availability) -> Self {
        self.availability = Some(availability);
        self
    }

    /// Sets the brand name
    pub fn brand_name(mut self, brand_name: Option<String>) -> Self {
        self.brand_name = brand_name;
        self
    }

    /// Sets the main variant id
    pub fn main_variant_id(mut self, main_variant_id: Option<ProductId>) -> Self {
        self.main_variant_id = main_variant_id;
        self
    }

    /// Builds the ExportRecord
    ///
    /// Availability defaults to out of stock when not set.
    /// Price currency defaults to the domain currency when not set.
    ///
    /// # Errors
    ///
    /// Returns an error if an identity, URL, price or currency field is missing
    pub fn build(self) -> Result<ExportRecord, String> {
        let currency_code = self.currency_code.ok_or("currency_code is required")?;
        Ok(ExportRecord {
            id: self.id.ok_or("id is required")?,
            product_no: self.product_no.ok_or("product_no is required")?,
            name: self.name.ok_or("name is required")?,
            url: self.url.ok_or("url is required")?,
            category_path: self.category_path,
            short_description_usp: self.short_description_usp,
            description: self.description,
            delivery_days: self.delivery_days,
            price: self.price.ok_or("price is required")?,
            high_product_price: self
                .high_product_price
                .ok_or("high_product_price is required")?,
            price_currency_code: self
                .price_currency_code
                .unwrap_or_else(|| currency_code.clone()),
            currency_code,
            gallery_image_urls: self.gallery_image_urls,
            image_url: self.image_url,
            parameters: self.parameters,
            flags: self.flags,
            availability: self.availability.unwrap_or(Availability::OutOfStock),
            brand_name: self.brand_name,
            main_variant_id: self.main_variant_id,
        })
    }
}
