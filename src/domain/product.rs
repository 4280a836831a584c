//! Catalog entry domain model
//!
//! A `CatalogEntry` is the product as the catalog store hands it to the feed:
//! identity, translated names, per-domain texts, brand and variant linkage.
//! Derived attributes (prices, URLs, images, parameters) live behind the
//! collaborators in [`crate::adapters::catalog`].

use super::ids::{DomainId, ImageId, ProductId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Number of short description bullet slots on a product
pub const SHORT_DESCRIPTION_SLOTS: usize = 5;

/// Product brand
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brand {
    /// Brand name
    pub name: String,
}

impl Brand {
    /// Create a new brand
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Per-domain texts of a product
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDomainData {
    /// Domain these texts belong to
    pub domain_id: DomainId,

    /// Long description
    #[serde(default)]
    pub description: Option<String>,

    /// Short description bullet slots, in display order
    #[serde(default)]
    pub short_description_usp: [Option<String>; SHORT_DESCRIPTION_SLOTS],
}

impl ProductDomainData {
    /// Create empty texts for a domain
    pub fn new(domain_id: DomainId) -> Self {
        Self {
            domain_id,
            ..Self::default()
        }
    }
}

/// A product image reference
///
/// The file behind an image may be missing from storage even though the
/// image itself is registered; see [`crate::domain::errors::ImageError`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    /// Image identifier
    pub id: ImageId,

    /// Presentation rank, lowest first
    pub position: u32,

    /// File extension (e.g. "jpg")
    #[serde(default = "default_image_extension")]
    pub extension: String,
}

impl Image {
    /// Create a new image reference
    pub fn new(id: ImageId, position: u32) -> Self {
        Self {
            id,
            position,
            extension: default_image_extension(),
        }
    }
}

fn default_image_extension() -> String {
    "jpg".to_string()
}

/// A product as stored in the catalog
///
/// # Examples
///
/// ```
/// use catalog_feed::domain::product::CatalogEntry;
/// use catalog_feed::domain::ids::{DomainId, ProductId};
///
/// let entry = CatalogEntry::builder()
///     .id(ProductId::new(1))
///     .catnum("catnum")
///     .name("en", "product name")
///     .short_description_usp(DomainId::FIRST, 0, "short description usp 1")
///     .build()
///     .unwrap();
///
/// assert_eq!(entry.full_name("en"), "product name");
/// assert!(!entry.is_variant());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Product identifier, also the seek cursor
    pub id: ProductId,

    /// Catalog number (external product code)
    pub catnum: String,

    /// Product names keyed by locale
    pub names: BTreeMap<String, String>,

    /// Named variant suffix appended to the name (e.g. "XL")
    #[serde(default)]
    pub variant_alias: Option<String>,

    /// Per-domain texts
    #[serde(default)]
    pub domain_data: Vec<ProductDomainData>,

    /// Brand (optional)
    #[serde(default)]
    pub brand: Option<Brand>,

    /// Id of the main variant when this product is a variant
    #[serde(default)]
    pub main_variant_id: Option<ProductId>,
}

impl CatalogEntry {
    /// Creates a new builder for constructing a CatalogEntry
    pub fn builder() -> CatalogEntryBuilder {
        CatalogEntryBuilder::default()
    }

    /// Full product name in the given locale
    ///
    /// Falls back to the alphabetically first available translation when the
    /// locale is missing, and to an empty string when there are no names.
    pub fn full_name(&self, locale: &str) -> String {
        let name = self
            .names
            .get(locale)
            .or_else(|| self.names.values().next())
            .map(String::as_str)
            .unwrap_or_default();

        match self.variant_alias.as_deref() {
            Some(alias) if !alias.trim().is_empty() => format!("{name} {alias}"),
            _ => name.to_string(),
        }
    }

    /// Texts for the given domain, if any
    pub fn domain_data(&self, domain_id: DomainId) -> Option<&ProductDomainData> {
        self.domain_data.iter().find(|d| d.domain_id == domain_id)
    }

    /// Long description on the given domain
    pub fn description(&self, domain_id: DomainId) -> Option<&str> {
        self.domain_data(domain_id)
            .and_then(|d| d.description.as_deref())
    }

    /// Short description bullet in the given slot (0-based)
    pub fn short_description_usp(&self, domain_id: DomainId, slot: usize) -> Option<&str> {
        self.domain_data(domain_id)
            .and_then(|d| d.short_description_usp.get(slot))
            .and_then(|usp| usp.as_deref())
    }

    /// Whether this product is a variant of another product
    pub fn is_variant(&self) -> bool {
        self.main_variant_id.is_some()
    }
}

/// Builder for constructing CatalogEntry instances
#[derive(Debug, Default)]
pub struct CatalogEntryBuilder {
    id: Option<ProductId>,
    catnum: Option<String>,
    names: BTreeMap<String, String>,
    variant_alias: Option<String>,
    domain_data: Vec<ProductDomainData>,
    brand: Option<Brand>,
    main_variant_id: Option<ProductId>,
}

impl CatalogEntryBuilder {
    /// Creates a new CatalogEntryBuilder
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the product id
    pub fn id(mut self, id: ProductId) -> Self {
        self.id = Some(id);
        self
    }

    /// Sets the catalog number
    pub fn catnum(mut self, catnum: impl Into<String>) -> Self {
        self.catnum = Some(catnum.into());
        self
    }

    /// Adds a translated name
    pub fn name(mut self, locale: impl Into<String>, name: impl Into<String>) -> Self {
        self.names.insert(locale.into(), name.into());
        self
    }

    /// Sets the variant alias
    pub fn variant_alias(mut self, alias: impl Into<String>) -> Self {
        self.variant_alias = Some(alias.into());
        self
    }

    /// Sets the long description on a domain
    pub fn description(mut self, domain_id: DomainId, description: impl Into<String>) -> Self {
        self.domain_data_mut(domain_id).description = Some(description.into());
        self
    }

    /// Sets a short description bullet (slot is 0-based, out of range slots are ignored)
    pub fn short_description_usp(
        mut self,
        domain_id: DomainId,
        slot: usize,
        usp: impl Into<String>,
    ) -> Self {
        if let Some(target) = self
            .domain_data_mut(domain_id)
            .short_description_usp
            .get_mut(slot)
        {
            *target = Some(usp.into());
        }
        self
    }

    /// Sets the brand
    pub fn brand(mut self, brand: Brand) -> Self {
        self.brand = Some(brand);
        self
    }

    /// Marks the product as a variant of the given main variant
    pub fn main_variant_id(mut self, main_variant_id: ProductId) -> Self {
        self.main_variant_id = Some(main_variant_id);
        self
    }

    fn domain_data_mut(&mut self, domain_id: DomainId) -> &mut ProductDomainData {
        let index = match self
            .domain_data
            .iter()
            .position(|d| d.domain_id == domain_id)
        {
            Some(index) => index,
            None => {
                self.domain_data.push(ProductDomainData::new(domain_id));
                self.domain_data.len() - 1
            }
        };
        &mut self.domain_data[index]
    }

    /// Builds the CatalogEntry
    ///
    /// # Errors
    ///
    /// Returns an error if the id or catalog number is missing
    pub fn build(self) -> Result<CatalogEntry, String> {
        Ok(CatalogEntry {
            id: self.id.ok_or("id is required")?,
            catnum: self.catnum.ok_or("catnum is required")?,
            names: self.names,
            variant_alias: self.variant_alias,
            domain_data: self.domain_data,
            brand: self.brand,
            main_variant_id: self.main_variant_id,
        })
    }
}
