//! Domain error types
//!
//! This module defines the error hierarchy for the feed exporter.
//! Errors are domain-specific and don't expose collaborator implementation types.

use super::ids::{ImageId, ProductId};
use thiserror::Error;

/// Main feed error type
///
/// Every error of this type halts the current page. Recoverable attribute
/// problems (a missing gallery image) never surface as a `FeedError`.
#[derive(Debug, Error)]
pub enum FeedError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Catalog store errors
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Price resolution failed for a product
    #[error("Pricing error: {0}")]
    Pricing(String),

    /// Category path resolution failed for a product
    #[error("Category error: {0}")]
    Category(String),

    /// A batch-loaded attribute was read for a product outside the prefetched page
    #[error("{kind} was not prefetched for product {product_id}")]
    AttributeNotLoaded {
        product_id: ProductId,
        kind: AttributeKind,
    },

    /// Record assembly failed for a product
    #[error("Failed to assemble record for product {product_id}: {message}")]
    Record {
        product_id: ProductId,
        message: String,
    },

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Export loop errors
    #[error("Export error: {0}")]
    Export(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Catalog store errors
///
/// Raised by the collaborators behind [`crate::adapters::catalog`].
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A page or lookup query failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// A bulk attribute lookup failed
    #[error("Batch load of {kind} failed: {message}")]
    BatchLoadFailed { kind: AttributeKind, message: String },

    /// No default pricing group is configured for the domain
    #[error("Default pricing group not found for domain {0}")]
    PricingGroupNotFound(String),

    /// No default currency is configured for the domain
    #[error("Default currency not found for domain {0}")]
    CurrencyNotFound(String),

    /// Product does not exist
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Domain does not exist
    #[error("Domain not found: {0}")]
    DomainNotFound(String),
}

/// Image store errors
#[derive(Debug, Error)]
pub enum ImageError {
    /// Image is registered but its file is absent from storage
    #[error("Image with id \"{image_id}\" not found on filesystem")]
    NotFound { image_id: ImageId },

    /// Any other storage failure
    #[error("Image storage error: {0}")]
    Storage(String),
}

/// Kind of per-product attribute that is loaded in bulk for a page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeKind {
    /// Canonical product URL
    Url,
    /// Resized main image URL
    ImageUrl,
    /// Parameter name/value map
    Parameters,
}

impl AttributeKind {
    /// Returns the attribute kind as a log-friendly string
    pub fn as_str(&self) -> &'static str {
        match self {
            AttributeKind::Url => "url",
            AttributeKind::ImageUrl => "image_url",
            AttributeKind::Parameters => "parameters",
        }
    }
}

impl std::fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<ImageError> for FeedError {
    fn from(err: ImageError) -> Self {
        FeedError::Io(err.to_string())
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for FeedError {
    fn from(err: std::io::Error) -> Self {
        FeedError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for FeedError {
    fn from(err: serde_json::Error) -> Self {
        FeedError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for FeedError {
    fn from(err: toml::de::Error) -> Self {
        FeedError::Configuration(format!("TOML parse error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_error_display() {
        let err = FeedError::Configuration("Invalid config".to_string());
        assert_eq!(err.to_string(), "Configuration error: Invalid config");
    }

    #[test]
    fn test_catalog_error_conversion() {
        let catalog_err = CatalogError::QueryFailed("connection reset".to_string());
        let feed_err: FeedError = catalog_err.into();
        assert!(matches!(feed_err, FeedError::Catalog(_)));
        assert_eq!(
            feed_err.to_string(),
            "Catalog error: Query failed: connection reset"
        );
    }

    #[test]
    fn test_attribute_not_loaded_display() {
        let err = FeedError::AttributeNotLoaded {
            product_id: ProductId::new(12),
            kind: AttributeKind::Parameters,
        };
        assert_eq!(err.to_string(), "parameters was not prefetched for product 12");
    }

    #[test]
    fn test_image_not_found_display() {
        let err = ImageError::NotFound {
            image_id: ImageId::new(5),
        };
        assert_eq!(err.to_string(), "Image with id \"5\" not found on filesystem");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let feed_err: FeedError = io_err.into();
        assert!(matches!(feed_err, FeedError::Io(_)));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let feed_err: FeedError = json_err.into();
        assert!(matches!(feed_err, FeedError::Serialization(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let feed_err: FeedError = toml_err.into();
        assert!(matches!(feed_err, FeedError::Configuration(_)));
        assert!(feed_err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn test_feed_error_implements_std_error() {
        let err = FeedError::Validation("Test error".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
