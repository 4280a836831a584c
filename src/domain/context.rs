//! Storefront domain context
//!
//! A merchant runs one or more storefront domains, each with its own URL,
//! locale, default currency and pricing groups. Every export runs against
//! exactly one domain.

use super::ids::DomainId;
use serde::{Deserialize, Serialize};

/// Configuration of a single storefront domain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainConfig {
    /// Domain identifier
    pub id: DomainId,

    /// Base URL of the storefront (e.g. "https://example.com")
    pub url: String,

    /// Locale used for product names (e.g. "en")
    pub locale: String,

    /// Human readable domain name
    #[serde(default)]
    pub name: Option<String>,
}

impl DomainConfig {
    /// Create a new domain configuration
    pub fn new(id: DomainId, url: impl Into<String>, locale: impl Into<String>) -> Self {
        Self {
            id,
            url: url.into(),
            locale: locale.into(),
            name: None,
        }
    }

    /// Set the domain name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Base URL without a trailing slash
    pub fn base_url(&self) -> &str {
        self.url.trim_end_matches('/')
    }
}
