//! Catalog store abstraction
//!
//! This module defines the capabilities the feed consumes from the catalog
//! store and bundles them into [`CatalogServices`], so a whole store can be
//! swapped for a stand-in in tests.

pub mod traits;

pub use traits::{
    AvailabilityChecker, CatalogPageSource, CategoryPathResolver, CurrencyResolver,
    CustomerPriceCalculator, ImageStore, PricingGroupSettings, ProductParameterQuery,
    ProductPriceCalculator, ProductUrlQuery, ProductUrls,
};

use std::sync::Arc;

/// All catalog store collaborators used by the feed pipeline
#[derive(Clone)]
pub struct CatalogServices {
    pub page_source: Arc<dyn CatalogPageSource>,
    pub pricing_groups: Arc<dyn PricingGroupSettings>,
    pub urls: Arc<dyn ProductUrlQuery>,
    pub parameters: Arc<dyn ProductParameterQuery>,
    pub currencies: Arc<dyn CurrencyResolver>,
    pub prices: Arc<dyn ProductPriceCalculator>,
    pub customer_prices: Arc<dyn CustomerPriceCalculator>,
    pub availability: Arc<dyn AvailabilityChecker>,
    pub categories: Arc<dyn CategoryPathResolver>,
    pub images: Arc<dyn ImageStore>,
}

impl CatalogServices {
    /// Bundle a single store that implements every capability
    pub fn from_store<S>(store: Arc<S>) -> Self
    where
        S: CatalogPageSource
            + PricingGroupSettings
            + ProductUrlQuery
            + ProductParameterQuery
            + CurrencyResolver
            + ProductPriceCalculator
            + CustomerPriceCalculator
            + AvailabilityChecker
            + CategoryPathResolver
            + ImageStore
            + 'static,
    {
        Self {
            page_source: store.clone(),
            pricing_groups: store.clone(),
            urls: store.clone(),
            parameters: store.clone(),
            currencies: store.clone(),
            prices: store.clone(),
            customer_prices: store.clone(),
            availability: store.clone(),
            categories: store.clone(),
            images: store,
        }
    }
}

impl std::fmt::Debug for CatalogServices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogServices").finish_non_exhaustive()
    }
}
