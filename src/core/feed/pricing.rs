//! Pricing context resolution

use crate::adapters::catalog::PricingGroupSettings;
use crate::domain::{DomainConfig, PricingGroup, Result};
use std::sync::Arc;

/// Resolves the pricing group an export runs under
#[derive(Clone)]
pub struct PricingContextResolver {
    settings: Arc<dyn PricingGroupSettings>,
}

impl PricingContextResolver {
    pub fn new(settings: Arc<dyn PricingGroupSettings>) -> Self {
        Self { settings }
    }

    /// Default pricing group of the domain
    pub async fn resolve(&self, domain: &DomainConfig) -> Result<PricingGroup> {
        let pricing_group = self.settings.default_pricing_group(domain.id).await?;

        tracing::debug!(
            domain_id = %domain.id,
            pricing_group_id = %pricing_group.id,
            pricing_group = %pricing_group.name,
            "Resolved pricing context"
        );

        Ok(pricing_group)
    }
}
