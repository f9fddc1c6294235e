//! Adaptation layer from product-card markup to typed descriptors.
//!
//! Product cards expose their display data as `data-*` attributes. This
//! module is the only place that knows those attribute names; everything
//! downstream works on [`ProductDescriptor`] and never sees raw markup.

use std::collections::HashMap;

use thiserror::Error;

use copper_kettle_core::{DisplayPrice, ProductDescriptor, SizeTier, TierPrices};

/// Attribute carrying the product name (required).
pub const ATTR_NAME: &str = "data-name";
/// Attribute carrying the product description.
pub const ATTR_DESC: &str = "data-desc";
/// Attribute carrying the product image reference.
pub const ATTR_IMAGE: &str = "data-image";
/// Attribute carrying a flat display price.
pub const ATTR_PRICE: &str = "data-price";

/// Errors adapting a product source element.
#[derive(Debug, Error)]
pub enum MarkupError {
    /// The card carried no usable product name.
    #[error("product source has no name")]
    MissingName,
}

/// The attribute map of one product card.
#[derive(Debug, Clone, Default)]
pub struct ProductSource {
    attributes: HashMap<String, String>,
}

impl ProductSource {
    #[must_use]
    pub fn new(attributes: HashMap<String, String>) -> Self {
        Self { attributes }
    }

    /// Build a source from attribute pairs.
    #[must_use]
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        Self::new(
            pairs
                .iter()
                .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
                .collect(),
        )
    }

    /// Look up one attribute, treating blank values as absent.
    fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .get(name)
            .map(String::as_str)
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }

    fn tier_price(&self, tier: SizeTier) -> Option<DisplayPrice> {
        self.attr(&format!("data-price-{}", tier.label()))
            .map(|value| DisplayPrice::Text(value.to_string()))
    }

    /// Adapt the attribute map into a typed descriptor.
    ///
    /// Only the name is required; every other field defaults silently.
    ///
    /// # Errors
    ///
    /// Returns [`MarkupError::MissingName`] when the name attribute is
    /// missing or blank.
    pub fn descriptor(&self) -> Result<ProductDescriptor, MarkupError> {
        let name = self.attr(ATTR_NAME).ok_or(MarkupError::MissingName)?;

        Ok(ProductDescriptor {
            name: name.to_string(),
            description: self.attr(ATTR_DESC).map(ToString::to_string),
            image: self.attr(ATTR_IMAGE).map(ToString::to_string),
            flat_price: self
                .attr(ATTR_PRICE)
                .map(|value| DisplayPrice::Text(value.to_string())),
            tiers: TierPrices {
                normal: self.tier_price(SizeTier::Normal),
                medium: self.tier_price(SizeTier::Medium),
                large: self.tier_price(SizeTier::Large),
                venti: self.tier_price(SizeTier::Venti),
            },
        })
    }
}
