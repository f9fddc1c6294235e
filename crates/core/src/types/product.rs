//! Typed product descriptors.
//!
//! A descriptor is the display data of one product card, adapted out of
//! markup by the behavior crate. A product is shown with either a single
//! flat price or a size-choice control; presence of all four tier prices is
//! the discriminator.

use serde::{Deserialize, Serialize};

use super::price::DisplayPrice;
use super::size::SizeTier;

/// Per-tier prices for a multi-size product. Absent tiers are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierPrices {
    pub normal: Option<DisplayPrice>,
    pub medium: Option<DisplayPrice>,
    pub large: Option<DisplayPrice>,
    pub venti: Option<DisplayPrice>,
}

impl TierPrices {
    /// Price for one tier, if the markup carried it.
    #[must_use]
    pub fn get(&self, tier: SizeTier) -> Option<&DisplayPrice> {
        match tier {
            SizeTier::Normal => self.normal.as_ref(),
            SizeTier::Medium => self.medium.as_ref(),
            SizeTier::Large => self.large.as_ref(),
            SizeTier::Venti => self.venti.as_ref(),
        }
    }

    /// A product is multi-size only when every tier price is present.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.normal.is_some()
            && self.medium.is_some()
            && self.large.is_some()
            && self.venti.is_some()
    }
}

/// Display attributes of one product card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDescriptor {
    pub name: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub flat_price: Option<DisplayPrice>,
    pub tiers: TierPrices,
}

impl ProductDescriptor {
    /// Whether the detail view shows the size-choice control.
    #[must_use]
    pub fn is_multi_size(&self) -> bool {
        self.tiers.is_complete()
    }

    /// Price charged for the given size choice, if any.
    ///
    /// With a selected tier, that tier's price (placeholder when the markup
    /// never carried it). With no selection, falls back through the flat
    /// price, then normal, medium, large, venti, then the placeholder.
    #[must_use]
    pub fn effective_price(&self, selection: Option<SizeTier>) -> DisplayPrice {
        if let Some(tier) = selection {
            return self.tiers.get(tier).cloned().unwrap_or_default();
        }
        self.flat_price
            .as_ref()
            .or_else(|| self.tiers.get(SizeTier::Normal))
            .or_else(|| self.tiers.get(SizeTier::Medium))
            .or_else(|| self.tiers.get(SizeTier::Large))
            .or_else(|| self.tiers.get(SizeTier::Venti))
            .cloned()
            .unwrap_or_default()
    }

    /// Cart line name; a chosen size is appended in parentheses.
    #[must_use]
    pub fn line_item_name(&self, selection: Option<SizeTier>) -> String {
        match selection {
            Some(tier) => format!("{} ({})", self.name, tier.label()),
            None => self.name.clone(),
        }
    }
}
