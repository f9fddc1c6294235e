//! Size tiers offered for multi-size menu products.

use serde::{Deserialize, Serialize};

/// One of the fixed product size options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeTier {
    Normal,
    Medium,
    Large,
    Venti,
}

impl SizeTier {
    /// All tiers, in display order.
    pub const ALL: [Self; 4] = [Self::Normal, Self::Medium, Self::Large, Self::Venti];

    /// Lowercase label used in markup attributes and line-item names.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Medium => "medium",
            Self::Large => "large",
            Self::Venti => "venti",
        }
    }

    /// Parse a markup label back into a tier.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tier| tier.label() == label)
    }
}
