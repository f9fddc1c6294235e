//! Display-price representation and tolerant price parsing.
//!
//! Menu markup carries prices as display text (e.g. `"$6.50"`); persisted
//! carts may hold either that text or a bare number. Both shapes flow
//! through [`DisplayPrice`], and every numeric computation goes through
//! [`parse_amount`], which degrades malformed input to zero instead of
//! erroring.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Display used when a product carries no usable price.
pub const PLACEHOLDER: &str = "$0.00";

/// A price as it appears in menu markup or a persisted cart.
///
/// `Text` keeps the raw display string; `Amount` is a bare number.
/// Serialized untagged so persisted carts accept both shapes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DisplayPrice {
    Text(String),
    Amount(Decimal),
}

impl DisplayPrice {
    /// The `"$0.00"` fallback used when a price is absent.
    #[must_use]
    pub fn placeholder() -> Self {
        Self::Text(PLACEHOLDER.to_string())
    }

    /// Numeric value of this price; zero when unparsable.
    #[must_use]
    pub fn amount(&self) -> Decimal {
        match self {
            Self::Text(text) => parse_amount(text),
            Self::Amount(amount) => (*amount).max(Decimal::ZERO),
        }
    }

    /// The string shown to the user for this price.
    #[must_use]
    pub fn display(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Amount(amount) => format_usd(*amount),
        }
    }
}

impl Default for DisplayPrice {
    fn default() -> Self {
        Self::placeholder()
    }
}

/// Parse a display price into a non-negative amount.
///
/// Strips every character that is not an ASCII digit, period, or minus
/// sign, then parses the remainder as a decimal. Malformed or absent input
/// never errors; it degrades to zero.
#[must_use]
pub fn parse_amount(text: &str) -> Decimal {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    cleaned
        .parse::<Decimal>()
        .unwrap_or(Decimal::ZERO)
        .max(Decimal::ZERO)
}

/// Format an amount with a fixed two-decimal `$` prefix.
#[must_use]
pub fn format_usd(amount: Decimal) -> String {
    format!("${amount:.2}")
}
