//! Cart state and the four mutating store operations.
//!
//! The cart is an insertion-ordered mapping from item name to line item.
//! Totals are always derived by folding over the mapping, never stored, so
//! they cannot diverge from the entries.

use indexmap::IndexMap;
use indexmap::map::Entry;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use copper_kettle_core::DisplayPrice;

use crate::storage::CartStorage;

/// One named entry in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub name: String,
    pub price: DisplayPrice,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub quantity: u32,
}

/// Insertion-ordered mapping from item name to line item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: IndexMap<String, LineItem>,
}

impl Cart {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&LineItem> {
        self.items.get(name)
    }

    /// Line items in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &LineItem> {
        self.items.values()
    }

    /// Total item count, derived by folding.
    #[must_use]
    pub fn total_quantity(&self) -> u32 {
        self.items.values().map(|item| item.quantity).sum()
    }

    /// Grand total, derived from parsed unit prices.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.items.values().fold(Decimal::ZERO, |acc, item| {
            acc + item.price.amount() * Decimal::from(item.quantity)
        })
    }

    // Hand-edited storage can contain zero-quantity entries; drop them so
    // the quantity >= 1 invariant holds from hydration onwards.
    pub(crate) fn prune_invalid(&mut self) {
        self.items.retain(|_, item| item.quantity >= 1);
    }
}

/// Input to [`CartStore::add`]; absent fields default to safe placeholders.
#[derive(Debug, Clone)]
pub struct NewLineItem {
    pub name: String,
    pub price: Option<DisplayPrice>,
    pub image: Option<String>,
}

/// Owns the cart and writes every mutation through to storage.
pub struct CartStore {
    cart: Cart,
    storage: CartStorage,
}

impl CartStore {
    /// Hydrate from storage. A failed read logs and starts empty; the
    /// default-on-failure choice lives here, not in the adapter.
    #[must_use]
    pub fn open(storage: CartStorage) -> Self {
        let mut cart = storage.load().unwrap_or_else(|e| {
            warn!("failed to read persisted cart, starting empty: {e}");
            Cart::default()
        });
        cart.prune_invalid();

        Self { cart, storage }
    }

    #[must_use]
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Count shown on the cart badge.
    #[must_use]
    pub fn badge_count(&self) -> u32 {
        self.cart.total_quantity()
    }

    /// Whether mutations are actually reaching storage.
    #[must_use]
    pub fn persistence_available(&self) -> bool {
        self.storage.available()
    }

    /// Add one unit of a product, inserting or incrementing by name.
    pub fn add(&mut self, item: NewLineItem) {
        match self.cart.items.entry(item.name.clone()) {
            Entry::Occupied(mut entry) => entry.get_mut().quantity += 1,
            Entry::Vacant(entry) => {
                entry.insert(LineItem {
                    name: item.name,
                    price: item.price.unwrap_or_default(),
                    image: item.image,
                    quantity: 1,
                });
            }
        }
        self.persist();
    }

    /// Adjust a quantity by `delta`; reaching zero removes the entry.
    pub fn change_quantity(&mut self, name: &str, delta: i32) {
        let Some(current) = self.cart.items.get(name).map(|item| item.quantity) else {
            return;
        };

        let updated = i64::from(current) + i64::from(delta);
        if updated <= 0 {
            self.cart.items.shift_remove(name);
        } else if let Some(item) = self.cart.items.get_mut(name) {
            item.quantity = u32::try_from(updated).unwrap_or(u32::MAX);
        }
        self.persist();
    }

    /// Remove an entry outright; absent names are a no-op.
    pub fn remove(&mut self, name: &str) {
        if self.cart.items.shift_remove(name).is_some() {
            self.persist();
        }
    }

    /// Reset to an empty mapping.
    pub fn clear(&mut self) {
        self.cart.items.clear();
        self.persist();
    }

    // Write-through; failures degrade to a warning.
    fn persist(&mut self) {
        if let Err(e) = self.storage.save(&self.cart) {
            warn!("failed to persist cart: {e}");
        }
    }
}
