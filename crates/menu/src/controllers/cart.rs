//! Cart modal controller and delegated control actions.
//!
//! The rendered list carries `data-action`/`data-name` attributes on its
//! controls; one delegated handler parses those into a [`CartAction`] and
//! dispatches it here.

use askama::Template;
use tracing::instrument;

use copper_kettle_core::price;

use crate::cart::CartStore;
use crate::error::Result;
use crate::render::{CartItemsTemplate, CartView};

/// A delegated action parsed from a rendered cart control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartAction {
    Increase(String),
    Decrease(String),
    Remove(String),
    Clear,
    Checkout,
}

impl CartAction {
    /// Parse a control's `data-action`/`data-name` attributes.
    ///
    /// Unknown actions, or item actions without a target name, are `None`.
    #[must_use]
    pub fn from_attrs(action: &str, name: Option<&str>) -> Option<Self> {
        match action {
            "increase" => Some(Self::Increase(name?.to_string())),
            "decrease" => Some(Self::Decrease(name?.to_string())),
            "remove" => Some(Self::Remove(name?.to_string())),
            "clear" => Some(Self::Clear),
            "checkout" => Some(Self::Checkout),
            _ => None,
        }
    }
}

/// Interactive confirmation hook for destructive actions.
pub trait ConfirmPrompt {
    /// Ask the user to confirm; `false` aborts the action.
    fn confirm(&mut self, message: &str) -> bool;
}

/// Outcome of a dispatched cart action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartUpdate {
    /// The list changed and was re-rendered.
    Items { html: String, count: u32 },
    /// Checkout placeholder: the computed total, nothing else happens.
    Total(String),
    /// Nothing changed (declined confirmation).
    Unchanged,
}

/// The cart modal state machine.
#[derive(Debug, Default)]
pub struct CartModal {
    open: bool,
}

impl CartModal {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    /// Open the modal, re-rendering the item list first.
    ///
    /// # Errors
    ///
    /// Fails when the template does not render.
    #[instrument(skip(self, store))]
    pub fn open(&mut self, store: &CartStore) -> Result<String> {
        let html = render_items(store)?;
        self.open = true;
        Ok(html)
    }

    /// Close the modal. Cart data is never touched by closing.
    pub fn close(&mut self) {
        self.open = false;
    }

    /// Apply one delegated control action to the store and re-render.
    ///
    /// # Errors
    ///
    /// Fails when the re-render template does not render.
    #[instrument(skip(self, store, confirm))]
    pub fn dispatch(
        &mut self,
        action: CartAction,
        store: &mut CartStore,
        confirm: &mut dyn ConfirmPrompt,
    ) -> Result<CartUpdate> {
        match action {
            CartAction::Increase(name) => store.change_quantity(&name, 1),
            CartAction::Decrease(name) => store.change_quantity(&name, -1),
            CartAction::Remove(name) => store.remove(&name),
            CartAction::Clear => {
                if !confirm.confirm("Remove every item from your cart?") {
                    return Ok(CartUpdate::Unchanged);
                }
                store.clear();
            }
            CartAction::Checkout => {
                return Ok(CartUpdate::Total(price::format_usd(
                    store.cart().subtotal(),
                )));
            }
        }

        Ok(CartUpdate::Items {
            html: render_items(store)?,
            count: store.badge_count(),
        })
    }
}

/// Render the cart items fragment, replacing any prior output.
fn render_items(store: &CartStore) -> Result<String> {
    Ok(CartItemsTemplate {
        cart: CartView::from(store.cart()),
    }
    .render()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::NewLineItem;
    use crate::storage::{CartStorage, MemoryStore};
    use copper_kettle_core::DisplayPrice;

    struct Always(bool);

    impl ConfirmPrompt for Always {
        fn confirm(&mut self, _message: &str) -> bool {
            self.0
        }
    }

    fn store_with_items(names: &[&str]) -> CartStore {
        let mut store = CartStore::open(CartStorage::new(Box::new(MemoryStore::new())));
        for name in names {
            store.add(NewLineItem {
                name: (*name).to_string(),
                price: Some(DisplayPrice::Text("$2.00".to_string())),
                image: None,
            });
        }
        store
    }

    #[test]
    fn test_from_attrs_parses_every_control() {
        assert_eq!(
            CartAction::from_attrs("increase", Some("Latte")),
            Some(CartAction::Increase("Latte".to_string()))
        );
        assert_eq!(
            CartAction::from_attrs("decrease", Some("Latte")),
            Some(CartAction::Decrease("Latte".to_string()))
        );
        assert_eq!(
            CartAction::from_attrs("remove", Some("Latte")),
            Some(CartAction::Remove("Latte".to_string()))
        );
        assert_eq!(CartAction::from_attrs("clear", None), Some(CartAction::Clear));
        assert_eq!(
            CartAction::from_attrs("checkout", None),
            Some(CartAction::Checkout)
        );
    }

    #[test]
    fn test_from_attrs_rejects_unknown_or_nameless() {
        assert_eq!(CartAction::from_attrs("explode", Some("Latte")), None);
        assert_eq!(CartAction::from_attrs("increase", None), None);
    }

    #[test]
    fn test_open_rerenders_first() {
        let store = store_with_items(&["Latte"]);
        let mut modal = CartModal::new();

        let html = modal.open(&store).unwrap();
        assert!(modal.is_open());
        assert!(html.contains("Latte"));

        modal.close();
        assert!(!modal.is_open());
    }

    #[test]
    fn test_dispatch_quantity_actions_rerender() {
        let mut store = store_with_items(&["Latte"]);
        let mut modal = CartModal::new();
        let mut confirm = Always(true);

        let update = modal
            .dispatch(
                CartAction::Increase("Latte".to_string()),
                &mut store,
                &mut confirm,
            )
            .unwrap();
        match update {
            CartUpdate::Items { count, .. } => assert_eq!(count, 2),
            other => panic!("unexpected update: {other:?}"),
        }

        let update = modal
            .dispatch(
                CartAction::Remove("Latte".to_string()),
                &mut store,
                &mut confirm,
            )
            .unwrap();
        match update {
            CartUpdate::Items { html, count } => {
                assert_eq!(count, 0);
                assert!(html.contains("Your cart is empty"));
            }
            other => panic!("unexpected update: {other:?}"),
        }
    }

    #[test]
    fn test_clear_requires_confirmation() {
        let mut store = store_with_items(&["Latte", "Scone", "Mocha"]);
        let mut modal = CartModal::new();

        let update = modal
            .dispatch(CartAction::Clear, &mut store, &mut Always(false))
            .unwrap();
        assert_eq!(update, CartUpdate::Unchanged);
        assert_eq!(store.cart().len(), 3);

        let update = modal
            .dispatch(CartAction::Clear, &mut store, &mut Always(true))
            .unwrap();
        match update {
            CartUpdate::Items { html, count } => {
                assert_eq!(count, 0);
                assert!(html.contains("Your cart is empty"));
            }
            other => panic!("unexpected update: {other:?}"),
        }
        assert!(store.cart().is_empty());
    }

    #[test]
    fn test_checkout_is_a_total_only_placeholder() {
        let mut store = store_with_items(&["Latte", "Scone"]);
        let mut modal = CartModal::new();

        let update = modal
            .dispatch(CartAction::Checkout, &mut store, &mut Always(true))
            .unwrap();
        assert_eq!(update, CartUpdate::Total("$4.00".to_string()));
        assert_eq!(store.cart().len(), 2);
    }
}
