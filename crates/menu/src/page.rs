//! Page wiring: routes UI events to the controllers.
//!
//! Failures inside a handler are logged and swallowed here so the page
//! stays interactive; no event can take the subsystem down.

use askama::Template;
use tracing::error;

use copper_kettle_core::SizeTier;

use crate::cart::CartStore;
use crate::config::MenuConfig;
use crate::controllers::{CartAction, CartModal, CartUpdate, ConfirmPrompt, ProductModal};
use crate::error::Result;
use crate::markup::ProductSource;
use crate::render::CartCountTemplate;
use crate::storage::{CartStorage, FileStore};

/// What triggered a modal close.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseTrigger {
    /// The explicit close control.
    Control,
    /// A click on the background overlay.
    Overlay,
    /// The global cancel key.
    CancelKey,
}

/// One user-interaction event on the page.
#[derive(Debug, Clone)]
pub enum PageEvent {
    /// A product card was activated.
    SelectCard(ProductSource),
    /// A size option was chosen in the product detail view.
    ChooseSize(SizeTier),
    /// The add-control was activated.
    ConfirmAdd,
    /// The top-level cart button was activated.
    OpenCart,
    /// A delegated control inside the cart list was activated.
    Cart(CartAction),
    /// A close trigger fired for whichever modal is open.
    Close(CloseTrigger),
}

/// Re-rendered fragments produced by one event.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PageUpdate {
    /// Product detail fragment, when the detail view opened.
    pub product_detail: Option<String>,
    /// Cart items fragment, when the list changed or the cart opened.
    pub cart_items: Option<String>,
    /// Badge fragment, after any cart mutation.
    pub badge: Option<String>,
    /// Checkout placeholder total.
    pub checkout_total: Option<String>,
}

/// Owns the cart store, both modal controllers, and the confirmation hook.
pub struct MenuPage {
    store: CartStore,
    product_modal: ProductModal,
    cart_modal: CartModal,
    confirm: Box<dyn ConfirmPrompt>,
}

impl MenuPage {
    /// Build the page from configuration, hydrating the cart from disk.
    ///
    /// An unusable cart file degrades to no persistence; it never fails
    /// the page.
    #[must_use]
    pub fn from_config(config: &MenuConfig, confirm: Box<dyn ConfirmPrompt>) -> Self {
        let storage = match FileStore::open(&config.cart_path) {
            Ok(substrate) => CartStorage::new(Box::new(substrate)),
            Err(e) => {
                tracing::warn!("cart file unavailable, continuing without persistence: {e}");
                CartStorage::disabled()
            }
        };
        Self::new(storage, config, confirm)
    }

    /// Build the page over an explicit storage adapter.
    #[must_use]
    pub fn new(
        storage: CartStorage,
        config: &MenuConfig,
        confirm: Box<dyn ConfirmPrompt>,
    ) -> Self {
        Self {
            store: CartStore::open(storage),
            product_modal: ProductModal::new(config.add_cooldown),
            cart_modal: CartModal::new(),
            confirm,
        }
    }

    #[must_use]
    pub fn store(&self) -> &CartStore {
        &self.store
    }

    #[must_use]
    pub fn product_modal(&self) -> &ProductModal {
        &self.product_modal
    }

    #[must_use]
    pub fn cart_modal(&self) -> &CartModal {
        &self.cart_modal
    }

    /// Handle one event; failures are logged and leave the page unchanged.
    pub fn handle_event(&mut self, event: PageEvent) -> PageUpdate {
        match self.apply(event) {
            Ok(update) => update,
            Err(e) => {
                error!("event handling failed, page stays interactive: {e}");
                PageUpdate::default()
            }
        }
    }

    fn apply(&mut self, event: PageEvent) -> Result<PageUpdate> {
        let mut update = PageUpdate::default();

        match event {
            PageEvent::SelectCard(source) => {
                update.product_detail = Some(self.product_modal.open(&source)?);
            }
            PageEvent::ChooseSize(tier) => self.product_modal.choose_size(tier),
            PageEvent::ConfirmAdd => {
                if self.product_modal.confirm_add(&mut self.store).is_some() {
                    update.badge = Some(self.render_badge()?);
                }
            }
            PageEvent::OpenCart => {
                update.cart_items = Some(self.cart_modal.open(&self.store)?);
            }
            PageEvent::Cart(action) => {
                let result =
                    self.cart_modal
                        .dispatch(action, &mut self.store, self.confirm.as_mut())?;
                match result {
                    CartUpdate::Items { html, .. } => {
                        update.cart_items = Some(html);
                        update.badge = Some(self.render_badge()?);
                    }
                    CartUpdate::Total(total) => update.checkout_total = Some(total),
                    CartUpdate::Unchanged => {}
                }
            }
            PageEvent::Close(_) => {
                // Any trigger closes both views; staged data is discarded,
                // cart data untouched.
                self.product_modal.close();
                self.cart_modal.close();
            }
        }

        Ok(update)
    }

    fn render_badge(&self) -> Result<String> {
        Ok(CartCountTemplate {
            count: self.store.badge_count(),
        }
        .render()?)
    }
}
