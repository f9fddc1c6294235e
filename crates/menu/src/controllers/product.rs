//! Product detail modal controller.
//!
//! Two states: closed and open. Opening adapts the selected card into a
//! descriptor, renders the detail fragment, and stages the descriptor for
//! the add-control. Closing discards the staged data without adding.

use std::time::{Duration, Instant};

use askama::Template;
use tracing::instrument;

use copper_kettle_core::{ProductDescriptor, SizeTier};

use crate::cart::{CartStore, NewLineItem};
use crate::error::Result;
use crate::markup::ProductSource;
use crate::render::{ProductDetailTemplate, ProductDetailView};

/// Product staged for the add action while the modal is open.
#[derive(Debug, Clone)]
struct StagedProduct {
    descriptor: ProductDescriptor,
    selected: Option<SizeTier>,
}

/// Result of a confirmed add.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddOutcome {
    /// Composed line-item name, size suffix included.
    pub name: String,
    /// Badge count after the add.
    pub badge_count: u32,
}

/// The product detail modal state machine.
pub struct ProductModal {
    staged: Option<StagedProduct>,
    cooldown: Duration,
    disabled_until: Option<Instant>,
}

impl ProductModal {
    /// Create a closed modal with the configured add-control cooldown.
    #[must_use]
    pub fn new(cooldown: Duration) -> Self {
        Self {
            staged: None,
            cooldown,
            disabled_until: None,
        }
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.staged.is_some()
    }

    /// Whether the add-control currently accepts activation.
    ///
    /// Disabled while closed and for a short cooldown after every
    /// submission; re-enablement is purely time based.
    #[must_use]
    pub fn add_enabled(&self) -> bool {
        self.staged.is_some()
            && self
                .disabled_until
                .is_none_or(|deadline| Instant::now() >= deadline)
    }

    /// Open the modal for one product card and render the detail fragment.
    ///
    /// Stages the full descriptor, all tier prices included, for the add
    /// action.
    ///
    /// # Errors
    ///
    /// Fails when the card has no name or the template does not render.
    #[instrument(skip(self, source))]
    pub fn open(&mut self, source: &ProductSource) -> Result<String> {
        let descriptor = source.descriptor()?;
        let html = ProductDetailTemplate {
            product: ProductDetailView::from(&descriptor),
        }
        .render()?;

        self.staged = Some(StagedProduct {
            descriptor,
            selected: None,
        });
        Ok(html)
    }

    /// Record a size choice; no-op while closed.
    pub fn choose_size(&mut self, tier: SizeTier) {
        if let Some(staged) = self.staged.as_mut() {
            staged.selected = Some(tier);
        }
    }

    /// Confirm the add action: compose the line item, add it to the store,
    /// close the modal, and start the cooldown.
    ///
    /// Returns `None` when the modal is closed or the add-control is still
    /// cooling down (double-submission guard).
    #[instrument(skip(self, store))]
    pub fn confirm_add(&mut self, store: &mut CartStore) -> Option<AddOutcome> {
        if !self.add_enabled() {
            return None;
        }
        // Cooldown starts regardless of how the add turns out.
        self.disabled_until = Some(Instant::now() + self.cooldown);

        let staged = self.staged.take()?;
        let name = staged.descriptor.line_item_name(staged.selected);
        let price = staged.descriptor.effective_price(staged.selected);

        store.add(NewLineItem {
            name: name.clone(),
            price: Some(price),
            image: staged.descriptor.image,
        });

        Some(AddOutcome {
            name,
            badge_count: store.badge_count(),
        })
    }

    /// Close the modal, discarding any staged product.
    pub fn close(&mut self) {
        self.staged = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{CartStorage, MemoryStore};

    fn store() -> CartStore {
        CartStore::open(CartStorage::new(Box::new(MemoryStore::new())))
    }

    fn multi_size_card() -> ProductSource {
        ProductSource::from_pairs(&[
            ("data-name", "Flat White"),
            ("data-price-normal", "$3.00"),
            ("data-price-medium", "$3.50"),
            ("data-price-large", "$4.00"),
            ("data-price-venti", "$4.50"),
        ])
    }

    #[test]
    fn test_open_renders_and_stages() {
        let mut modal = ProductModal::new(Duration::ZERO);
        let html = modal.open(&multi_size_card()).unwrap();

        assert!(modal.is_open());
        assert!(modal.add_enabled());
        assert!(html.contains("Flat White"));
        assert!(html.contains("Choose a size"));
    }

    #[test]
    fn test_open_fails_on_nameless_card() {
        let mut modal = ProductModal::new(Duration::ZERO);
        let card = ProductSource::from_pairs(&[("data-price", "$1.00")]);

        assert!(modal.open(&card).is_err());
        assert!(!modal.is_open());
    }

    #[test]
    fn test_confirm_add_composes_sized_line_item() {
        let mut modal = ProductModal::new(Duration::ZERO);
        let mut store = store();

        modal.open(&multi_size_card()).unwrap();
        modal.choose_size(SizeTier::Large);
        let outcome = modal.confirm_add(&mut store).unwrap();

        assert_eq!(outcome.name, "Flat White (large)");
        assert_eq!(outcome.badge_count, 1);
        assert!(!modal.is_open());

        let item = store.cart().get("Flat White (large)").unwrap();
        assert_eq!(item.price.display(), "$4.00");
    }

    #[test]
    fn test_confirm_add_without_selection_uses_fallback() {
        let mut modal = ProductModal::new(Duration::ZERO);
        let mut store = store();

        modal.open(&multi_size_card()).unwrap();
        modal.confirm_add(&mut store).unwrap();

        let item = store.cart().get("Flat White").unwrap();
        assert_eq!(item.price.display(), "$3.00");
    }

    #[test]
    fn test_cooldown_guards_double_submission() {
        let mut modal = ProductModal::new(Duration::from_secs(60));
        let mut store = store();

        modal.open(&multi_size_card()).unwrap();
        assert!(modal.confirm_add(&mut store).is_some());

        // Reopening does not reset the pending cooldown.
        modal.open(&multi_size_card()).unwrap();
        assert!(!modal.add_enabled());
        assert!(modal.confirm_add(&mut store).is_none());
        assert_eq!(store.badge_count(), 1);
    }

    #[test]
    fn test_close_discards_staged_product() {
        let mut modal = ProductModal::new(Duration::ZERO);
        let mut store = store();

        modal.open(&multi_size_card()).unwrap();
        modal.close();

        assert!(modal.confirm_add(&mut store).is_none());
        assert!(store.cart().is_empty());
    }

    #[test]
    fn test_choose_size_while_closed_is_noop() {
        let mut modal = ProductModal::new(Duration::ZERO);
        modal.choose_size(SizeTier::Venti);
        assert!(!modal.is_open());
    }
}
