//! Cart and product-detail rendering.
//!
//! View structs carry pre-formatted display data; templates replace their
//! container's contents wholesale on every render. Cart sizes are small and
//! renders are user-triggered, so there is no diffing.

use askama::Template;
use rust_decimal::Decimal;

use copper_kettle_core::{DisplayPrice, ProductDescriptor, SizeTier, price};

use crate::cart::{Cart, LineItem};

/// Cart item display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub name: String,
    pub quantity: u32,
    pub unit_price: String,
    pub line_price: String,
    pub image: Option<ImageView>,
}

/// Image display data for templates.
#[derive(Clone)]
pub struct ImageView {
    pub url: String,
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub item_count: u32,
}

impl CartView {
    /// Create an empty cart view.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            subtotal: "$0.00".to_string(),
            item_count: 0,
        }
    }
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart.iter().map(CartItemView::from).collect(),
            subtotal: price::format_usd(cart.subtotal()),
            item_count: cart.total_quantity(),
        }
    }
}

impl From<&LineItem> for CartItemView {
    fn from(item: &LineItem) -> Self {
        Self {
            name: item.name.clone(),
            quantity: item.quantity,
            unit_price: item.price.display(),
            line_price: price::format_usd(item.price.amount() * Decimal::from(item.quantity)),
            image: item.image.as_ref().map(|url| ImageView { url: url.clone() }),
        }
    }
}

/// One size option row in the product detail view.
#[derive(Clone)]
pub struct SizeOptionView {
    pub value: String,
    pub price: String,
}

/// Product detail display data.
#[derive(Clone)]
pub struct ProductDetailView {
    pub name: String,
    pub description: String,
    pub image: Option<ImageView>,
    /// Shown when the product is not multi-size.
    pub flat_price: Option<String>,
    /// All four tiers, when the product is multi-size.
    pub sizes: Vec<SizeOptionView>,
}

impl From<&ProductDescriptor> for ProductDetailView {
    fn from(descriptor: &ProductDescriptor) -> Self {
        let sizes = if descriptor.is_multi_size() {
            SizeTier::ALL
                .into_iter()
                .map(|tier| SizeOptionView {
                    value: tier.label().to_string(),
                    price: descriptor
                        .tiers
                        .get(tier)
                        .map_or_else(|| DisplayPrice::placeholder().display(), DisplayPrice::display),
                })
                .collect()
        } else {
            Vec::new()
        };

        Self {
            name: descriptor.name.clone(),
            description: descriptor.description.clone().unwrap_or_default(),
            image: descriptor
                .image
                .as_ref()
                .map(|url| ImageView { url: url.clone() }),
            flat_price: if sizes.is_empty() {
                Some(descriptor.effective_price(None).display())
            } else {
                None
            },
            sizes,
        }
    }
}

/// Cart items fragment template.
#[derive(Template)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart: CartView,
}

/// Cart count badge fragment template.
#[derive(Template)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u32,
}

/// Product detail fragment template.
#[derive(Template)]
#[template(path = "partials/product_detail.html")]
pub struct ProductDetailTemplate {
    pub product: ProductDetailView,
}
