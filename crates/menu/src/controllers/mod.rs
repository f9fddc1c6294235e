//! Modal controllers for the product detail and cart views.

pub mod cart;
pub mod product;

pub use cart::{CartAction, CartModal, CartUpdate, ConfirmPrompt};
pub use product::{AddOutcome, ProductModal};
