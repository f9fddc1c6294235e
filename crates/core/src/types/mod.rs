//! Core types for Copper Kettle.
//!
//! This module provides type-safe wrappers for the menu's domain concepts.

pub mod price;
pub mod product;
pub mod size;

pub use price::DisplayPrice;
pub use product::{ProductDescriptor, TierPrices};
pub use size::SizeTier;
