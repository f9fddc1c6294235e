//! Copper Kettle Core - Shared types library.
//!
//! This crate provides the domain types used by the menu behavior crate:
//! display prices and the tolerant price parser, size tiers for multi-size
//! products, and typed product descriptors.
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access, no
//! rendering. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Prices, size tiers, and product descriptors

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
