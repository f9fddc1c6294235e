//! Copper Kettle Menu - interactive behavior for the menu page.
//!
//! This crate implements the menu page's interactivity as an explicit,
//! testable library: a persisted shopping cart, HTML fragment rendering,
//! and the product-detail and cart modal controllers that drive it.
//!
//! # Architecture
//!
//! - [`markup`] adapts product-card attributes into typed descriptors
//! - [`cart`] owns cart state and the four mutating store operations
//! - [`storage`] persists the cart through a probed key-value substrate
//! - [`render`] projects cart state into askama HTML fragments
//! - [`controllers`] hold the product and cart modal state machines
//! - [`page`] wires events to controllers and applies the degrade-and-log
//!   failure policy

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod config;
pub mod controllers;
pub mod error;
pub mod markup;
pub mod page;
pub mod render;
pub mod storage;
