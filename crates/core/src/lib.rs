//! Mountaineer Dynamics Institute Core - Shared domain types.
//!
//! This crate provides the types used across the site components:
//! - `site` - Cart state, persistence, and interactive page behaviour
//! - `cli` - Command-line driver for the cart and form validation
//!
//! # Architecture
//!
//! The core crate contains only types and validation - no I/O, no storage
//! access, no timers. This keeps it lightweight and allows it to be used
//! anywhere, including `wasm32` targets.
//!
//! # Modules
//!
//! - [`types`] - Course identifiers, dates, prices, line items, and emails

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
