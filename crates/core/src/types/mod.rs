//! Core types for the site.
//!
//! This module provides type-safe wrappers for the cart's domain concepts.

pub mod date;
pub mod email;
pub mod id;
pub mod line_item;
pub mod price;

pub use date::CourseDate;
pub use email::{Email, EmailError};
pub use id::*;
pub use line_item::{LineItem, LineItemError, LineKey, NewLineItem};
pub use price::{CurrencyCode, Price, PriceError};
