//! Mountaineer Dynamics Institute site library.
//!
//! The interactive behaviour of the course site as plain Rust state. Nothing
//! here talks to a browser directly: rendering goes through the
//! [`ui::CartSurface`] trait and persistence through
//! [`storage::KeyValueStore`], so the same logic runs in a page, a terminal,
//! or a test.
//!
//! # Modules
//!
//! - [`cart`] - Line-item cart with derived totals and write-through persistence
//! - [`storage`] - Durable key-value stores and the cart repository
//! - [`ui`] - Render surface, cart badge, transient notifications
//! - [`effects`] - Timer-driven effects: carousel, counters, scroll reveal
//! - [`nav`], [`faq`], [`forms`] - Page chrome, accordion, form validation
//! - [`state`] - Composition root owning all of the above

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod config;
pub mod effects;
pub mod error;
pub mod faq;
pub mod filters;
pub mod forms;
pub mod nav;
pub mod state;
pub mod storage;
pub mod ui;
