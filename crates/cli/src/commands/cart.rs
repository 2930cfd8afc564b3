//! Cart commands.
//!
//! Each invocation hydrates the cart from the file store, applies one
//! change, and exits. A missing or corrupt file starts an empty cart.
//!
//! # Environment Variables
//!
//! - `MDI_CART_STORE_PATH` - JSON file holding the cart
//! - `MDI_CART_KEY` - Key the cart is stored under

use mdi_core::{CourseDate, CourseId, NewLineItem, Price};
use mdi_site::cart::CartStore;
use mdi_site::config::SiteConfig;
use mdi_site::error::{Result, SiteError};
use mdi_site::filters;
use mdi_site::storage::{CartRepository, FileStore};

use crate::surface::{TerminalSurface, print_line};

/// Cart backed by the configured file.
pub type Cart = CartStore<FileStore, TerminalSurface>;

/// Load the cart from the configured store.
pub fn open(config: &SiteConfig) -> Cart {
    let store = FileStore::new(&config.store_path);
    let repository = CartRepository::with_key(store, config.cart_key.as_str());
    CartStore::initialize(repository, TerminalSurface::new())
        .with_cart_url(config.cart_url.as_str())
}

/// Add one seat on a session.
///
/// # Errors
///
/// Returns an error if the price does not parse, the item is invalid, or the
/// cart cannot be saved.
pub fn add(
    cart: &mut Cart,
    id: &str,
    name: &str,
    price: &str,
    date: &str,
    location: &str,
) -> Result<()> {
    let amount = Price::parse_amount(price).map_err(|e| SiteError::BadRequest(e.to_string()))?;
    let quantity = cart.add_item(NewLineItem::new(id, name, amount, date, location))?;

    print_line(&format!("{id} on {date}: {quantity} seat(s)"));
    print_badge(cart);
    Ok(())
}

/// Remove a session from the cart.
///
/// # Errors
///
/// Returns an error if the cart cannot be saved.
pub fn remove(cart: &mut Cart, id: &str, date: &str) -> Result<()> {
    if cart.remove_item(&CourseId::new(id), &CourseDate::new(date))? {
        print_line(&format!("Removed {id} on {date}"));
    } else {
        print_line(&format!("No entry for {id} on {date}"));
    }
    print_badge(cart);
    Ok(())
}

/// Set the seat count of a session.
///
/// # Errors
///
/// Returns an error if the cart cannot be saved.
pub fn update(cart: &mut Cart, id: &str, date: &str, quantity: i64) -> Result<()> {
    match cart.update_quantity(&CourseId::new(id), &CourseDate::new(date), quantity)? {
        Some(quantity) => print_line(&format!("{id} on {date}: {quantity} seat(s)")),
        None => print_line(&format!("No entry for {id} on {date}")),
    }
    print_badge(cart);
    Ok(())
}

/// Print every entry.
pub fn list(cart: &Cart) {
    if cart.is_empty() {
        print_line("Cart is empty");
        return;
    }

    for item in cart.items() {
        print_line(&format!(
            "{}  {}  {}  {}  x{}  {}",
            item.id,
            item.name,
            filters::long_date(&item.date),
            item.location,
            item.quantity,
            filters::currency(item.line_total()),
        ));
    }
}

/// Print seat count and total.
pub fn total(cart: &Cart) {
    print_line(&format!(
        "{} seat(s), total {}",
        cart.count(),
        filters::price(cart.total())
    ));
}

/// Empty the cart.
///
/// # Errors
///
/// Returns an error if the cart cannot be saved.
pub fn clear(cart: &mut Cart) -> Result<()> {
    cart.clear()?;
    print_line("Cart cleared");
    Ok(())
}

fn print_badge(cart: &Cart) {
    let badge = cart.surface().badge();
    if badge.visible {
        print_line(&format!("Cart: {}", badge.label()));
    } else {
        print_line("Cart is empty");
    }
}
