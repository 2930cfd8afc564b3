//! Course cart.
//!
//! [`CartStore`] owns the authoritative [`CartState`], writes it through to a
//! [`CartRepository`] after every mutation, and keeps a [`CartSurface`] in
//! sync (header badge, "added to cart" banner).
//!
//! # Lifecycle
//!
//! ```text
//! initialize ──► hydrated ──► (mutate ─► persist ─► refresh)*
//! ```
//!
//! Every mutation is all-or-nothing: if the write to the store fails, the
//! in-memory state is rolled back and the error returned, so memory and
//! storage never disagree after a call returns.

use mdi_core::{CourseDate, CourseId, LineItem, LineItemError, LineKey, NewLineItem, Price};
use thiserror::Error;
use tracing::instrument;

use crate::error::add_breadcrumb;
use crate::storage::{CartRepository, KeyValueStore, LoadError, StoreError};
use crate::ui::{Badge, CartSurface, Notification};

mod state;

pub use state::CartState;

/// Link target of the "View Cart" call-to-action.
pub const DEFAULT_CART_URL: &str = "pages/cart.html";

/// Errors from cart mutations.
#[derive(Debug, Error)]
pub enum CartError {
    /// The item failed its preconditions; nothing changed.
    #[error("invalid cart item: {0}")]
    InvalidItem(#[from] LineItemError),

    /// The change could not be written to storage and was rolled back.
    #[error("failed to persist cart: {0}")]
    Persist(#[from] StoreError),
}

/// Cart state bound to its storage and render surface.
#[derive(Debug)]
pub struct CartStore<S, U> {
    state: CartState,
    repository: CartRepository<S>,
    surface: U,
    cart_url: String,
}

impl<S: KeyValueStore, U: CartSurface> CartStore<S, U> {
    /// Load the persisted cart, falling back to an empty cart when the stored
    /// value is missing, unreadable, or corrupt. Always refreshes the badge.
    pub fn initialize(repository: CartRepository<S>, surface: U) -> Self {
        let state = match repository.load() {
            Ok(state) => state,
            Err(e) => {
                tracing::warn!(error = %e, key = repository.key(), "Discarding stored cart");
                CartState::default()
            }
        };
        Self::from_parts(state, repository, surface)
    }

    /// Load the persisted cart, surfacing any load failure to the caller.
    ///
    /// # Errors
    ///
    /// Returns a [`LoadError`] if the store cannot be read or the stored
    /// value is not a line-item list.
    pub fn hydrate(repository: CartRepository<S>, surface: U) -> Result<Self, LoadError> {
        let state = repository.load()?;
        Ok(Self::from_parts(state, repository, surface))
    }

    fn from_parts(state: CartState, repository: CartRepository<S>, surface: U) -> Self {
        tracing::debug!(entries = state.len(), "Cart hydrated");
        let mut store = Self {
            state,
            repository,
            surface,
            cart_url: DEFAULT_CART_URL.to_owned(),
        };
        store.refresh_ui();
        store
    }

    /// Point the notification link at a different cart page.
    #[must_use]
    pub fn with_cart_url(mut self, cart_url: impl Into<String>) -> Self {
        self.cart_url = cart_url.into();
        self
    }

    /// Add one seat of a course session and announce it.
    ///
    /// Returns the entry's quantity after the change.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::InvalidItem`] if the item fails validation and
    /// [`CartError::Persist`] if the change cannot be saved.
    #[instrument(skip(self, item), fields(course_id = %item.id, date = %item.date))]
    pub fn add_item(&mut self, item: NewLineItem) -> Result<u32, CartError> {
        let previous = self.state.clone();
        let name = item.name.clone();
        let course_id = item.id.clone();

        let quantity = self.state.add(item)?;
        self.commit(previous)?;

        add_breadcrumb(
            "cart",
            "Added course to cart",
            Some(&[("course_id", course_id.as_str())]),
        );
        tracing::info!(quantity, "Course added to cart");
        self.notify(&format!("{name} added to cart"));
        Ok(quantity)
    }

    /// Remove the entry for `(id, date)`. Removing an absent entry is not an
    /// error; the cart is still saved and the badge refreshed.
    ///
    /// Returns whether an entry was removed.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Persist`] if the change cannot be saved.
    #[instrument(skip(self), fields(course_id = %id, date = %date))]
    pub fn remove_item(&mut self, id: &CourseId, date: &CourseDate) -> Result<bool, CartError> {
        let previous = self.state.clone();
        let removed = self.state.remove(id, date);
        self.commit(previous)?;

        if removed {
            add_breadcrumb(
                "cart",
                "Removed course from cart",
                Some(&[("course_id", id.as_str())]),
            );
        }
        Ok(removed)
    }

    /// Set the quantity of `(id, date)` to `max(1, quantity)`.
    ///
    /// Returns the stored quantity, or `None` (and no write) when no entry
    /// matched.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::InvalidItem`] if the quantity would push the
    /// total out of range and [`CartError::Persist`] if the change cannot be
    /// saved.
    #[instrument(skip(self), fields(course_id = %id, date = %date))]
    pub fn update_quantity(
        &mut self,
        id: &CourseId,
        date: &CourseDate,
        quantity: i64,
    ) -> Result<Option<u32>, CartError> {
        let previous = self.state.clone();
        let Some(stored) = self.state.set_quantity(id, date, quantity)? else {
            return Ok(None);
        };
        self.commit(previous)?;
        Ok(Some(stored))
    }

    /// Empty the cart.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Persist`] if the change cannot be saved.
    #[instrument(skip(self))]
    pub fn clear(&mut self) -> Result<(), CartError> {
        let previous = self.state.clone();
        self.state.clear();
        self.commit(previous)?;
        add_breadcrumb("cart", "Cleared cart", None);
        Ok(())
    }

    /// Σ price × quantity over all entries.
    #[must_use]
    pub fn total(&self) -> Price {
        Price::usd(self.state.total())
    }

    /// Σ quantity over all entries.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.state.count()
    }

    /// Write the current state to storage.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Persist`] if encoding or writing fails.
    pub fn persist(&mut self) -> Result<(), CartError> {
        self.repository.save(&self.state)?;
        tracing::debug!(
            key = self.repository.key(),
            entries = self.state.len(),
            "Cart persisted"
        );
        Ok(())
    }

    /// Push the current count to the header badge.
    pub fn refresh_ui(&mut self) {
        self.surface.render_badge(Badge::for_count(self.state.count()));
    }

    /// Show a banner with a link to the cart page.
    pub fn notify(&mut self, message: &str) {
        let notification = Notification::with_cart_link(message, self.cart_url.as_str());
        self.surface.show_notification(&notification);
    }

    /// Entries in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        self.state.items()
    }

    /// Look up an entry by identity.
    #[must_use]
    pub fn get(&self, key: &LineKey) -> Option<&LineItem> {
        self.state.get(key)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }

    #[must_use]
    pub const fn state(&self) -> &CartState {
        &self.state
    }

    #[must_use]
    pub const fn repository(&self) -> &CartRepository<S> {
        &self.repository
    }

    #[must_use]
    pub const fn surface(&self) -> &U {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut U {
        &mut self.surface
    }

    /// Consume the cart, returning its repository and surface.
    pub fn into_parts(self) -> (CartRepository<S>, U) {
        (self.repository, self.surface)
    }

    /// Persist the mutated state, restoring `previous` if the write fails,
    /// then refresh the badge.
    fn commit(&mut self, previous: CartState) -> Result<(), CartError> {
        if let Err(e) = self.persist() {
            tracing::error!(error = %e, "Cart write failed, rolling back");
            self.state = previous;
            return Err(e);
        }
        self.refresh_ui();
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::storage::{DEFAULT_CART_KEY, MemoryStore};
    use crate::ui::RecordingSurface;

    /// Store whose writes always fail.
    #[derive(Debug, Default)]
    struct ReadOnlyStore(MemoryStore);

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
            self.0.get(key)
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Io {
                path: "readonly".into(),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
            })
        }

        fn remove(&mut self, key: &str) -> Result<(), StoreError> {
            self.set(key, "")
        }
    }

    fn intro() -> NewLineItem {
        NewLineItem::new("C1", "Intro", Decimal::from(99), "2024-01-01", "Base Camp")
    }

    fn cart(store: &MemoryStore) -> CartStore<MemoryStore, RecordingSurface> {
        CartStore::initialize(CartRepository::new(store.clone()), RecordingSurface::new())
    }

    fn id(s: &str) -> CourseId {
        CourseId::new(s)
    }

    fn date(s: &str) -> CourseDate {
        CourseDate::new(s)
    }

    #[test]
    fn test_initialize_empty_refreshes_badge() {
        let cart = cart(&MemoryStore::new());
        assert!(cart.is_empty());
        assert_eq!(cart.surface().current_badge(), Some(Badge::for_count(0)));
    }

    #[test]
    fn test_add_twice_merges_into_one_entry() {
        let mut cart = cart(&MemoryStore::new());
        cart.add_item(intro()).unwrap();
        let qty = cart.add_item(intro()).unwrap();

        assert_eq!(qty, 2);
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.count(), 2);
    }

    #[test]
    fn test_add_notifies_and_updates_badge() {
        let mut cart = cart(&MemoryStore::new()).with_cart_url("/cart");
        cart.add_item(intro()).unwrap();

        let surface = cart.surface();
        assert_eq!(surface.current_badge(), Some(Badge::for_count(1)));
        let banner = surface.last_notification().unwrap();
        assert_eq!(banner.message, "Intro added to cart");
        assert_eq!(banner.link.href, "/cart");
    }

    #[test]
    fn test_add_invalid_item_is_rejected() {
        let store = MemoryStore::new();
        let mut cart = cart(&store);
        let mut item = intro();
        item.price = Decimal::from(-1);

        let err = cart.add_item(item).unwrap_err();

        assert!(matches!(err, CartError::InvalidItem(LineItemError::NegativePrice(_))));
        assert!(cart.is_empty());
        assert!(cart.surface().notifications.is_empty());
        assert!(store.is_empty());
    }

    #[test]
    fn test_update_quantity_floor() {
        let mut cart = cart(&MemoryStore::new());
        cart.add_item(intro()).unwrap();

        assert_eq!(
            cart.update_quantity(&id("C1"), &date("2024-01-01"), 0).unwrap(),
            Some(1)
        );
        assert_eq!(
            cart.update_quantity(&id("C1"), &date("2024-01-01"), -5).unwrap(),
            Some(1)
        );
        assert_eq!(cart.count(), 1);
    }

    #[test]
    fn test_update_quantity_out_of_range_total_is_not_stored() {
        let store = MemoryStore::new();
        let mut cart = cart(&store);
        let price = Decimal::from(10u64.pow(19)) * Decimal::from(10);
        cart.add_item(NewLineItem::new("C1", "Expedition", price, "2024-01-01", "x"))
            .unwrap();

        let err = cart
            .update_quantity(&id("C1"), &date("2024-01-01"), 1_000_000_000)
            .unwrap_err();
        assert!(matches!(err, CartError::InvalidItem(LineItemError::TotalOverflow)));

        let reloaded = self::cart(&store);
        assert_eq!(reloaded.count(), 1);
        assert_eq!(reloaded.total(), Price::usd(price));
    }

    #[test]
    fn test_update_quantity_no_match_skips_write() {
        let store = MemoryStore::new();
        let mut cart = cart(&store);

        let result = cart.update_quantity(&id("C1"), &date("2024-01-01"), 3).unwrap();

        assert_eq!(result, None);
        assert!(store.is_empty());
    }

    #[test]
    fn test_remove_is_precise_and_persisted() {
        let store = MemoryStore::new();
        let mut cart = cart(&store);
        cart.add_item(NewLineItem::new("A", "Alpine", Decimal::from(10), "2024-01-01", "x"))
            .unwrap();
        cart.add_item(NewLineItem::new("A", "Alpine", Decimal::from(10), "2024-02-01", "x"))
            .unwrap();

        assert!(cart.remove_item(&id("A"), &date("2024-01-01")).unwrap());
        assert!(!cart.remove_item(&id("A"), &date("2024-01-01")).unwrap());

        let reloaded = self::cart(&store);
        assert_eq!(reloaded.items().len(), 1);
        assert!(reloaded.get(&LineKey::new("A", "2024-02-01")).is_some());
    }

    #[test]
    fn test_persistence_round_trip() {
        let store = MemoryStore::new();
        let mut first = cart(&store);
        first.add_item(intro()).unwrap();
        drop(first);

        let reloaded = cart(&store);
        assert_eq!(reloaded.total(), Price::usd(Decimal::from(99)));
        assert_eq!(reloaded.count(), 1);
        assert_eq!(reloaded.surface().current_badge(), Some(Badge::for_count(1)));
    }

    #[test]
    fn test_initialize_corrupt_data_is_empty() {
        let store = MemoryStore::with_entry(DEFAULT_CART_KEY, "definitely not json");
        let cart = cart(&store);
        assert_eq!(cart.count(), 0);
        assert_eq!(cart.total(), Price::usd(Decimal::ZERO));
    }

    #[test]
    fn test_hydrate_surfaces_corrupt_data() {
        let store = MemoryStore::with_entry(DEFAULT_CART_KEY, "[{\"id\":1}]");
        let result = CartStore::hydrate(CartRepository::new(store), RecordingSurface::new());
        assert!(matches!(result, Err(LoadError::Parse(_))));
    }

    #[test]
    fn test_clear_persists_empty_list() {
        let store = MemoryStore::new();
        let mut cart = cart(&store);
        cart.add_item(intro()).unwrap();
        cart.clear().unwrap();

        assert_eq!(store.get(DEFAULT_CART_KEY).unwrap().as_deref(), Some("[]"));
        assert_eq!(cart.surface().current_badge(), Some(Badge::for_count(0)));
    }

    #[test]
    fn test_failed_write_rolls_back() {
        let mut cart = CartStore::initialize(
            CartRepository::new(ReadOnlyStore::default()),
            RecordingSurface::new(),
        );

        let err = cart.add_item(intro()).unwrap_err();

        assert!(matches!(err, CartError::Persist(_)));
        assert!(cart.is_empty());
        assert!(cart.surface().notifications.is_empty());
        assert_eq!(cart.surface().badges.len(), 1);
    }
}
