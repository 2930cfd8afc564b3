//! Render surface for cart-driven UI.
//!
//! The cart never draws anything itself. After each change it hands a
//! [`Badge`] to a [`CartSurface`], and after an add it hands over a
//! [`Notification`]. A browser binding, the CLI, and the tests each supply
//! their own surface.

pub mod notification;

pub use notification::{
    Notification, NotificationLink, NotificationPhase, NotificationTiming,
    spawn_notification_lifecycle,
};

/// The cart-count badge in the site header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Badge {
    /// Number of seats in the cart.
    pub count: u32,
    /// The badge is hidden when the cart is empty.
    pub visible: bool,
}

impl Badge {
    /// Badge state for a cart holding `count` seats.
    #[must_use]
    pub const fn for_count(count: u32) -> Self {
        Self {
            count,
            visible: count > 0,
        }
    }

    /// Text shown inside the badge.
    #[must_use]
    pub fn label(&self) -> String {
        self.count.to_string()
    }
}

/// Something that can display cart state.
pub trait CartSurface {
    /// Update the header badge.
    fn render_badge(&mut self, badge: Badge);

    /// Show a transient banner. The surface owns its lifetime on screen.
    fn show_notification(&mut self, notification: &Notification);
}

impl<T: CartSurface + ?Sized> CartSurface for &mut T {
    fn render_badge(&mut self, badge: Badge) {
        (**self).render_badge(badge);
    }

    fn show_notification(&mut self, notification: &Notification) {
        (**self).show_notification(notification);
    }
}

impl<T: CartSurface + ?Sized> CartSurface for Box<T> {
    fn render_badge(&mut self, badge: Badge) {
        (**self).render_badge(badge);
    }

    fn show_notification(&mut self, notification: &Notification) {
        (**self).show_notification(notification);
    }
}

/// Surface that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSurface;

impl CartSurface for NullSurface {
    fn render_badge(&mut self, _badge: Badge) {}

    fn show_notification(&mut self, _notification: &Notification) {}
}

/// Surface that remembers what it was asked to render.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    pub badges: Vec<Badge>,
    pub notifications: Vec<Notification>,
}

impl RecordingSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The badge as currently displayed.
    #[must_use]
    pub fn current_badge(&self) -> Option<Badge> {
        self.badges.last().copied()
    }

    /// The most recent banner.
    #[must_use]
    pub fn last_notification(&self) -> Option<&Notification> {
        self.notifications.last()
    }
}

impl CartSurface for RecordingSurface {
    fn render_badge(&mut self, badge: Badge) {
        self.badges.push(badge);
    }

    fn show_notification(&mut self, notification: &Notification) {
        self.notifications.push(notification.clone());
    }
}
