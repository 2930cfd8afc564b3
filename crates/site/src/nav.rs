//! Page chrome: navigation bar, mobile menu, hero parallax, in-page anchors.

/// Scroll offset (px) past which the navbar switches to its compact style.
pub const NAVBAR_SCROLL_THRESHOLD: f64 = 100.0;

/// Scroll distance (px) over which the hero content fades out completely.
const PARALLAX_FADE_DISTANCE: f64 = 800.0;

/// Hero content moves at half the scroll speed.
const PARALLAX_RATE: f64 = 0.5;

/// Top navigation bar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Navbar {
    scrolled: bool,
}

impl Navbar {
    /// Update for a new vertical scroll offset. Returns `true` if the
    /// `scrolled` style changed.
    pub fn on_scroll(&mut self, scroll_y: f64) -> bool {
        let scrolled = scroll_y > NAVBAR_SCROLL_THRESHOLD;
        let changed = scrolled != self.scrolled;
        self.scrolled = scrolled;
        changed
    }

    #[must_use]
    pub const fn is_scrolled(&self) -> bool {
        self.scrolled
    }
}

/// Slide-out navigation for small screens.
///
/// While open, the overlay is shown and the page body must not scroll.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MobileMenu {
    open: bool,
}

impl MobileMenu {
    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    /// Following any link inside the menu closes it.
    pub fn on_link_click(&mut self) {
        self.close();
    }

    /// Tapping the dimmed overlay closes the menu.
    pub fn on_overlay_click(&mut self) {
        self.close();
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    /// Whether the page body's scrolling is locked.
    #[must_use]
    pub const fn body_scroll_locked(&self) -> bool {
        self.open
    }
}

/// Transform applied to the hero content for a given scroll offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeroParallax {
    /// Vertical translation in px.
    pub translate_y: f64,
    /// Opacity in `0.0..=1.0`.
    pub opacity: f64,
}

impl HeroParallax {
    #[must_use]
    pub fn at(scroll_y: f64) -> Self {
        let scroll_y = scroll_y.max(0.0);
        Self {
            translate_y: scroll_y * PARALLAX_RATE,
            opacity: (1.0 - scroll_y / PARALLAX_FADE_DISTANCE).clamp(0.0, 1.0),
        }
    }

    /// CSS `transform` value.
    #[must_use]
    pub fn css_transform(&self) -> String {
        format!("translateY({}px)", self.translate_y)
    }
}

/// Element id targeted by an in-page link, for smooth scrolling.
///
/// Returns `None` for links that leave the page (`pages/cart.html`,
/// `https://...`) and for a bare `#`.
#[must_use]
pub fn anchor_target(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}
