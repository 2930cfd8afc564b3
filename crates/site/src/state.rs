//! Page state for one visit to the site.
//!
//! [`Site`] owns the cart together with the page chrome and timer effects,
//! wired from a single [`SiteConfig`]. A page binding creates one per page
//! load and forwards DOM events to it.

use mdi_core::Email;

use crate::cart::CartStore;
use crate::config::SiteConfig;
use crate::effects::{
    CarouselController, CounterAnimation, ElementRect, RevealOptions, RevealTracker, StatCounter,
};
use crate::faq::Accordion;
use crate::nav::{HeroParallax, MobileMenu, Navbar};
use crate::storage::{CartRepository, KeyValueStore};
use crate::ui::{CartSurface, NotificationTiming};

/// Static shape of the current page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageLayout {
    /// Slides in the hero carousel; zero means the page has no carousel.
    pub hero_slides: usize,
    /// Questions in the FAQ accordion.
    pub faq_items: usize,
}

/// What a scroll event changed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollUpdate {
    /// The navbar switched between its full and compact style.
    pub navbar_changed: bool,
    pub parallax: HeroParallax,
}

/// Elements that became visible during a viewport check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Revealed {
    /// Cards and headers to fade in.
    pub sections: Vec<String>,
    /// Counters to start animating.
    pub counters: Vec<String>,
}

/// All interactive state of a page.
#[derive(Debug)]
pub struct Site<S, U> {
    config: SiteConfig,
    cart: CartStore<S, U>,
    navbar: Navbar,
    menu: MobileMenu,
    faq: Accordion,
    carousel: Option<CarouselController>,
    sections: RevealTracker<String>,
    counters: RevealTracker<String>,
}

impl<S: KeyValueStore, U: CartSurface> Site<S, U> {
    /// Hydrate the cart from `store` and set up the page. Effects are not
    /// running until [`start_effects`](Self::start_effects).
    pub fn new(config: SiteConfig, store: S, surface: U, layout: PageLayout) -> Self {
        let repository = CartRepository::with_key(store, config.cart_key.as_str());
        let cart = CartStore::initialize(repository, surface).with_cart_url(config.cart_url.as_str());
        let carousel = (layout.hero_slides > 0)
            .then(|| CarouselController::new(layout.hero_slides, config.carousel_interval));

        tracing::debug!(
            hero_slides = layout.hero_slides,
            faq_items = layout.faq_items,
            cart_entries = cart.items().len(),
            "Site initialized"
        );

        Self {
            config,
            cart,
            navbar: Navbar::default(),
            menu: MobileMenu::default(),
            faq: Accordion::new(layout.faq_items),
            carousel,
            sections: RevealTracker::new(RevealOptions::SCROLL_REVEAL),
            counters: RevealTracker::new(RevealOptions::COUNTERS),
        }
    }

    /// Start the carousel auto-advance. Must be called inside a tokio runtime.
    pub fn start_effects(&mut self) {
        if let Some(carousel) = &mut self.carousel {
            carousel.start();
        }
    }

    /// Stop every running effect.
    pub fn stop_effects(&mut self) {
        if let Some(carousel) = &mut self.carousel {
            carousel.stop();
        }
    }

    /// Handle a window scroll.
    pub fn on_scroll(&mut self, scroll_y: f64) -> ScrollUpdate {
        ScrollUpdate {
            navbar_changed: self.navbar.on_scroll(scroll_y),
            parallax: HeroParallax::at(scroll_y),
        }
    }

    /// Watch a card or section header for reveal.
    pub fn observe_section(&mut self, id: impl Into<String>) {
        self.sections.observe(id.into());
    }

    /// Watch a statistic counter; it starts once half visible.
    pub fn observe_counter(&mut self, id: impl Into<String>) {
        self.counters.observe(id.into());
    }

    /// Check watched elements against the viewport.
    pub fn check_visibility(
        &mut self,
        viewport_height: f64,
        layout: impl Fn(&str) -> Option<ElementRect>,
    ) -> Revealed {
        Revealed {
            sections: self
                .sections
                .update(viewport_height, |id: &String| layout(id.as_str())),
            counters: self
                .counters
                .update(viewport_height, |id: &String| layout(id.as_str())),
        }
    }

    /// Ease-out counter to `target` with the configured duration.
    #[must_use]
    pub const fn counter(&self, target: f64) -> CounterAnimation {
        CounterAnimation::new(target, self.config.counter_duration)
    }

    /// Linear counter for stat text like `"500+"`.
    #[must_use]
    pub fn stat_counter(&self, text: &str) -> Option<StatCounter> {
        StatCounter::parse(text, self.config.counter_duration)
    }

    /// Timing of the cart banner.
    #[must_use]
    pub fn notification_timing(&self) -> NotificationTiming {
        NotificationTiming::with_display(self.config.notification_display)
    }

    /// Validate a newsletter signup address.
    ///
    /// # Errors
    ///
    /// Returns the reason the address was rejected.
    pub fn subscribe_newsletter(&self, email: &str) -> Result<Email, mdi_core::EmailError> {
        let email = Email::parse(email)?;
        tracing::info!(domain = email.domain(), "Newsletter signup");
        Ok(email)
    }

    #[must_use]
    pub const fn config(&self) -> &SiteConfig {
        &self.config
    }

    #[must_use]
    pub const fn cart(&self) -> &CartStore<S, U> {
        &self.cart
    }

    pub fn cart_mut(&mut self) -> &mut CartStore<S, U> {
        &mut self.cart
    }

    #[must_use]
    pub const fn navbar(&self) -> &Navbar {
        &self.navbar
    }

    #[must_use]
    pub const fn menu(&self) -> &MobileMenu {
        &self.menu
    }

    pub fn menu_mut(&mut self) -> &mut MobileMenu {
        &mut self.menu
    }

    #[must_use]
    pub const fn faq(&self) -> &Accordion {
        &self.faq
    }

    pub fn faq_mut(&mut self) -> &mut Accordion {
        &mut self.faq
    }

    #[must_use]
    pub const fn carousel(&self) -> Option<&CarouselController> {
        self.carousel.as_ref()
    }

    pub fn carousel_mut(&mut self) -> Option<&mut CarouselController> {
        self.carousel.as_mut()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use mdi_core::NewLineItem;
    use rust_decimal::Decimal;

    use super::*;
    use crate::storage::MemoryStore;
    use crate::ui::RecordingSurface;

    fn site(layout: PageLayout) -> Site<MemoryStore, RecordingSurface> {
        Site::new(
            SiteConfig::default(),
            MemoryStore::new(),
            RecordingSurface::new(),
            layout,
        )
    }

    #[test]
    fn test_new_refreshes_badge() {
        let site = site(PageLayout::default());
        let badge = site.cart().surface().current_badge().unwrap();
        assert!(!badge.visible);
        assert!(site.carousel().is_none());
    }

    #[test]
    fn test_cart_uses_configured_key_and_url() {
        let store = MemoryStore::new();
        let config = SiteConfig {
            cart_key: "other_cart".to_string(),
            cart_url: "/cart".to_string(),
            ..SiteConfig::default()
        };
        let mut site = Site::new(
            config,
            store.clone(),
            RecordingSurface::new(),
            PageLayout::default(),
        );

        site.cart_mut()
            .add_item(NewLineItem::new(
                "C1",
                "Intro",
                Decimal::from(99),
                "2024-01-01",
                "Base Camp",
            ))
            .unwrap();

        assert!(store.get("other_cart").unwrap().is_some());
        assert!(store.get("mdi_cart").unwrap().is_none());
        let notification = site.cart().surface().last_notification().unwrap();
        assert_eq!(notification.link.href, "/cart");
    }

    #[test]
    fn test_scroll_updates_navbar_once() {
        let mut site = site(PageLayout::default());
        assert!(!site.on_scroll(50.0).navbar_changed);
        let update = site.on_scroll(200.0);
        assert!(update.navbar_changed);
        assert!((update.parallax.translate_y - 100.0).abs() < f64::EPSILON);
        assert!(!site.on_scroll(300.0).navbar_changed);
        assert!(site.navbar().is_scrolled());
    }

    #[test]
    fn test_visibility_splits_sections_and_counters() {
        let mut site = site(PageLayout::default());
        site.observe_section("about");
        site.observe_counter("stat-students");

        // 20% visible: enough for a section, not for a counter.
        let layout = |_: &str| Some(ElementRect::new(670.0, 400.0));
        let revealed = site.check_visibility(800.0, layout);
        assert_eq!(revealed.sections, vec!["about".to_string()]);
        assert!(revealed.counters.is_empty());

        let revealed = site.check_visibility(800.0, |_| Some(ElementRect::new(100.0, 400.0)));
        assert!(revealed.sections.is_empty());
        assert_eq!(revealed.counters, vec!["stat-students".to_string()]);
    }

    #[test]
    fn test_counters_use_configured_duration() {
        let config = SiteConfig {
            counter_duration: Duration::from_millis(160),
            ..SiteConfig::default()
        };
        let site = Site::new(
            config,
            MemoryStore::new(),
            RecordingSurface::new(),
            PageLayout::default(),
        );

        assert!(site.counter(10.0).is_finished(Duration::from_millis(160)));
        let stat = site.stat_counter("98%").unwrap();
        assert!(stat.is_finished_at(10));
    }

    #[test]
    fn test_newsletter_signup() {
        let site = site(PageLayout::default());
        assert!(site.subscribe_newsletter("climber@example.com").is_ok());
        assert!(site.subscribe_newsletter("climber@example").is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_carousel_interval_disables_auto_advance() {
        let config = SiteConfig {
            carousel_interval: Duration::ZERO,
            ..SiteConfig::default()
        };
        let mut site = Site::new(
            config,
            MemoryStore::new(),
            RecordingSurface::new(),
            PageLayout {
                hero_slides: 2,
                faq_items: 0,
            },
        );

        site.start_effects();
        assert!(!site.carousel().unwrap().is_auto_advancing());
        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(site.carousel().unwrap().current(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_effects_start_and_stop() {
        let mut site = site(PageLayout {
            hero_slides: 3,
            faq_items: 4,
        });
        site.start_effects();
        tokio::time::sleep(Duration::from_millis(5001)).await;
        assert_eq!(site.carousel().unwrap().current(), 1);

        site.stop_effects();
        assert!(!site.carousel().unwrap().is_auto_advancing());

        site.faq_mut().toggle(2);
        assert_eq!(site.faq().open_index(), Some(2));
    }
}
