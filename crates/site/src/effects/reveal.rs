//! Reveal-on-scroll bookkeeping.
//!
//! Cards and section headers start hidden and fade in the first time enough
//! of them scrolls into view; counters start when half visible. Each element
//! triggers once and is then forgotten.

/// Visibility rule for a group of elements.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealOptions {
    /// Fraction of the element's height that must be inside the viewport.
    pub threshold: f64,
    /// Adjustment (px) to the viewport's bottom edge; negative shrinks it.
    pub bottom_margin: f64,
}

impl RevealOptions {
    /// Section headers and cards: 10% visible, 50 px above the fold.
    pub const SCROLL_REVEAL: Self = Self {
        threshold: 0.1,
        bottom_margin: -50.0,
    };

    /// Statistic counters: half visible.
    pub const COUNTERS: Self = Self {
        threshold: 0.5,
        bottom_margin: 0.0,
    };

    /// Fraction of `rect` inside a viewport of `viewport_height`, after
    /// applying the bottom margin.
    #[must_use]
    pub fn intersection_ratio(&self, rect: ElementRect, viewport_height: f64) -> f64 {
        let root_bottom = viewport_height + self.bottom_margin;
        let visible = rect.bottom().min(root_bottom) - rect.top.max(0.0);

        if rect.height <= 0.0 {
            return if rect.top >= 0.0 && rect.top <= root_bottom {
                1.0
            } else {
                0.0
            };
        }
        (visible / rect.height).clamp(0.0, 1.0)
    }

    /// Whether `rect` counts as visible.
    #[must_use]
    pub fn is_visible(&self, rect: ElementRect, viewport_height: f64) -> bool {
        let ratio = self.intersection_ratio(rect, viewport_height);
        ratio > 0.0 && ratio >= self.threshold
    }
}

/// Element position relative to the top of the viewport, in px.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementRect {
    pub top: f64,
    pub height: f64,
}

impl ElementRect {
    #[must_use]
    pub const fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Elements waiting to be revealed.
#[derive(Debug, Clone)]
pub struct RevealTracker<K> {
    options: RevealOptions,
    pending: Vec<K>,
}

impl<K: Clone + PartialEq> RevealTracker<K> {
    #[must_use]
    pub const fn new(options: RevealOptions) -> Self {
        Self {
            options,
            pending: Vec::new(),
        }
    }

    /// Start watching an element. Watching it twice has no extra effect.
    pub fn observe(&mut self, key: K) {
        if !self.pending.contains(&key) {
            self.pending.push(key);
        }
    }

    /// Stop watching an element without revealing it.
    pub fn unobserve(&mut self, key: &K) {
        self.pending.retain(|k| k != key);
    }

    /// Check every pending element against the viewport.
    ///
    /// `layout` reports where an element currently sits; elements it does
    /// not know are skipped. Returns the newly visible elements, which are no
    /// longer watched.
    pub fn update(
        &mut self,
        viewport_height: f64,
        layout: impl Fn(&K) -> Option<ElementRect>,
    ) -> Vec<K> {
        let options = self.options;
        let mut revealed = Vec::new();
        self.pending.retain(|key| {
            let visible = layout(key).is_some_and(|rect| options.is_visible(rect, viewport_height));
            if visible {
                revealed.push(key.clone());
            }
            !visible
        });
        revealed
    }

    /// Elements still hidden.
    #[must_use]
    pub fn pending(&self) -> &[K] {
        &self.pending
    }

    #[must_use]
    pub const fn options(&self) -> RevealOptions {
        self.options
    }
}
