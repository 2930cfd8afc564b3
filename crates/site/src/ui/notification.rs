//! Transient "added to cart" banners.
//!
//! A banner is inserted hidden, slides in almost immediately, stays for a few
//! seconds, fades out, and is then removed from the page. [`NotificationTiming`]
//! describes that lifecycle as data so any surface can drive it, and
//! [`spawn_notification_lifecycle`] drives it on tokio timers.

use std::time::Duration;

use tokio::task::JoinHandle;

/// Call-to-action shown next to the banner text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationLink {
    pub label: String,
    pub href: String,
}

/// A banner message with a link to the cart page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub link: NotificationLink,
}

impl Notification {
    /// Banner linking to the cart page at `cart_href`.
    #[must_use]
    pub fn with_cart_link(message: impl Into<String>, cart_href: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            link: NotificationLink {
                label: "View Cart".to_owned(),
                href: cart_href.into(),
            },
        }
    }
}

/// Where a banner is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationPhase {
    /// Inserted but not yet visible.
    Pending,
    /// Fully visible.
    Shown,
    /// Fading out.
    Fading,
    /// Removed from the page.
    Removed,
}

/// Durations of each lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationTiming {
    /// Delay before the banner becomes visible.
    pub enter_delay: Duration,
    /// Time from insertion until the fade starts.
    pub display: Duration,
    /// Length of the fade-out.
    pub fade: Duration,
}

impl Default for NotificationTiming {
    fn default() -> Self {
        Self {
            enter_delay: Duration::from_millis(10),
            display: Duration::from_millis(3000),
            fade: Duration::from_millis(300),
        }
    }
}

impl NotificationTiming {
    /// Timing with a custom display period and the standard enter and fade.
    #[must_use]
    pub fn with_display(display: Duration) -> Self {
        Self {
            display,
            ..Self::default()
        }
    }

    /// Phase of a banner `elapsed` after insertion.
    #[must_use]
    pub fn phase_at(&self, elapsed: Duration) -> NotificationPhase {
        if elapsed < self.enter_delay {
            NotificationPhase::Pending
        } else if elapsed < self.display {
            NotificationPhase::Shown
        } else if elapsed < self.display + self.fade {
            NotificationPhase::Fading
        } else {
            NotificationPhase::Removed
        }
    }

    /// Total time from insertion to removal.
    #[must_use]
    pub fn lifetime(&self) -> Duration {
        self.display + self.fade
    }
}

/// Drive one banner through its phases on the tokio clock.
///
/// `on_phase` is called with [`NotificationPhase::Shown`],
/// [`NotificationPhase::Fading`] and [`NotificationPhase::Removed`] in order.
/// Aborting the returned handle stops the sequence where it is.
///
/// # Panics
///
/// Panics if called outside a tokio runtime.
pub fn spawn_notification_lifecycle<F>(timing: NotificationTiming, mut on_phase: F) -> JoinHandle<()>
where
    F: FnMut(NotificationPhase) + Send + 'static,
{
    tokio::spawn(async move {
        let start = tokio::time::Instant::now();

        tokio::time::sleep_until(start + timing.enter_delay).await;
        on_phase(NotificationPhase::Shown);

        tokio::time::sleep_until(start + timing.display.max(timing.enter_delay)).await;
        on_phase(NotificationPhase::Fading);

        tokio::time::sleep_until(start + timing.lifetime().max(timing.enter_delay)).await;
        on_phase(NotificationPhase::Removed);
    })
}
