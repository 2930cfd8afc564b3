//! Hero carousel.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::sync::watch;

use super::task::ScheduledTask;

/// Time each slide stays up before auto-advancing.
pub const DEFAULT_AUTO_ADVANCE: Duration = Duration::from_secs(5);

/// Which hero slide is active.
///
/// Navigation past either end wraps to the other end. A carousel with no
/// slides ignores navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Carousel {
    len: usize,
    current: usize,
}

impl Carousel {
    #[must_use]
    pub const fn new(len: usize) -> Self {
        Self { len, current: 0 }
    }

    /// Activate slide `index`. Any index at or past the end shows the first
    /// slide; any negative index shows the last.
    ///
    /// Returns the active slide, or `None` if there are no slides.
    pub fn show(&mut self, index: isize) -> Option<usize> {
        if self.len == 0 {
            return None;
        }
        self.current = match usize::try_from(index) {
            Ok(i) if i < self.len => i,
            Ok(_) => 0,
            Err(_) => self.len - 1,
        };
        Some(self.current)
    }

    /// Step forward (`1`) or back (`-1`).
    pub fn change(&mut self, direction: isize) -> Option<usize> {
        let from = isize::try_from(self.current).unwrap_or(isize::MAX);
        self.show(from.saturating_add(direction))
    }

    /// Jump to a dot.
    pub fn go_to(&mut self, index: usize) -> Option<usize> {
        self.show(isize::try_from(index).unwrap_or(isize::MAX))
    }

    /// Next slide, wrapping.
    pub fn advance(&mut self) -> Option<usize> {
        self.change(1)
    }

    #[must_use]
    pub const fn current(&self) -> usize {
        self.current
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Carousel with auto-advance that pauses while the pointer is over it.
///
/// The active slide is published on a watch channel so a renderer can
/// follow it without polling.
#[derive(Debug)]
pub struct CarouselController {
    carousel: Arc<Mutex<Carousel>>,
    slides: Arc<watch::Sender<usize>>,
    auto_advance: ScheduledTask,
}

impl CarouselController {
    /// A controller over `len` slides. Auto-advance is not running until
    /// [`start`](Self::start); a zero `interval` disables it.
    #[must_use]
    pub fn new(len: usize, interval: Duration) -> Self {
        let carousel = Arc::new(Mutex::new(Carousel::new(len)));
        let (tx, _) = watch::channel(0);
        let slides = Arc::new(tx);

        let tick_carousel = Arc::clone(&carousel);
        let tick_slides = Arc::clone(&slides);
        let auto_advance = ScheduledTask::new(interval, move || {
            let next = tick_carousel
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .advance();
            if let Some(index) = next {
                tick_slides.send_replace(index);
            }
        });

        Self {
            carousel,
            slides,
            auto_advance,
        }
    }

    /// Begin auto-advancing. A carousel without slides never starts.
    pub fn start(&mut self) {
        if self.snapshot().is_empty() {
            return;
        }
        self.auto_advance.start();
    }

    /// Stop auto-advancing.
    pub fn stop(&mut self) {
        self.auto_advance.stop();
    }

    /// Pointer entered the carousel: pause.
    pub fn pointer_enter(&mut self) {
        self.stop();
    }

    /// Pointer left the carousel: resume with a full interval.
    pub fn pointer_leave(&mut self) {
        self.start();
    }

    /// Prev/next arrow. Restarts auto-advance with a full interval, even
    /// when it was paused by the pointer.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn change(&mut self, direction: isize) -> Option<usize> {
        let shown = self.with_carousel(|c| c.change(direction));
        self.after_manual(shown)
    }

    /// Dot navigation. Restarts auto-advance like [`change`](Self::change).
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn go_to(&mut self, index: usize) -> Option<usize> {
        let shown = self.with_carousel(|c| c.go_to(index));
        self.after_manual(shown)
    }

    /// Index of the active slide.
    #[must_use]
    pub fn current(&self) -> usize {
        self.snapshot().current()
    }

    /// Follow the active slide.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<usize> {
        self.slides.subscribe()
    }

    #[must_use]
    pub fn is_auto_advancing(&self) -> bool {
        self.auto_advance.is_running()
    }

    fn snapshot(&self) -> Carousel {
        *self.carousel.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn with_carousel<T>(&self, f: impl FnOnce(&mut Carousel) -> T) -> T {
        f(&mut self.carousel.lock().unwrap_or_else(PoisonError::into_inner))
    }

    fn after_manual(&mut self, shown: Option<usize>) -> Option<usize> {
        if let Some(index) = shown {
            self.slides.send_replace(index);
            self.auto_advance.reset();
        }
        shown
    }
}
