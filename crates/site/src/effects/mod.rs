//! Timer-driven visual effects.
//!
//! Each effect keeps its own state and, where it needs a clock, runs as an
//! independent tokio task that can be started, stopped, and reset. None of
//! them read or write cart state.
//!
//! - [`ScheduledTask`] - repeating task with start/stop/reset
//! - [`Carousel`] / [`CarouselController`] - hero slides with auto-advance
//! - [`CounterAnimation`] / [`StatCounter`] - animated statistics
//! - [`RevealTracker`] - reveal-once-on-scroll bookkeeping

pub mod carousel;
pub mod counter;
pub mod reveal;
pub mod task;

pub use carousel::{Carousel, CarouselController, DEFAULT_AUTO_ADVANCE};
pub use counter::{CounterAnimation, StatCounter};
pub use reveal::{ElementRect, RevealOptions, RevealTracker};
pub use task::ScheduledTask;
