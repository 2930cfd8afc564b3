//! Cancellable repeating tasks.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

type Tick = Arc<dyn Fn() + Send + Sync>;

/// Runs a callback every `period` on the tokio runtime until stopped.
///
/// The first tick fires one full period after [`start`](Self::start).
/// Starting a running task restarts its period, which is what manual
/// navigation wants ("reset the countdown"). Dropping the task stops it.
pub struct ScheduledTask {
    period: Duration,
    tick: Tick,
    handle: Option<JoinHandle<()>>,
}

impl ScheduledTask {
    /// Create a stopped task. A zero `period` gives a task that never
    /// starts.
    #[must_use]
    pub fn new(period: Duration, tick: impl Fn() + Send + Sync + 'static) -> Self {
        Self {
            period,
            tick: Arc::new(tick),
            handle: None,
        }
    }

    /// Begin ticking, restarting the period if already running. Does
    /// nothing when the period is zero.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn start(&mut self) {
        self.stop();
        if self.period.is_zero() {
            tracing::warn!("Scheduled task has a zero period, not starting");
            return;
        }

        let period = self.period;
        let tick = Arc::clone(&self.tick);
        self.handle = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                tick();
            }
        }));
    }

    /// Stop ticking. Stopping a stopped task does nothing.
    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    /// Stop, then start again with a fresh period.
    pub fn reset(&mut self) {
        self.start();
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    #[must_use]
    pub const fn period(&self) -> Duration {
        self.period
    }
}

impl Drop for ScheduledTask {
    fn drop(&mut self) {
        self.stop();
    }
}

impl fmt::Debug for ScheduledTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScheduledTask")
            .field("period", &self.period)
            .field("running", &self.is_running())
            .finish_non_exhaustive()
    }
}
