//! Animated statistics counters.
//!
//! Two styles are used on the site:
//!
//! - [`CounterAnimation`]: eases from zero to a numeric target over a fixed
//!   duration (ease-out quad), for `data-target` counters.
//! - [`StatCounter`]: counts linearly in 16 ms steps, keeping the `+` or `%`
//!   suffix from the stat text ("500+", "98%").

use std::time::Duration;

use tokio::time::{Instant, MissedTickBehavior};

/// Default length of a counter animation.
pub const DEFAULT_COUNTER_DURATION: Duration = Duration::from_millis(2000);

/// Frame period of the animations (roughly one display frame).
pub const FRAME: Duration = Duration::from_millis(16);

/// Ease-out counter from zero to `target`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CounterAnimation {
    target: f64,
    duration: Duration,
}

impl CounterAnimation {
    #[must_use]
    pub const fn new(target: f64, duration: Duration) -> Self {
        Self { target, duration }
    }

    /// Whether the target has a fractional part (rendered with one decimal).
    #[must_use]
    pub fn is_decimal(&self) -> bool {
        self.target.fract() != 0.0
    }

    /// Fraction of the animation completed, `0.0..=1.0`.
    #[must_use]
    pub fn progress(&self, elapsed: Duration) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    /// Numeric value at `elapsed`.
    #[must_use]
    pub fn value_at(&self, elapsed: Duration) -> f64 {
        let p = self.progress(elapsed);
        let eased = 1.0 - (1.0 - p) * (1.0 - p);
        eased * self.target
    }

    /// Text shown at `elapsed`. The last frame shows the exact target.
    #[must_use]
    pub fn text_at(&self, elapsed: Duration) -> String {
        if self.is_finished(elapsed) {
            return self.final_text();
        }
        let value = self.value_at(elapsed);
        if self.is_decimal() {
            format!("{value:.1}")
        } else {
            format!("{}", value.floor())
        }
    }

    #[must_use]
    pub fn is_finished(&self, elapsed: Duration) -> bool {
        self.progress(elapsed) >= 1.0
    }

    fn final_text(&self) -> String {
        if self.is_decimal() {
            format!("{:.1}", self.target)
        } else {
            format!("{}", self.target)
        }
    }

    /// Render every frame until the animation finishes.
    pub async fn run(&self, mut render: impl FnMut(&str)) {
        let start = Instant::now();
        let mut frames = tokio::time::interval(FRAME);
        frames.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            frames.tick().await;
            let elapsed = start.elapsed();
            render(&self.text_at(elapsed));
            if self.is_finished(elapsed) {
                break;
            }
        }
    }
}

/// Linear counter parsed from stat text such as `"500+"`.
#[derive(Debug, Clone, PartialEq)]
pub struct StatCounter {
    target: u64,
    suffix: &'static str,
    increment: f64,
}

impl StatCounter {
    /// Parse stat text. The target is every digit in the text, in order; the
    /// suffix is `%` if present, else `+` if present, else nothing.
    ///
    /// Returns `None` when the text has no digits or the number is zero.
    #[must_use]
    pub fn parse(text: &str, duration: Duration) -> Option<Self> {
        let digits: String = text.chars().filter(char::is_ascii_digit).collect();
        let target: u64 = digits.parse().ok().filter(|v| *v > 0)?;
        let suffix = if text.contains('%') {
            "%"
        } else if text.contains('+') {
            "+"
        } else {
            ""
        };

        // stat values and durations are far below 2^52
        #[allow(clippy::cast_precision_loss)]
        let increment = {
            let steps = (duration.as_nanos() as f64 / FRAME.as_nanos() as f64).max(1.0);
            target as f64 / steps
        };

        Some(Self {
            target,
            suffix,
            increment,
        })
    }

    #[must_use]
    pub const fn target(&self) -> u64 {
        self.target
    }

    #[must_use]
    pub const fn suffix(&self) -> &'static str {
        self.suffix
    }

    /// Text after `tick` frames.
    #[must_use]
    pub fn text_at_tick(&self, tick: u64) -> String {
        if self.is_finished_at(tick) {
            return format!("{}{}", self.target, self.suffix);
        }
        #[allow(clippy::cast_precision_loss)]
        let current = tick as f64 * self.increment;
        format!("{}{}", current.floor(), self.suffix)
    }

    /// Whether the counter has reached its target after `tick` frames.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn is_finished_at(&self, tick: u64) -> bool {
        tick as f64 * self.increment >= self.target as f64
    }

    /// Render every frame until the target is reached.
    pub async fn run(&self, mut render: impl FnMut(&str)) {
        let mut frames = tokio::time::interval_at(Instant::now() + FRAME, FRAME);
        let mut tick = 0u64;
        loop {
            frames.tick().await;
            tick += 1;
            render(&self.text_at_tick(tick));
            if self.is_finished_at(tick) {
                break;
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_ease_out_quad() {
        let anim = CounterAnimation::new(100.0, DEFAULT_COUNTER_DURATION);
        assert!(anim.value_at(ms(0)).abs() < f64::EPSILON);
        assert!((anim.value_at(ms(1000)) - 75.0).abs() < 1e-9);
        assert!((anim.value_at(ms(5000)) - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_integer_text_floors() {
        let anim = CounterAnimation::new(2500.0, DEFAULT_COUNTER_DURATION);
        assert_eq!(anim.text_at(ms(1000)), "1875");
        assert_eq!(anim.text_at(ms(2000)), "2500");
        assert!(!anim.is_decimal());
    }

    #[test]
    fn test_decimal_text_one_place() {
        let anim = CounterAnimation::new(4.9, DEFAULT_COUNTER_DURATION);
        assert!(anim.is_decimal());
        assert_eq!(anim.text_at(ms(0)), "0.0");
        assert_eq!(anim.text_at(ms(3000)), "4.9");
    }

    #[test]
    fn test_zero_duration_finishes_immediately() {
        let anim = CounterAnimation::new(12.0, Duration::ZERO);
        assert!(anim.is_finished(Duration::ZERO));
        assert_eq!(anim.text_at(Duration::ZERO), "12");
    }

    #[test]
    fn test_stat_parse() {
        let plus = StatCounter::parse("500+", DEFAULT_COUNTER_DURATION).unwrap();
        assert_eq!((plus.target(), plus.suffix()), (500, "+"));

        let pct = StatCounter::parse("98%", DEFAULT_COUNTER_DURATION).unwrap();
        assert_eq!((pct.target(), pct.suffix()), (98, "%"));

        let plain = StatCounter::parse("1,200", DEFAULT_COUNTER_DURATION).unwrap();
        assert_eq!((plain.target(), plain.suffix()), (1200, ""));

        assert!(StatCounter::parse("N/A", DEFAULT_COUNTER_DURATION).is_none());
        assert!(StatCounter::parse("0%", DEFAULT_COUNTER_DURATION).is_none());
    }

    #[test]
    fn test_stat_linear_steps() {
        // 2000 ms / 16 ms = 125 steps; 500 / 125 = 4 per step
        let stat = StatCounter::parse("500+", DEFAULT_COUNTER_DURATION).unwrap();
        assert_eq!(stat.text_at_tick(1), "4+");
        assert_eq!(stat.text_at_tick(100), "400+");
        assert!(!stat.is_finished_at(124));
        assert_eq!(stat.text_at_tick(125), "500+");
    }

    #[tokio::test(start_paused = true)]
    async fn test_counter_run_ends_on_target() {
        let anim = CounterAnimation::new(42.0, ms(200));
        let mut frames = Vec::new();
        anim.run(|text| frames.push(text.to_owned())).await;

        assert_eq!(frames.first().map(String::as_str), Some("0"));
        assert_eq!(frames.last().map(String::as_str), Some("42"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stat_run_ends_on_target() {
        let stat = StatCounter::parse("98%", ms(160)).unwrap();
        let mut frames = Vec::new();
        stat.run(|text| frames.push(text.to_owned())).await;

        assert_eq!(frames.len(), 10);
        assert_eq!(frames.last().map(String::as_str), Some("98%"));
    }
}
