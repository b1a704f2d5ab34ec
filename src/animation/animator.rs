// SPDX-License-Identifier: MPL-2.0
//! Linear, indefinitely repeating value animation.

use std::time::Duration;

/// One sample of a running animator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Interpolated value for the sampled instant.
    pub value: f32,
    /// Number of repeat boundaries crossed since the previous sample.
    pub repeats: u64,
}

/// Interpolates linearly from `from` to `to` over `duration`, then restarts
/// from `from`, forever.
///
/// Values are derived from the absolute start time on every sample, so a
/// long-running animator never accumulates drift.
///
/// # Example
///
/// ```
/// use loading_button::animation::ValueAnimator;
/// use std::time::Duration;
///
/// let mut animator = ValueAnimator::new(0.0, 360.0, Duration::from_millis(1000));
/// animator.start(Duration::ZERO);
///
/// let sample = animator.sample(Duration::from_millis(1250)).unwrap();
/// assert_eq!(sample.value, 90.0);
/// assert_eq!(sample.repeats, 1);
/// ```
#[derive(Debug, Clone)]
pub struct ValueAnimator {
    from: f32,
    to: f32,
    duration: Duration,
    started_at: Option<Duration>,
    completed_repeats: u128,
    value: f32,
}

impl ValueAnimator {
    /// Creates an idle animator.
    ///
    /// A zero `duration` is treated as one nanosecond so the period is never
    /// empty.
    #[must_use]
    pub fn new(from: f32, to: f32, duration: Duration) -> Self {
        Self {
            from,
            to,
            duration: duration.max(Duration::from_nanos(1)),
            started_at: None,
            completed_repeats: 0,
            value: from,
        }
    }

    /// Starts (or restarts) the animation at `now`, resetting the value to
    /// `from`.
    pub fn start(&mut self, now: Duration) {
        self.started_at = Some(now);
        self.completed_repeats = 0;
        self.value = self.from;
    }

    /// Stops the animation. The last value is kept.
    pub fn cancel(&mut self) {
        self.started_at = None;
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    /// Last sampled value.
    #[must_use]
    pub fn value(&self) -> f32 {
        self.value
    }

    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Advances the animator to `now`. Returns `None` when not running.
    pub fn sample(&mut self, now: Duration) -> Option<Sample> {
        let started_at = self.started_at?;
        let elapsed = now.saturating_sub(started_at).as_nanos();
        let period = self.duration.as_nanos();

        let cycles = elapsed / period;
        #[allow(clippy::cast_precision_loss)]
        let fraction = (elapsed % period) as f64 / period as f64;
        #[allow(clippy::cast_possible_truncation)]
        let value = self.from + (self.to - self.from) * fraction as f32;

        let repeats = cycles.saturating_sub(self.completed_repeats);
        self.completed_repeats = cycles;
        self.value = value;

        Some(Sample {
            value,
            repeats: u64::try_from(repeats).unwrap_or(u64::MAX),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{assert_abs_diff_eq, ANGLE_EPSILON};

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn idle_animator_yields_nothing() {
        let mut animator = ValueAnimator::new(0.0, 1.0, ms(100));
        assert!(animator.sample(ms(50)).is_none());
        assert!(!animator.is_running());
    }

    #[test]
    fn interpolates_linearly_within_a_period() {
        let mut animator = ValueAnimator::new(0.0, 240.0, ms(1000));
        animator.start(ms(0));

        let sample = animator.sample(ms(500)).unwrap();
        assert_abs_diff_eq!(sample.value, 120.0, epsilon = ANGLE_EPSILON);
        assert_eq!(sample.repeats, 0);
    }

    #[test]
    fn negative_ranges_interpolate_downwards() {
        let mut animator = ValueAnimator::new(0.0, -360.0, ms(1000));
        animator.start(ms(0));

        let sample = animator.sample(ms(250)).unwrap();
        assert_abs_diff_eq!(sample.value, -90.0, epsilon = ANGLE_EPSILON);
    }

    #[test]
    fn repeats_are_reported_once_per_boundary() {
        let mut animator = ValueAnimator::new(0.0, 1.0, ms(100));
        animator.start(ms(0));

        assert_eq!(animator.sample(ms(99)).unwrap().repeats, 0);
        assert_eq!(animator.sample(ms(100)).unwrap().repeats, 1);
        assert_eq!(animator.sample(ms(150)).unwrap().repeats, 0);
        assert_eq!(animator.sample(ms(420)).unwrap().repeats, 3);
    }

    #[test]
    fn start_time_offsets_the_phase() {
        let mut animator = ValueAnimator::new(0.0, 360.0, ms(1000));
        animator.start(ms(3_000));

        let sample = animator.sample(ms(3_500)).unwrap();
        assert_abs_diff_eq!(sample.value, 180.0, epsilon = ANGLE_EPSILON);
    }

    #[test]
    fn many_cycles_do_not_drift() {
        let mut animator = ValueAnimator::new(0.0, 360.0, ms(1000));
        animator.start(ms(0));

        // 16 ms ticks for ten minutes, then check the phase.
        let mut now = 0;
        while now < 600_000 {
            now += 16;
            animator.sample(ms(now));
        }
        let sample = animator.sample(ms(600_250)).unwrap();
        assert_abs_diff_eq!(sample.value, 90.0, epsilon = ANGLE_EPSILON);
    }

    #[test]
    fn cancel_keeps_last_value() {
        let mut animator = ValueAnimator::new(0.0, 10.0, ms(100));
        animator.start(ms(0));
        animator.sample(ms(50));
        animator.cancel();

        assert!(animator.sample(ms(80)).is_none());
        assert_abs_diff_eq!(animator.value(), 5.0, epsilon = ANGLE_EPSILON);
    }

    #[test]
    fn clock_before_start_clamps_to_origin() {
        let mut animator = ValueAnimator::new(2.0, 4.0, ms(100));
        animator.start(ms(500));
        let sample = animator.sample(ms(400)).unwrap();
        assert_abs_diff_eq!(sample.value, 2.0);
        assert_eq!(sample.repeats, 0);
    }
}
