//! Fixed-step logical clock.
//!
//! Frames arrive at whatever rate the host manages. The clock converts the
//! real time between frames into a whole number of fixed simulation ticks and
//! only advances its anchor by the time those ticks cover, so the remainder
//! carries over into the next frame instead of being lost or double counted.

use std::time::{Duration, Instant};

#[derive(Clone, Debug)]
pub struct LogicalClock {
    step: Duration,
    /// Simulated time reached so far. `None` while the loop is idle.
    animated_until: Option<Instant>,
}

impl LogicalClock {
    /// Create an idle clock ticking in units of `step`.
    ///
    /// A zero step is bumped to one millisecond.
    pub fn new(step: Duration) -> Self {
        let step = if step.is_zero() {
            Duration::from_millis(1)
        } else {
            step
        };
        Self {
            step,
            animated_until: None,
        }
    }

    pub fn step(&self) -> Duration {
        self.step
    }

    /// Length of one tick in seconds, as fed to the integrator
    pub fn step_secs(&self) -> f32 {
        self.step.as_secs_f32()
    }

    pub fn is_anchored(&self) -> bool {
        self.animated_until.is_some()
    }

    /// Number of whole ticks elapsed up to `now`.
    ///
    /// The first call after [`reset`](Self::reset) anchors the clock at `now`
    /// and yields zero ticks. Timestamps earlier than the anchor yield zero.
    pub fn advance(&mut self, now: Instant) -> u32 {
        let anchor = *self.animated_until.get_or_insert(now);
        let elapsed = now.saturating_duration_since(anchor);

        let steps = (elapsed.as_nanos() / self.step.as_nanos()).min(u32::MAX as u128) as u32;
        self.animated_until = Some(anchor + self.step * steps);
        steps
    }

    /// Forget the anchor so the next frame starts a fresh clock
    pub fn reset(&mut self) {
        self.animated_until = None;
    }
}
