//! Frame-driven loop that steps springs on a fixed logical clock.
//!
//! The scheduler owns the outstanding frame request and the clock anchor.
//! A frame handler calls [`FrameScheduler::begin_frame`] to learn how many
//! ticks to simulate, steps its springs, then calls
//! [`FrameScheduler::end_frame`] with whether anything is still moving.

use std::time::{Duration, Instant};

use crate::animation::LogicalClock;
use crate::host::{FrameHost, FrameId};

#[derive(Debug)]
pub struct FrameScheduler {
    frame: Option<FrameId>,
    clock: LogicalClock,
}

impl FrameScheduler {
    pub fn new(step: Duration) -> Self {
        Self {
            frame: None,
            clock: LogicalClock::new(step),
        }
    }

    /// Whether a frame request is outstanding
    pub fn is_scheduled(&self) -> bool {
        self.frame.is_some()
    }

    /// Whether the logical clock is running
    pub fn is_running(&self) -> bool {
        self.clock.is_anchored()
    }

    /// Integrator time step in seconds
    pub fn step_secs(&self) -> f32 {
        self.clock.step_secs()
    }

    /// Request a frame unless one is already on its way.
    ///
    /// A host failure is logged and leaves the scheduler idle; the next call
    /// tries again.
    pub fn ensure_scheduled<H: FrameHost>(&mut self, host: &mut H) {
        if self.frame.is_some() {
            return;
        }
        match host.request_frame() {
            Ok(id) => self.frame = Some(id),
            Err(err) => log::error!("Failed to request animation frame: {}", err),
        }
    }

    /// Consume the fired frame and return the number of ticks to simulate
    pub fn begin_frame(&mut self, now: Instant) -> u32 {
        self.frame = None;
        self.clock.advance(now)
    }

    /// Keep going while anything moves, otherwise go idle and drop the clock anchor
    pub fn end_frame<H: FrameHost>(&mut self, still_active: bool, host: &mut H) {
        if still_active {
            self.ensure_scheduled(host);
        } else {
            self.clock.reset();
        }
    }

    /// Withdraw any outstanding frame and stop the clock. Safe when idle.
    pub fn cancel<H: FrameHost>(&mut self, host: &mut H) {
        if let Some(id) = self.frame.take() {
            host.cancel_frame(id);
        }
        self.clock.reset();
    }
}
