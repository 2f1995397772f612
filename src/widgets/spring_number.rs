use std::time::Instant;

use crate::host::{CommitTicket, FrameHost, HostEvent};
use crate::renderer::{digit_style, DigitLayout, DigitRenderer};
use crate::scheduler::FrameScheduler;
use crate::widgets::digit::{digits_of, resting_offset, DigitSlot};
use crate::widgets::SpringNumberConfig;

/// A non-negative integer whose digits roll into place on springs.
///
/// Changing a digit happens in two phases: the digit dims right away, and
/// after `commit_delay` of real time it scrolls to its new position and fades
/// back in. The widget steps its springs only from frames delivered by the
/// host through [`handle_event`](Self::handle_event).
///
/// # Example
/// ```
/// use std::time::Duration;
/// use spring_digits::prelude::*;
///
/// let mut number = SpringNumber::new(
///     RecordingRenderer::new(),
///     ManualHost::new(),
///     SpringNumberConfig::new().value(10),
/// );
/// number.set_value(17);
/// assert!(number.is_animating());
///
/// while number.is_animating() {
///     for event in number.host_mut().advance(Duration::from_millis(16)) {
///         number.handle_event(event);
///     }
/// }
/// assert_eq!(number.renderer().displayed_digits(), vec![Some(1), Some(7)]);
/// ```
pub struct SpringNumber<R: DigitRenderer, H: FrameHost> {
    config: SpringNumberConfig,
    layout: DigitLayout,
    renderer: R,
    host: H,
    slots: Vec<DigitSlot>,
    scheduler: FrameScheduler,
    value: u64,
    /// Generation of the slot collection; bumped on rebuild and destroy
    epoch: u64,
    destroyed: bool,
}

impl<R: DigitRenderer, H: FrameHost> SpringNumber<R, H> {
    /// Mount a widget showing `config.value` without animation.
    ///
    /// Invalid configuration fields fall back to their defaults.
    pub fn new(mut renderer: R, host: H, config: SpringNumberConfig) -> Self {
        let config = config.sanitized();
        renderer.install_style(digit_style());

        let mut number = Self {
            layout: DigitLayout::from(&config),
            scheduler: FrameScheduler::new(config.step),
            value: config.value,
            config,
            renderer,
            host,
            slots: Vec::new(),
            epoch: 0,
            destroyed: false,
        };
        number.jump_to(number.value);
        number
    }

    /// Animate to `value`
    pub fn set_value(&mut self, value: u64) {
        if self.destroyed {
            log::warn!("set_value({}) on a destroyed SpringNumber", value);
            return;
        }
        log::debug!("SpringNumber {} -> {}", self.value, value);
        self.value = value;

        let digits = digits_of(value);
        if digits.len() != self.slots.len() {
            self.rebuild(&digits);
        }
        for (index, digit) in digits.into_iter().enumerate() {
            self.set_digit_target(index, digit);
        }
    }

    /// Show `value` immediately, without animation
    pub fn jump_to(&mut self, value: u64) {
        if self.destroyed {
            log::warn!("jump_to({}) on a destroyed SpringNumber", value);
            return;
        }
        self.value = value;

        let digits = digits_of(value);
        if digits.len() != self.slots.len() {
            self.rebuild(&digits);
            return;
        }
        for (index, digit) in digits.into_iter().enumerate() {
            let slot = &mut self.slots[index];
            slot.jump(resting_offset(digit, self.config.digit_height));
            let frame = slot.frame();
            if !frame.changed.is_empty() {
                self.renderer.apply(index, &frame);
            }
        }
    }

    /// The last value that was set
    pub fn value(&self) -> u64 {
        self.value
    }

    pub fn digit_count(&self) -> usize {
        self.slots.len()
    }

    /// Whether frames are being requested or a digit change is waiting for its commit
    pub fn is_animating(&self) -> bool {
        self.scheduler.is_scheduled() || self.slots.iter().any(DigitSlot::has_pending_commit)
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn slots(&self) -> &[DigitSlot] {
        &self.slots
    }

    pub fn config(&self) -> &SpringNumberConfig {
        &self.config
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Entry point for everything the host calls back with
    pub fn handle_event(&mut self, event: HostEvent) {
        match event {
            HostEvent::Frame(now) => self.on_frame(now),
            HostEvent::Commit(ticket) => self.commit(ticket),
        }
    }

    /// Cancel pending work and release every slot. Safe to call repeatedly.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        log::debug!("Destroying SpringNumber showing {}", self.value);
        self.destroyed = true;
        self.scheduler.cancel(&mut self.host);
        self.renderer.clear();
        self.slots.clear();
        self.epoch += 1;
    }

    fn rebuild(&mut self, digits: &[u8]) {
        log::debug!(
            "Rebuilding digit slots: {} -> {}",
            self.slots.len(),
            digits.len()
        );
        self.epoch += 1;
        self.renderer.rebuild(digits.len(), &self.layout);

        self.slots = digits
            .iter()
            .enumerate()
            .map(|(index, &digit)| DigitSlot::new(index, digit, &self.config))
            .collect();

        // Draw the resting state right away so new slots never show a wrong digit
        for slot in &mut self.slots {
            let frame = slot.frame();
            self.renderer.apply(slot.index(), &frame);
        }
    }

    fn set_digit_target(&mut self, index: usize, digit: u8) {
        let target = resting_offset(digit, self.config.digit_height);
        let Some(slot) = self.slots.get_mut(index) else {
            return;
        };
        let Some(serial) = slot.request(target, self.config.dim_opacity) else {
            return;
        };

        let ticket = CommitTicket {
            epoch: self.epoch,
            slot: index,
            serial,
        };
        if let Err(err) = self.host.schedule_commit(self.config.commit_delay, ticket) {
            log::error!("Failed to schedule digit commit, applying now: {}", err);
            slot.commit(serial);
        }
        self.scheduler.ensure_scheduled(&mut self.host);
    }

    fn commit(&mut self, ticket: CommitTicket) {
        if self.destroyed || ticket.epoch != self.epoch {
            log::debug!("Ignoring stale digit commit {:?}", ticket);
            return;
        }
        let Some(slot) = self.slots.get_mut(ticket.slot) else {
            return;
        };
        if slot.commit(ticket.serial) {
            log::trace!("Committed digit change in slot {}", ticket.slot);
            self.scheduler.ensure_scheduled(&mut self.host);
        }
    }

    fn on_frame(&mut self, now: Instant) {
        if self.destroyed {
            log::debug!("Ignoring frame after destroy");
            return;
        }

        let steps = self.scheduler.begin_frame(now);
        let dt = self.scheduler.step_secs();
        log::trace!("Frame: {} steps across {} slots", steps, self.slots.len());

        let mut still_animating = false;
        for slot in &mut self.slots {
            slot.tick(steps, dt);
            still_animating |= slot.settle(self.config.tolerance);

            let frame = slot.frame();
            if !frame.changed.is_empty() {
                self.renderer.apply(slot.index(), &frame);
            }
        }

        self.scheduler.end_frame(still_animating, &mut self.host);
    }
}

impl<R: DigitRenderer, H: FrameHost> Drop for SpringNumber<R, H> {
    fn drop(&mut self) {
        self.destroy();
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::host::ManualHost;
    use crate::renderer::RecordingRenderer;

    type TestNumber = SpringNumber<RecordingRenderer, ManualHost>;

    fn number(value: u64) -> TestNumber {
        SpringNumber::new(
            RecordingRenderer::new(),
            ManualHost::new(),
            SpringNumberConfig::new().value(value),
        )
    }

    fn pump(number: &mut TestNumber, frames: usize) {
        for _ in 0..frames {
            for event in number.host_mut().advance(Duration::from_millis(16)) {
                number.handle_event(event);
            }
        }
    }

    #[test]
    fn test_mount_renders_initial_value() {
        let number = number(305);
        assert_eq!(number.digit_count(), 3);
        assert_eq!(number.value(), 305);
        assert!(!number.is_animating());
        assert!(number.renderer().has_style());
        assert_eq!(
            number.renderer().displayed_digits(),
            vec![Some(3), Some(0), Some(5)]
        );
    }

    #[test]
    fn test_same_value_schedules_nothing() {
        let mut number = number(42);
        number.set_value(42);
        assert!(!number.is_animating());
        assert_eq!(number.host().stats().frames_requested, 0);
        assert_eq!(number.host().stats().commits_scheduled, 0);
    }

    #[test]
    fn test_only_changed_digits_animate() {
        let mut number = number(120);
        number.set_value(125);
        assert_eq!(number.host().stats().commits_scheduled, 1);
        assert!(!number.slots()[0].has_pending_commit());
        assert!(number.slots()[2].has_pending_commit());
    }

    #[test]
    fn test_commit_waits_for_delay() {
        let mut number = number(0);
        number.set_value(4);

        pump(&mut number, 4);
        assert!(number.slots()[0].has_pending_commit());
        assert_eq!(number.slots()[0].offset().target, 0.0);

        pump(&mut number, 1);
        assert!(!number.slots()[0].has_pending_commit());
        assert_eq!(number.slots()[0].offset().target, -288.0);
    }

    #[test]
    fn test_stale_commit_after_rebuild_is_ignored() {
        let mut number = number(8);
        number.set_value(9);
        number.set_value(10);

        pump(&mut number, 200);
        assert!(!number.is_animating());
        assert_eq!(
            number.renderer().displayed_digits(),
            vec![Some(1), Some(0)]
        );
    }

    #[test]
    fn test_jump_to_skips_animation() {
        let mut number = number(11);
        number.set_value(19);
        number.jump_to(33);
        pump(&mut number, 200);

        assert_eq!(number.slots()[1].offset().position, -216.0);
        assert_eq!(
            number.renderer().displayed_digits(),
            vec![Some(3), Some(3)]
        );
    }

    #[test]
    fn test_host_failure_commits_immediately() {
        let mut number = number(0);
        number.host_mut().close();
        number.set_value(6);

        assert_eq!(number.slots()[0].offset().target, -432.0);
        assert!(!number.is_animating());
    }

    #[test]
    fn test_drop_cancels_frames() {
        let mut number = number(0);
        number.set_value(1);
        assert_eq!(number.host().pending_frames(), 1);
        number.destroy();
        assert_eq!(number.host().pending_frames(), 0);
        assert!(number.is_destroyed());
    }
}
