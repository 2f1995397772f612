use crate::animation::{SpringState, Tolerance};
use crate::renderer::{motion_blur, DigitFrame, RenderFlags};
use crate::widgets::SpringNumberConfig;

/// Offsets closer than this are the same resting position
const SAME_TARGET_EPSILON: f32 = 0.1;

/// Decimal digits of `value`, most significant first. Zero has one digit.
pub fn digits_of(value: u64) -> Vec<u8> {
    value.to_string().bytes().map(|b| b - b'0').collect()
}

/// Strip offset at which `digit` sits in the slot window
pub fn resting_offset(digit: u8, digit_height: f32) -> f32 {
    -(digit as f32) * digit_height
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct PendingCommit {
    serial: u64,
    target_offset: f32,
}

/// One digit position: a scrolling strip with an offset and an opacity spring
#[derive(Clone, Debug)]
pub struct DigitSlot {
    index: usize,
    offset: SpringState,
    opacity: SpringState,
    pending: Option<PendingCommit>,
    serial: u64,
    last_frame: Option<DigitFrame>,
}

impl DigitSlot {
    /// Slot resting on `digit`, fully visible
    pub fn new(index: usize, digit: u8, config: &SpringNumberConfig) -> Self {
        Self {
            index,
            offset: SpringState::new(
                resting_offset(digit, config.digit_height),
                config.offset_spring(),
            ),
            opacity: SpringState::new(1.0, config.opacity_spring),
            pending: None,
            serial: 0,
            last_frame: None,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn offset(&self) -> &SpringState {
        &self.offset
    }

    pub fn opacity(&self) -> &SpringState {
        &self.opacity
    }

    pub fn has_pending_commit(&self) -> bool {
        self.pending.is_some()
    }

    /// Offset the slot is heading to, counting a change that is still pending
    pub fn destination(&self) -> f32 {
        self.pending
            .map_or(self.offset.target, |pending| pending.target_offset)
    }

    /// Begin moving to `target_offset`: dim now, move on commit.
    ///
    /// Returns the serial the commit must present, or `None` when the slot is
    /// already headed there.
    pub fn request(&mut self, target_offset: f32, dim_opacity: f32) -> Option<u64> {
        if (self.destination() - target_offset).abs() < SAME_TARGET_EPSILON {
            return None;
        }

        self.serial += 1;
        self.pending = Some(PendingCommit {
            serial: self.serial,
            target_offset,
        });
        self.opacity.target = dim_opacity;
        Some(self.serial)
    }

    /// Apply the pending change if `serial` is still the latest one
    pub fn commit(&mut self, serial: u64) -> bool {
        match self.pending {
            Some(pending) if pending.serial == serial => {
                self.pending = None;
                self.offset.target = pending.target_offset;
                self.opacity.target = 1.0;
                true
            }
            _ => false,
        }
    }

    /// Rest at `target_offset` immediately, dropping any pending change
    pub fn jump(&mut self, target_offset: f32) {
        self.pending = None;
        self.offset.reset(target_offset);
        self.opacity.reset(1.0);
    }

    /// Advance both springs by `steps` ticks of `dt_secs`
    pub fn tick(&mut self, steps: u32, dt_secs: f32) {
        for _ in 0..steps {
            self.offset.step(dt_secs);
            self.opacity.step(dt_secs);
        }
    }

    /// Snap settled channels onto their targets. Returns true while anything still moves.
    pub fn settle(&mut self, tolerance: Tolerance) -> bool {
        let mut moving = false;
        for spring in [&mut self.offset, &mut self.opacity] {
            if spring.is_settled(tolerance) {
                spring.snap();
            } else {
                moving = true;
            }
        }
        moving
    }

    /// Current visual state, flagged with what changed since the last call
    pub fn frame(&mut self) -> DigitFrame {
        let mut frame = DigitFrame {
            offset: self.offset.position,
            opacity: self.opacity.position.clamp(0.0, 1.0),
            blur: motion_blur(self.offset.velocity),
            changed: RenderFlags::all(),
        };

        if let Some(last) = self.last_frame {
            let mut changed = RenderFlags::empty();
            changed.set(RenderFlags::OFFSET, last.offset != frame.offset);
            changed.set(RenderFlags::OPACITY, last.opacity != frame.opacity);
            changed.set(RenderFlags::BLUR, last.blur != frame.blur);
            frame.changed = changed;
        }

        self.last_frame = Some(frame);
        frame
    }
}
