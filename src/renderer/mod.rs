//! The drawing side of the widget.
//!
//! The widget decides *where* each digit strip sits, how visible it is and
//! how blurred it looks. A [`DigitRenderer`] turns that into pixels.

mod recording;
mod style;

use bitflags::bitflags;

use crate::widgets::{Color, SpringNumberConfig};

pub use recording::{AppliedFrame, RecordingRenderer};
pub use style::{digit_style, DigitStyle, MaskStop};

/// Blur below this radius is not worth a filter pass
pub const MIN_VISIBLE_BLUR: f32 = 0.1;
/// Upper bound of the motion blur radius
pub const MAX_BLUR: f32 = 5.0;
/// Offset velocity (px/s) that yields one pixel of blur
pub const BLUR_VELOCITY_SCALE: f32 = 600.0;

bitflags! {
    /// Visual properties of a slot that differ from its previous frame
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct RenderFlags: u8 {
        const OFFSET  = 0b001;
        const OPACITY = 0b010;
        const BLUR    = 0b100;
    }
}

/// Visual state of one digit slot
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DigitFrame {
    /// Vertical translation of the glyph strip; digit `n` rests at `-n * digit_height`
    pub offset: f32,
    /// Opacity in `[0, 1]`
    pub opacity: f32,
    /// Motion blur radius, `None` when too small to draw
    pub blur: Option<f32>,
    /// What changed since the slot's previous frame
    pub changed: RenderFlags,
}

impl DigitFrame {
    /// Frame of a slot at rest at `offset`, fully visible
    pub fn resting(offset: f32) -> Self {
        Self {
            offset,
            opacity: 1.0,
            blur: None,
            changed: RenderFlags::all(),
        }
    }
}

/// Motion blur for an offset velocity in px/s
pub fn motion_blur(velocity: f32) -> Option<f32> {
    let blur = (velocity.abs() / BLUR_VELOCITY_SCALE).min(MAX_BLUR);
    (blur > MIN_VISIBLE_BLUR).then_some(blur)
}

/// Geometry and typography of the digit slots
#[derive(Clone, Debug, PartialEq)]
pub struct DigitLayout {
    pub digit_width: f32,
    pub digit_height: f32,
    pub font_size: f32,
    pub font_weight: u16,
    pub color: Color,
}

impl From<&SpringNumberConfig> for DigitLayout {
    fn from(config: &SpringNumberConfig) -> Self {
        Self {
            digit_width: config.digit_width,
            digit_height: config.digit_height,
            font_size: config.font_size,
            font_weight: config.font_weight,
            color: config.color,
        }
    }
}

/// Draws digit slots.
///
/// Each slot shows a vertical strip of the glyphs `0` to `9`, each
/// `digit_height` tall, clipped to a single cell and translated by the
/// frame's offset.
pub trait DigitRenderer {
    /// Make the shared slot style available. Called on every mount, so
    /// implementations must tolerate repeated calls.
    fn install_style(&mut self, style: &'static DigitStyle);

    /// Discard all slots and create `count` new ones
    fn rebuild(&mut self, count: usize, layout: &DigitLayout);

    /// Draw slot `index`
    fn apply(&mut self, index: usize, frame: &DigitFrame);

    /// Remove every slot
    fn clear(&mut self);
}
