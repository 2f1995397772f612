//! Numeric counters whose digits roll into place on damped springs.
//!
//! A [`SpringNumber`](widgets::SpringNumber) shows a non-negative integer as
//! a row of digit slots. Each slot is a vertical strip of the glyphs `0..=9`
//! moved by an offset spring, with a second spring for its opacity. The
//! springs are integrated on a fixed 4ms logical clock, stepped from display
//! frames, so the motion is independent of the frame rate.
//!
//! Drawing and timing are supplied from outside:
//! - a [`DigitRenderer`](renderer::DigitRenderer) draws slots,
//! - a [`FrameHost`](host::FrameHost) delivers frames and delayed callbacks.
//!
//! [`host::CalloopHost`] runs on a `calloop` event loop; [`host::ManualHost`]
//! is driven by hand, which is what the tests use.

pub mod animation;
pub mod error;
pub mod host;
pub mod renderer;
pub mod scheduler;
pub mod widgets;

pub mod prelude {
    pub use crate::animation::{SpringConfig, SpringState, Tolerance};
    pub use crate::error::{ConfigError, HostError};
    pub use crate::host::{CalloopHost, FrameHost, HostEvent, ManualHost};
    pub use crate::renderer::{
        DigitFrame, DigitLayout, DigitRenderer, DigitStyle, RecordingRenderer, RenderFlags,
    };
    pub use crate::widgets::{Color, SpringNumber, SpringNumberConfig};
}
