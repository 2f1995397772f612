//! Hosts supply the clock: display frames and delayed callbacks.
//!
//! The widget never captures itself in a callback. Instead a host hands
//! [`HostEvent`]s back to [`SpringNumber::handle_event`], so ownership of the
//! scheduling handle stays with the widget.
//!
//! [`SpringNumber::handle_event`]: crate::widgets::SpringNumber::handle_event

mod event_loop;
mod manual;

use std::time::{Duration, Instant};

use crate::error::HostError;

pub use event_loop::CalloopHost;
pub use manual::{ManualHost, ManualHostStats};

/// Handle of a requested display frame
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameId(pub u64);

/// Identifies one delayed commit of a digit change.
///
/// A ticket is only honoured while the slot collection it was issued for is
/// alive (`epoch`) and no newer change was requested for the slot (`serial`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CommitTicket {
    pub(crate) epoch: u64,
    pub(crate) slot: usize,
    pub(crate) serial: u64,
}

impl CommitTicket {
    pub fn slot(&self) -> usize {
        self.slot
    }
}

/// Callbacks a host delivers to the widget
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HostEvent {
    /// A display frame fired at the given time
    Frame(Instant),
    /// The delay of a digit change elapsed
    Commit(CommitTicket),
}

/// Source of display frames and delayed callbacks
pub trait FrameHost {
    /// Ask for a single [`HostEvent::Frame`] on the next display frame
    fn request_frame(&mut self) -> Result<FrameId, HostError>;

    /// Withdraw a frame request. Unknown or already fired ids are ignored.
    fn cancel_frame(&mut self, id: FrameId);

    /// Deliver [`HostEvent::Commit`] with `ticket` once `delay` of real time has passed
    fn schedule_commit(&mut self, delay: Duration, ticket: CommitTicket) -> Result<(), HostError>;
}
