use std::time::Duration;

use calloop::timer::{TimeoutAction, Timer};
use calloop::{LoopHandle, RegistrationToken};

use super::{CommitTicket, FrameHost, FrameId, HostEvent};
use crate::error::HostError;

/// Default spacing of display frames (~60fps)
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Host backed by a [`calloop`] event loop.
///
/// Frames and commits are one-shot timers. When a timer fires, `route` is
/// called with the loop data and the event; it is expected to find the
/// widget inside the data and pass the event to `handle_event`.
///
/// ```ignore
/// struct State {
///     number: SpringNumber<MyRenderer, CalloopHost<State>>,
/// }
///
/// let host = CalloopHost::new(event_loop.handle(), |state: &mut State, event| {
///     state.number.handle_event(event)
/// });
/// ```
pub struct CalloopHost<Data: 'static> {
    handle: LoopHandle<'static, Data>,
    route: fn(&mut Data, HostEvent),
    frame_interval: Duration,
    next_frame: u64,
    /// Last frame timer registered; it may already have fired
    frame: Option<(FrameId, RegistrationToken)>,
}

impl<Data: 'static> CalloopHost<Data> {
    pub fn new(handle: LoopHandle<'static, Data>, route: fn(&mut Data, HostEvent)) -> Self {
        Self {
            handle,
            route,
            frame_interval: DEFAULT_FRAME_INTERVAL,
            next_frame: 0,
            frame: None,
        }
    }

    pub fn frame_interval(mut self, interval: Duration) -> Self {
        self.frame_interval = interval;
        self
    }
}

impl<Data: 'static> FrameHost for CalloopHost<Data> {
    fn request_frame(&mut self) -> Result<FrameId, HostError> {
        let route = self.route;
        let token = self
            .handle
            .insert_source(
                Timer::from_duration(self.frame_interval),
                move |deadline, _, data| {
                    route(data, HostEvent::Frame(deadline));
                    TimeoutAction::Drop
                },
            )
            .map_err(|err| HostError::Register(err.error))?;

        self.next_frame += 1;
        let id = FrameId(self.next_frame);
        self.frame = Some((id, token));
        Ok(id)
    }

    fn cancel_frame(&mut self, id: FrameId) {
        if !matches!(self.frame, Some((current, _)) if current == id) {
            return;
        }
        if let Some((_, token)) = self.frame.take() {
            self.handle.remove(token);
        }
    }

    fn schedule_commit(&mut self, delay: Duration, ticket: CommitTicket) -> Result<(), HostError> {
        let route = self.route;
        self.handle
            .insert_source(Timer::from_duration(delay), move |_, _, data| {
                route(data, HostEvent::Commit(ticket));
                TimeoutAction::Drop
            })
            .map_err(|err| HostError::Register(err.error))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calloop::EventLoop;

    #[derive(Default)]
    struct Received {
        events: Vec<HostEvent>,
    }

    fn record(data: &mut Received, event: HostEvent) {
        data.events.push(event);
    }

    #[test]
    fn test_frame_and_commit_are_delivered() {
        let mut event_loop: EventLoop<'static, Received> = EventLoop::try_new().unwrap();
        let mut host = CalloopHost::new(event_loop.handle(), record)
            .frame_interval(Duration::from_millis(1));
        let ticket = CommitTicket {
            epoch: 1,
            slot: 0,
            serial: 1,
        };

        host.request_frame().unwrap();
        host.schedule_commit(Duration::from_millis(2), ticket).unwrap();

        let mut data = Received::default();
        for _ in 0..20 {
            if data.events.len() == 2 {
                break;
            }
            event_loop
                .dispatch(Some(Duration::from_millis(5)), &mut data)
                .unwrap();
        }

        assert!(matches!(data.events[0], HostEvent::Frame(_)));
        assert_eq!(data.events[1], HostEvent::Commit(ticket));
    }

    #[test]
    fn test_cancelled_frame_is_not_delivered() {
        let mut event_loop: EventLoop<'static, Received> = EventLoop::try_new().unwrap();
        let mut host = CalloopHost::new(event_loop.handle(), record)
            .frame_interval(Duration::from_millis(1));

        let id = host.request_frame().unwrap();
        host.cancel_frame(id);

        let mut data = Received::default();
        event_loop
            .dispatch(Some(Duration::from_millis(10)), &mut data)
            .unwrap();
        assert!(data.events.is_empty());
    }
}
