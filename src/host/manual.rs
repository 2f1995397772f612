use std::time::{Duration, Instant};

use super::{CommitTicket, FrameHost, FrameId, HostEvent};
use crate::error::HostError;

/// Deterministic host whose time only moves when told to.
///
/// Every call to [`advance`](Self::advance) is one display frame: commits
/// that came due are returned first (in due order), followed by one
/// [`HostEvent::Frame`] per frame request outstanding at that moment.
/// Requests made while those events are handled wait for the next advance.
#[derive(Debug)]
pub struct ManualHost {
    now: Instant,
    next_frame: u64,
    frames: Vec<FrameId>,
    commits: Vec<(Instant, CommitTicket)>,
    closed: bool,
    stats: ManualHostStats,
}

/// Counters for asserting on host traffic
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ManualHostStats {
    pub frames_requested: usize,
    pub frames_cancelled: usize,
    pub frames_fired: usize,
    pub commits_scheduled: usize,
}

impl ManualHost {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(now: Instant) -> Self {
        Self {
            now,
            next_frame: 0,
            frames: Vec::new(),
            commits: Vec::new(),
            closed: false,
            stats: ManualHostStats::default(),
        }
    }

    pub fn now(&self) -> Instant {
        self.now
    }

    pub fn stats(&self) -> ManualHostStats {
        self.stats
    }

    pub fn pending_frames(&self) -> usize {
        self.frames.len()
    }

    pub fn pending_commits(&self) -> usize {
        self.commits.len()
    }

    /// Refuse all further requests with [`HostError::Closed`]
    pub fn close(&mut self) {
        self.closed = true;
    }

    /// Move time forward by `by` and collect the events that fire
    pub fn advance(&mut self, by: Duration) -> Vec<HostEvent> {
        self.now += by;

        let now = self.now;
        let mut due: Vec<(Instant, CommitTicket)> = Vec::new();
        self.commits.retain(|&(at, ticket)| {
            if at <= now {
                due.push((at, ticket));
                false
            } else {
                true
            }
        });
        due.sort_by_key(|&(at, _)| at);

        let mut events: Vec<HostEvent> = due
            .into_iter()
            .map(|(_, ticket)| HostEvent::Commit(ticket))
            .collect();

        let frames = std::mem::take(&mut self.frames);
        self.stats.frames_fired += frames.len();
        events.extend(frames.into_iter().map(|_| HostEvent::Frame(now)));
        events
    }
}

impl Default for ManualHost {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameHost for ManualHost {
    fn request_frame(&mut self) -> Result<FrameId, HostError> {
        if self.closed {
            return Err(HostError::Closed);
        }
        self.next_frame += 1;
        let id = FrameId(self.next_frame);
        self.frames.push(id);
        self.stats.frames_requested += 1;
        Ok(id)
    }

    fn cancel_frame(&mut self, id: FrameId) {
        let before = self.frames.len();
        self.frames.retain(|&pending| pending != id);
        if self.frames.len() != before {
            self.stats.frames_cancelled += 1;
        }
    }

    fn schedule_commit(&mut self, delay: Duration, ticket: CommitTicket) -> Result<(), HostError> {
        if self.closed {
            return Err(HostError::Closed);
        }
        self.commits.push((self.now + delay, ticket));
        self.stats.commits_scheduled += 1;
        Ok(())
    }
}
