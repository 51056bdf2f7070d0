//! Deferred tick delivery.

use crate::animation::ScheduledTick;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::Duration;
use tracing::trace;

/// Schedules a tick to be handed back to the controller later.
///
/// This is the only timing primitive the animation engine needs.
pub trait Timer {
    /// Delivers `tick` once `delay` has elapsed.
    fn schedule_after(&mut self, delay: Duration, tick: ScheduledTick);
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    deadline: Duration,
    seq: u64,
    tick: ScheduledTick,
}

impl PartialEq for Pending {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Pending {}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pending {
    // Reversed so the max-heap yields the earliest deadline, FIFO on ties.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .deadline
            .cmp(&self.deadline)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Deadline-ordered tick queue on a caller-driven clock.
///
/// The clock is a [`Duration`] since some origin the caller picks: real
/// elapsed time in the terminal front end, a virtual clock in tests and
/// replays. A popped tick moves the clock to its own deadline, so ticks
/// scheduled while handling it are paced from when it was due rather than
/// from when it was noticed.
#[derive(Debug, Clone, Default)]
pub struct TimerQueue {
    now: Duration,
    seq: u64,
    pending: BinaryHeap<Pending>,
}

impl TimerQueue {
    /// Creates an empty queue at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current clock reading.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Deadline of the earliest pending tick.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending.peek().map(|p| p.deadline)
    }

    /// Number of pending ticks, stale ones included.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// True when nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Pops the earliest tick due at or before `now`.
    pub fn pop_due(&mut self, now: Duration) -> Option<ScheduledTick> {
        if self.pending.peek()?.deadline > now {
            return None;
        }
        let due = self.pending.pop()?;
        self.now = self.now.max(due.deadline);
        Some(due.tick)
    }

    /// Moves the clock forward to `now`; never moves it back.
    pub fn advance_to(&mut self, now: Duration) {
        self.now = self.now.max(now);
    }
}

impl Timer for TimerQueue {
    fn schedule_after(&mut self, delay: Duration, tick: ScheduledTick) {
        let deadline = self.now + delay;
        trace!(?deadline, ?tick, "Scheduling tick");
        self.pending.push(Pending {
            deadline,
            seq: self.seq,
            tick,
        });
        self.seq += 1;
    }
}
