//! Tick-based timer queue.
//!
//! Timers belong to whoever owns the scheduler. Dropping the owner drops the
//! queue, so a timer can never fire against state that no longer exists.

use blockadventure_core::SimTick;
use std::collections::BTreeMap;
use tracing::trace;

/// Handle used to cancel a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

#[derive(Debug, Clone)]
struct Timer<T> {
    due: SimTick,
    interval: Option<u64>,
    task: T,
}

/// Cancellable one-shot and repeating timers driven by simulation ticks.
#[derive(Debug, Clone)]
pub struct Scheduler<T> {
    now: SimTick,
    next_id: u64,
    timers: BTreeMap<TimerId, Timer<T>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self {
            now: SimTick::ZERO,
            next_id: 0,
            timers: BTreeMap::new(),
        }
    }
}

impl<T: Clone> Scheduler<T> {
    /// Create an empty scheduler at tick zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current tick.
    pub fn now(&self) -> SimTick {
        self.now
    }

    /// Number of pending timers.
    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    /// Whether a timer is still pending.
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.timers.contains_key(&id)
    }

    /// Fire `task` once, `delay` ticks from now (minimum one tick).
    pub fn schedule_after(&mut self, delay: u64, task: T) -> TimerId {
        self.insert(delay.max(1), None, task)
    }

    /// Fire `task` every `interval` ticks (minimum one tick), starting one
    /// interval from now.
    pub fn schedule_every(&mut self, interval: u64, task: T) -> TimerId {
        let interval = interval.max(1);
        self.insert(interval, Some(interval), task)
    }

    fn insert(&mut self, delay: u64, interval: Option<u64>, task: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let due = self.now.advance(delay);
        trace!(?id, due = due.0, "timer scheduled");
        self.timers.insert(id, Timer { due, interval, task });
        id
    }

    /// Cancel a timer. Returns `false` if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        self.timers.remove(&id).is_some()
    }

    /// Cancel every pending timer, returning how many were dropped.
    pub fn clear(&mut self) -> usize {
        let dropped = self.timers.len();
        self.timers.clear();
        dropped
    }

    /// Advance one tick and return the tasks that came due, oldest timer first.
    pub fn advance(&mut self) -> Vec<T> {
        self.now = self.now.advance(1);
        let now = self.now;

        let due: Vec<TimerId> = self
            .timers
            .iter()
            .filter(|(_, timer)| timer.due <= now)
            .map(|(id, _)| *id)
            .collect();

        let mut fired = Vec::with_capacity(due.len());
        for id in due {
            let Some(timer) = self.timers.get_mut(&id) else {
                continue;
            };
            fired.push(timer.task.clone());
            match timer.interval {
                Some(interval) => timer.due = now.advance(interval),
                None => {
                    self.timers.remove(&id);
                }
            }
        }
        fired
    }
}
