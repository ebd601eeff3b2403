//! A deterministic, single-threaded timer queue.
//!
//! This stands in for the host's deferred-callback facility (`setTimeout` and
//! friends). Time only moves when the owner of the queue advances it, which
//! keeps pages reproducible in tests and in batch rendering.

use std::{fmt, time::Duration};
use tracing::trace;

/// Identifies a scheduled callback, for cancelling it later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

impl TimerHandle {
    pub fn id(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for TimerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

/// A callback that has not run yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingTimer {
    pub handle: TimerHandle,
    pub due_at: Duration,
}

struct ScheduledTask {
    handle: TimerHandle,
    due_at: Duration,
    callback: Box<dyn FnOnce()>,
}

#[derive(Default)]
pub struct TimerQueue {
    now: Duration,
    next_id: u64,
    tasks: Vec<ScheduledTask>,
}

impl fmt::Debug for TimerQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerQueue")
            .field("now", &self.now)
            .field("pending", &self.pending())
            .finish()
    }
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time elapsed on the virtual clock since the queue was created.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Run `callback` once, no earlier than `delay` from now.
    ///
    /// Callbacks due at the same instant run in the order they were scheduled.
    pub fn set_timeout<F>(&mut self, delay: Duration, callback: F) -> TimerHandle
    where
        F: FnOnce() + 'static,
    {
        self.next_id += 1;
        let handle = TimerHandle(self.next_id);
        let due_at = self.now.saturating_add(delay);
        trace!(%handle, ?delay, ?due_at, "scheduled timer");

        self.tasks.push(ScheduledTask {
            handle,
            due_at,
            callback: Box::new(callback),
        });
        handle
    }

    /// Cancel a pending callback.
    ///
    /// Returns `false` when the timer already ran, was cancelled before, or
    /// never belonged to this queue.
    pub fn clear_timeout(&mut self, handle: TimerHandle) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.handle != handle);
        let cleared = self.tasks.len() != before;
        trace!(%handle, cleared, "cleared timer");
        cleared
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.tasks.iter().any(|task| task.handle == handle)
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Pending callbacks in the order they will run.
    pub fn pending(&self) -> Vec<PendingTimer> {
        let mut timers = self
            .tasks
            .iter()
            .map(|task| PendingTimer {
                handle: task.handle,
                due_at: task.due_at,
            })
            .collect::<Vec<_>>();
        timers.sort_by_key(|timer| (timer.due_at, timer.handle));
        timers
    }

    /// Move the clock forward by `delta` and run everything that became due.
    ///
    /// Returns the number of callbacks that ran.
    pub fn advance(&mut self, delta: Duration) -> usize {
        let from = self.now;
        self.now = self.now.saturating_add(delta);
        let ran = self.run_queue(Some(self.now));
        trace!(?from, to = ?self.now, ran, "advanced clock");
        ran
    }

    /// Run the callbacks that are due without moving the clock.
    pub fn run_due(&mut self) -> usize {
        self.run_queue(Some(self.now))
    }

    /// Run every pending callback, moving the clock to each one's due time.
    pub fn flush(&mut self) -> usize {
        let from = self.now;
        let ran = self.run_queue(None);
        trace!(?from, to = ?self.now, ran, "flushed timers");
        ran
    }

    fn run_queue(&mut self, due_limit: Option<Duration>) -> usize {
        let mut ran = 0;
        while let Some(idx) = self.next_task_index(due_limit) {
            let task = self.tasks.remove(idx);
            if task.due_at > self.now {
                self.now = task.due_at;
            }
            trace!(handle = %task.handle, due_at = ?task.due_at, "running timer");
            (task.callback)();
            ran += 1;
        }
        ran
    }

    fn next_task_index(&self, due_limit: Option<Duration>) -> Option<usize> {
        self.tasks
            .iter()
            .enumerate()
            .filter(|(_, task)| due_limit.is_none_or(|limit| task.due_at <= limit))
            .min_by_key(|(_, task)| (task.due_at, task.handle))
            .map(|(idx, _)| idx)
    }
}
