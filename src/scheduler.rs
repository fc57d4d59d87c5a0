//! Scheduler
//!
//! A one-shot task queue driven by virtual time. Nothing here reads the wall
//! clock: callers move time forward explicitly, which keeps page timers
//! (toast fades, the newsletter popup, the checkout hand-off) deterministic.

use std::time::Duration;

use slotmap::{SlotMap, new_key_type};
use smallvec::SmallVec;

new_key_type! {
    /// Handle to a scheduled task, used to cancel it.
    pub struct TaskKey;
}

#[derive(Debug)]
struct Scheduled<T> {
    deadline: Duration,
    seq: u64,
    task: T,
}

/// Cancellable one-shot tasks ordered by deadline, then by scheduling order.
#[derive(Debug)]
pub struct Scheduler<T> {
    now: Duration,
    next_seq: u64,
    tasks: SlotMap<TaskKey, Scheduled<T>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self {
            now: Duration::ZERO,
            next_seq: 0,
            tasks: SlotMap::with_key(),
        }
    }
}

impl<T> Scheduler<T> {
    /// Create a scheduler at time zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Run `task` once, `delay` after the current time.
    pub fn schedule(&mut self, delay: Duration, task: T) -> TaskKey {
        let seq = self.next_seq;
        self.next_seq += 1;

        self.tasks.insert(Scheduled {
            deadline: self.now.saturating_add(delay),
            seq,
            task,
        })
    }

    /// Cancel a pending task, returning it if it had not fired yet.
    pub fn cancel(&mut self, key: TaskKey) -> Option<T> {
        self.tasks.remove(key).map(|scheduled| scheduled.task)
    }

    /// Whether a task is still waiting to fire.
    pub fn is_pending(&self, key: TaskKey) -> bool {
        self.tasks.contains_key(key)
    }

    /// Deadline of the next task to fire.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.tasks.values().map(|scheduled| scheduled.deadline).min()
    }

    /// Number of pending tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Check if no tasks are pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Remove the earliest task due at or before `until`, moving the clock to its deadline.
    ///
    /// Callers that run tasks one at a time may schedule more work in between;
    /// anything due before `until` is picked up by the next call.
    pub fn pop_due(&mut self, until: Duration) -> Option<(TaskKey, T)> {
        let key = self
            .tasks
            .iter()
            .filter(|(_, scheduled)| scheduled.deadline <= until)
            .min_by_key(|(_, scheduled)| (scheduled.deadline, scheduled.seq))
            .map(|(key, _)| key)?;

        let scheduled = self.tasks.remove(key)?;

        self.now = self.now.max(scheduled.deadline);

        Some((key, scheduled.task))
    }

    /// Move the clock forward to `until`. Time never moves backwards.
    pub fn settle_at(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }

    /// Run every task due within `by` through `run`, then settle the clock.
    ///
    /// `run` gets the scheduler back so a task can schedule follow-ups; those
    /// run in the same pass when they fall due before the end of `by`.
    pub fn advance_with(&mut self, by: Duration, mut run: impl FnMut(&mut Self, T)) {
        let until = self.now.saturating_add(by);

        while let Some((_, task)) = self.pop_due(until) {
            run(self, task);
        }

        self.settle_at(until);
    }

    /// Fire every task due within `by`, returning them in firing order.
    pub fn advance(&mut self, by: Duration) -> SmallVec<[T; 4]> {
        let mut fired = SmallVec::new();

        self.advance_with(by, |_, task| fired.push(task));

        fired
    }
}
