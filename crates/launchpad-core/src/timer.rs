//! Cancellable deadline queue
//!
//! Deferred work is a deadline plus a tag. The owner drives the queue with
//! [`Timers::pop_due`] from its event loop, so nothing fires behind its back
//! and a cancelled task can never run.

use std::time::{Duration, Instant};

/// Handle for a scheduled task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

#[derive(Debug, Clone)]
struct Scheduled<K> {
    id: TaskId,
    deadline: Instant,
    kind: K,
}

/// Pending tasks tagged with `K`
#[derive(Debug, Clone)]
pub struct Timers<K> {
    next_id: u64,
    pending: Vec<Scheduled<K>>,
}

impl<K> Default for Timers<K> {
    fn default() -> Self {
        Self {
            next_id: 0,
            pending: Vec::new(),
        }
    }
}

impl<K: Copy + PartialEq> Timers<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `kind` to fire `delay` after `now`
    pub fn schedule(&mut self, kind: K, now: Instant, delay: Duration) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.pending.push(Scheduled {
            id,
            deadline: now + delay,
            kind,
        });
        id
    }

    /// Cancel one task, returning whether it was still pending
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|task| task.id != id);
        self.pending.len() != before
    }

    /// Cancel every pending task of one kind
    pub fn cancel_kind(&mut self, kind: K) -> usize {
        let before = self.pending.len();
        self.pending.retain(|task| task.kind != kind);
        before - self.pending.len()
    }

    /// Cancel everything
    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    pub fn is_pending(&self, id: TaskId) -> bool {
        self.pending.iter().any(|task| task.id == id)
    }

    /// Whether a task of this kind is waiting
    pub fn has_pending(&self, kind: K) -> bool {
        self.pending.iter().any(|task| task.kind == kind)
    }

    /// Earliest deadline among pending tasks
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.iter().map(|task| task.deadline).min()
    }

    /// Remove and return the earliest task whose deadline has passed
    ///
    /// Tasks with equal deadlines come out in scheduling order.
    pub fn pop_due(&mut self, now: Instant) -> Option<(TaskId, K)> {
        let index = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, task)| task.deadline <= now)
            .min_by_key(|(_, task)| (task.deadline, task.id))
            .map(|(index, _)| index)?;

        let task = self.pending.remove(index);
        Some((task.id, task.kind))
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Kind {
        A,
        B,
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_pop_due_respects_deadlines() {
        let t0 = Instant::now();
        let mut timers = Timers::new();
        timers.schedule(Kind::A, t0, ms(300));
        timers.schedule(Kind::B, t0, ms(100));

        assert!(timers.pop_due(t0 + ms(50)).is_none());
        assert_eq!(timers.pop_due(t0 + ms(400)).map(|(_, k)| k), Some(Kind::B));
        assert_eq!(timers.pop_due(t0 + ms(400)).map(|(_, k)| k), Some(Kind::A));
        assert!(timers.is_empty());
    }

    #[test]
    fn test_equal_deadlines_fire_in_schedule_order() {
        let t0 = Instant::now();
        let mut timers = Timers::new();
        let first = timers.schedule(Kind::B, t0, ms(10));
        let second = timers.schedule(Kind::A, t0, ms(10));

        assert_eq!(timers.pop_due(t0 + ms(10)).map(|(id, _)| id), Some(first));
        assert_eq!(timers.pop_due(t0 + ms(10)).map(|(id, _)| id), Some(second));
    }

    #[test]
    fn test_cancelled_task_never_fires() {
        let t0 = Instant::now();
        let mut timers = Timers::new();
        let id = timers.schedule(Kind::A, t0, ms(10));

        assert!(timers.is_pending(id));
        assert!(timers.cancel(id));
        assert!(!timers.cancel(id));
        assert!(timers.pop_due(t0 + ms(100)).is_none());
    }

    #[test]
    fn test_cancel_kind_and_next_deadline() {
        let t0 = Instant::now();
        let mut timers = Timers::new();
        timers.schedule(Kind::A, t0, ms(10));
        timers.schedule(Kind::A, t0, ms(20));
        timers.schedule(Kind::B, t0, ms(30));

        assert_eq!(timers.next_deadline(), Some(t0 + ms(10)));
        assert_eq!(timers.cancel_kind(Kind::A), 2);
        assert!(!timers.has_pending(Kind::A));
        assert_eq!(timers.next_deadline(), Some(t0 + ms(30)));

        timers.cancel_all();
        assert_eq!(timers.next_deadline(), None);
    }
}
