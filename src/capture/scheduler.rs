// src/capture/scheduler.rs
//
// Virtual-clock timer queue standing in for `setTimeout`. Time only moves
// when the owner says so, which keeps replays and tests deterministic.
// Tasks may be tagged with an owner so a whole watcher's backlog can be
// cancelled at once.

#[derive(Debug)]
struct Scheduled<T> {
    seq: u64,
    due: u64,
    owner: Option<u64>,
    task: T,
}

#[derive(Debug)]
pub struct TaskQueue<T> {
    now: u64,
    seq: u64,
    pending: Vec<Scheduled<T>>,
}

impl<T> Default for TaskQueue<T> {
    fn default() -> Self { Self::new() }
}

impl<T> TaskQueue<T> {
    pub fn new() -> Self {
        Self { now: 0, seq: 0, pending: Vec::new() }
    }

    /// Current virtual time, ms.
    pub fn now(&self) -> u64 { self.now }

    pub fn len(&self) -> usize { self.pending.len() }
    pub fn is_empty(&self) -> bool { self.pending.is_empty() }

    /// Queue `task` to fire `delay_ms` from now. Due times clamp at `u64::MAX`.
    pub fn schedule(&mut self, delay_ms: u64, owner: Option<u64>, task: T) {
        let seq = self.seq;
        self.seq += 1;
        let due = self.now.saturating_add(delay_ms);
        self.pending.push(Scheduled { seq, due, owner, task });
    }

    /// Drop every pending task tagged with `owner`. Returns how many.
    pub fn cancel_owner(&mut self, owner: u64) -> usize {
        let before = self.pending.len();
        self.pending.retain(|s| s.owner != Some(owner));
        before - self.pending.len()
    }

    pub fn next_due(&self) -> Option<u64> {
        self.pending.iter().map(|s| s.due).min()
    }

    /// Earliest task due at or before `until`, ties broken by schedule order.
    /// The clock jumps to that task's due time.
    pub fn pop_due(&mut self, until: u64) -> Option<T> {
        let ix = self.pending
            .iter()
            .enumerate()
            .filter(|(_, s)| s.due <= until)
            .min_by_key(|(_, s)| (s.due, s.seq))
            .map(|(i, _)| i)?;
        let s = self.pending.remove(ix);
        self.now = self.now.max(s.due);
        Some(s.task)
    }

    /// Move the clock forward without running anything. Never goes back.
    pub fn set_now(&mut self, t: u64) {
        self.now = self.now.max(t);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_in_due_then_schedule_order() {
        let mut q = TaskQueue::new();
        q.schedule(50, None, "b");
        q.schedule(10, None, "a");
        q.schedule(50, None, "c");
        q.schedule(90, None, "late");

        assert_eq!(q.pop_due(60), Some("a"));
        assert_eq!(q.now(), 10);
        assert_eq!(q.pop_due(60), Some("b"));
        assert_eq!(q.pop_due(60), Some("c"));
        assert_eq!(q.pop_due(60), None);
        assert_eq!(q.next_due(), Some(90));
    }

    #[test]
    fn cancel_by_owner() {
        let mut q = TaskQueue::new();
        q.schedule(5, Some(1), 1);
        q.schedule(5, Some(1), 2);
        q.schedule(5, Some(2), 3);
        q.schedule(5, None, 4);

        assert_eq!(q.cancel_owner(1), 2);
        assert_eq!(q.cancel_owner(1), 0);
        assert_eq!(q.len(), 2);
        assert_eq!(q.pop_due(5), Some(3));
        assert_eq!(q.pop_due(5), Some(4));
        assert!(q.is_empty());
    }

    #[test]
    fn huge_delays_clamp_instead_of_wrapping() {
        let mut q = TaskQueue::new();
        q.schedule(u64::MAX, None, "first");
        assert_eq!(q.pop_due(u64::MAX), Some("first"));
        assert_eq!(q.now(), u64::MAX);

        q.schedule(50, None, "second");
        q.schedule(u64::MAX, None, "third");
        assert_eq!(q.next_due(), Some(u64::MAX));
        assert_eq!(q.pop_due(u64::MAX), Some("second"));
        assert_eq!(q.pop_due(u64::MAX), Some("third"));
    }

    #[test]
    fn delays_are_relative_to_current_time() {
        let mut q = TaskQueue::new();
        q.set_now(100);
        q.set_now(40);
        assert_eq!(q.now(), 100);
        q.schedule(50, None, ());
        assert_eq!(q.next_due(), Some(150));
    }
}
