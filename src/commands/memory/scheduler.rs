use tokio::time::Instant;

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct TimerHandle(u64);

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Task {
    /// Turn a mismatched pair back over.
    Revert { pair: [usize; 2] },
    /// Republish the session clock.
    Tick,
}

#[derive(Debug)]
struct Entry {
    handle: TimerHandle,
    deadline: Instant,
    task: Task,
}

/// Deferred tasks owned by the engine. Nothing runs on its own: the host asks
/// for [`Scheduler::next_deadline`] and drains due entries with
/// [`Scheduler::pop_due`].
#[derive(Debug, Default)]
pub struct Scheduler {
    next_id: u64,
    entries: Vec<Entry>,
}

impl Scheduler {
    pub fn schedule(&mut self, deadline: Instant, task: Task) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry {
            handle,
            deadline,
            task,
        });
        handle
    }

    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.handle != handle);
        self.entries.len() != before
    }

    pub fn cancel_all(&mut self) -> usize {
        let cancelled = self.entries.len();
        self.entries.clear();
        cancelled
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.entries.iter().map(|entry| entry.deadline).min()
    }

    /// Removes and returns the earliest entry due at `now`. Entries sharing a
    /// deadline come out in scheduling order.
    pub fn pop_due(&mut self, now: Instant) -> Option<(TimerHandle, Instant, Task)> {
        let position = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.deadline <= now)
            .min_by_key(|(_, entry)| (entry.deadline, entry.handle))
            .map(|(position, _)| position)?;

        let entry = self.entries.remove(position);
        Some((entry.handle, entry.deadline, entry.task))
    }
}
