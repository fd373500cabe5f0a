use starlane_ports::types::{Millis, Pitch};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskHandle(u64);

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Task {
    SessionTick,
    PlaybackNote { pitch: Pitch },
    PlaybackEnd,
    SettleFeedback,
}

#[derive(Clone, Debug)]
struct Pending {
    handle: TaskHandle,
    due_ms: Millis,
    task: Task,
}

/// Single-threaded timer queue. The host pumps it from its refresh loop;
/// nothing here blocks or spawns threads.
///
/// Tasks run in due order, ties in scheduling order. A cancelled handle never
/// fires, and handles are never reused.
#[derive(Debug, Default)]
pub struct FrameLoop {
    next_id: u64,
    pending: Vec<Pending>,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule_at(&mut self, due_ms: Millis, task: Task) -> TaskHandle {
        let handle = TaskHandle(self.next_id);
        self.next_id += 1;
        let idx = self.pending.partition_point(|p| p.due_ms <= due_ms);
        self.pending.insert(
            idx,
            Pending {
                handle,
                due_ms,
                task,
            },
        );
        handle
    }

    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|p| p.handle != handle);
        self.pending.len() != before
    }

    pub fn cancel_all<I>(&mut self, handles: I) -> usize
    where
        I: IntoIterator<Item = TaskHandle>,
    {
        handles
            .into_iter()
            .filter(|&handle| self.cancel(handle))
            .count()
    }

    pub fn is_pending(&self, handle: TaskHandle) -> bool {
        self.pending.iter().any(|p| p.handle == handle)
    }

    pub fn next_due_ms(&self) -> Option<Millis> {
        self.pending.first().map(|p| p.due_ms)
    }

    /// Removes and returns the earliest task due at or before `now_ms`.
    pub fn pop_due(&mut self, now_ms: Millis) -> Option<(TaskHandle, Task)> {
        if self.pending.first()?.due_ms > now_ms {
            return None;
        }
        let p = self.pending.remove(0);
        Some((p.handle, p.task))
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
