#![forbid(unsafe_code)]

//! Next-frame deferred tasks.
//!
//! Work that must wait for the host to render (moving focus onto a freshly
//! rendered list, tearing down a drag after the close transition starts) is
//! queued in a [`FrameScheduler`] and drained on the host's frame tick.
//!
//! Each [`TaskSlot`] holds at most one task. Scheduling into an occupied slot
//! cancels the pending task, so re-triggering never runs stale work.
//!
//! # Invariants
//!
//! 1. At most one pending task per slot.
//! 2. [`take_due`](FrameScheduler::take_due) returns tasks in scheduling order
//!    and leaves every slot empty.
//! 3. A cancelled task never runs.

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Independent lanes of deferred work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskSlot {
    /// Focus moves.
    Focus,
    /// Drag session teardown.
    DragReset,
}

impl TaskSlot {
    const COUNT: usize = 2;

    const fn index(self) -> usize {
        match self {
            Self::Focus => 0,
            Self::DragReset => 1,
        }
    }
}

/// A unit of deferred work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeferredTask {
    /// Focus the first item of the visible list.
    FocusFirstItem,
    /// Drop the drag session and return the offset to 0.
    ResetDrag,
}

impl DeferredTask {
    /// Slot this task occupies.
    #[must_use]
    pub const fn slot(self) -> TaskSlot {
        match self {
            Self::FocusFirstItem => TaskSlot::Focus,
            Self::ResetDrag => TaskSlot::DragReset,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    task: DeferredTask,
    seq: u64,
}

// ---------------------------------------------------------------------------
// FrameScheduler
// ---------------------------------------------------------------------------

/// Cancelable single-slot task queue drained once per frame.
#[derive(Debug, Clone, Default)]
pub struct FrameScheduler {
    slots: [Option<Pending>; TaskSlot::COUNT],
    next_seq: u64,
}

impl FrameScheduler {
    /// An empty scheduler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `task` for the next frame.
    ///
    /// Returns the task it displaced from the same slot, if any.
    pub fn schedule(&mut self, task: DeferredTask) -> Option<DeferredTask> {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.slots[task.slot().index()]
            .replace(Pending { task, seq })
            .map(|p| p.task)
    }

    /// Cancel the pending task in `slot`.
    pub fn cancel(&mut self, slot: TaskSlot) -> Option<DeferredTask> {
        self.slots[slot.index()].take().map(|p| p.task)
    }

    /// Cancel everything.
    pub fn cancel_all(&mut self) {
        self.slots = [None; TaskSlot::COUNT];
    }

    /// Remove the pending task in `slot` so the caller can run it now.
    pub fn flush(&mut self, slot: TaskSlot) -> Option<DeferredTask> {
        self.cancel(slot)
    }

    /// Whether `slot` has a pending task.
    #[must_use]
    pub fn is_pending(&self, slot: TaskSlot) -> bool {
        self.slots[slot.index()].is_some()
    }

    /// Number of pending tasks.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    /// Take every pending task, oldest first.
    pub fn take_due(&mut self) -> Vec<DeferredTask> {
        let mut due: Vec<Pending> = self.slots.iter_mut().filter_map(Option::take).collect();
        due.sort_by_key(|p| p.seq);
        due.into_iter().map(|p| p.task).collect()
    }
}
