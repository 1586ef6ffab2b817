use crate::model::{Project, Segment};
use crate::store::DataStore;
use std::collections::HashSet;

/// Bound on the undo stack. The oldest snapshot is evicted on overflow.
pub const MAX_HISTORY: usize = 20;

/// Deep copy of the full dataset at one point in time. Owned exclusively by
/// the history stacks; restoring hands the live store an independent copy,
/// so later edits can never reach back into stored snapshots.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    projects: Vec<Project>,
    segments: Vec<Segment>,
    selected_projects: HashSet<String>,
}

impl Snapshot {
    pub fn capture(store: &DataStore) -> Self {
        Self {
            projects: store.projects().to_vec(),
            segments: store.segments().to_vec(),
            selected_projects: store.selected_projects().clone(),
        }
    }

    pub fn restore(self, store: &mut DataStore) {
        store.restore(self.projects, self.segments, self.selected_projects);
    }
}

/// The two bounded stacks behind undo/redo. Whole-dataset snapshots rather
/// than structural diffs: simple, correct, and bounded by [`MAX_HISTORY`].
#[derive(Debug, Default)]
pub struct History {
    undo_stack: Vec<Snapshot>,
    redo_stack: Vec<Snapshot>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a snapshot to the undo stack, evicting the oldest entry past
    /// the bound. Every push invalidates the redo stack: linear history,
    /// no branching timeline.
    pub fn push(&mut self, snapshot: Snapshot) {
        self.undo_stack.push(snapshot);
        if self.undo_stack.len() > MAX_HISTORY {
            self.undo_stack.remove(0);
        }
        self.redo_stack.clear();
    }

    /// Append to the undo stack with the same eviction bound but without
    /// touching the redo stack. Used by redo, which parks the current state
    /// as a new undo step while snapshots are still queued for replay.
    pub fn push_keep_redo(&mut self, snapshot: Snapshot) {
        self.undo_stack.push(snapshot);
        if self.undo_stack.len() > MAX_HISTORY {
            self.undo_stack.remove(0);
        }
    }

    pub fn pop_undo(&mut self) -> Option<Snapshot> {
        self.undo_stack.pop()
    }

    pub fn pop_redo(&mut self) -> Option<Snapshot> {
        self.redo_stack.pop()
    }

    pub fn push_redo(&mut self, snapshot: Snapshot) {
        self.redo_stack.push(snapshot);
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }
}
