//! # Undo/Redo History
//!
//! Linear log of whole-project snapshots plus a cursor.
//!
//! ## Design
//!
//! - `commit` drops any redo future, appends, and moves the cursor to the tail
//! - Oldest snapshots are evicted once the log exceeds its limit (FIFO); the
//!   cursor is re-based so it keeps pointing at the same snapshot
//! - Snapshots are owned copies; everything handed out is a fresh clone, so
//!   callers can't reach back into the log
//!
//! ## Example
//!
//! ```rust,ignore
//! let mut history = History::new(project.clone(), 100);
//! history.commit(&edited);
//! let previous = history.undo();
//! let again = history.redo();
//! ```

use blockcraft_schema::Project;

/// Default number of snapshots kept
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

#[derive(Debug, Clone)]
pub struct History {
    snapshots: Vec<Project>,
    cursor: usize,
    limit: usize,
}

impl History {
    /// Single-entry history seeded with `initial`
    pub fn new(initial: Project, limit: usize) -> Self {
        Self {
            snapshots: vec![initial],
            cursor: 0,
            limit: limit.max(1),
        }
    }

    /// Discard everything and start over from `initial`
    pub fn reset(&mut self, initial: Project) {
        self.snapshots.clear();
        self.snapshots.push(initial);
        self.cursor = 0;
    }

    /// Record a new snapshot after the cursor
    pub fn commit(&mut self, snapshot: &Project) {
        self.snapshots.truncate(self.cursor + 1);
        self.snapshots.push(snapshot.clone());

        if self.snapshots.len() > self.limit {
            let overflow = self.snapshots.len() - self.limit;
            self.snapshots.drain(..overflow);
            tracing::trace!("history evicted {} snapshot(s)", overflow);
        }

        self.cursor = self.snapshots.len() - 1;
    }

    /// Step back; returns the now-current snapshot (unchanged at the start)
    pub fn undo(&mut self) -> Project {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
        self.current()
    }

    /// Step forward; returns the now-current snapshot (unchanged at the tail)
    pub fn redo(&mut self) -> Project {
        if self.cursor + 1 < self.snapshots.len() {
            self.cursor += 1;
        }
        self.current()
    }

    pub fn current(&self) -> Project {
        self.snapshots[self.cursor].clone()
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Rewrite every snapshot in place.
    ///
    /// Only for facts that are not edits, such as the durable project id
    /// issued on first save; undo must never bring the old value back.
    pub fn rewrite(&mut self, mut f: impl FnMut(&mut Project)) {
        for snapshot in &mut self.snapshots {
            f(snapshot);
        }
    }
}
