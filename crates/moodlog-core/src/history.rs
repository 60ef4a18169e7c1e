//! Bounded undo history of full-store snapshots.

use std::collections::VecDeque;

use crate::record::Record;

/// Number of snapshots kept before the oldest is dropped.
pub const UNDO_LIMIT: usize = 20;

/// Stack of store snapshots, newest last.
///
/// Pushing past capacity silently evicts the oldest snapshot.
#[derive(Debug, Clone)]
pub struct UndoBuffer {
    snapshots: VecDeque<Vec<Record>>,
    capacity: usize,
}

impl Default for UndoBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl UndoBuffer {
    pub fn new() -> Self {
        Self::with_capacity(UNDO_LIMIT)
    }

    /// A buffer holding at most `capacity` snapshots (at least one).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            snapshots: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, snapshot: Vec<Record>) {
        self.snapshots.push_back(snapshot);
        while self.snapshots.len() > self.capacity {
            self.snapshots.pop_front();
        }
    }

    pub fn pop(&mut self) -> Option<Vec<Record>> {
        self.snapshots.pop_back()
    }

    pub fn can_undo(&self) -> bool {
        !self.snapshots.is_empty()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
