//! Deduplication of sampled cells.
//!
//! Neighbouring samples, and samples at different resolutions that land in
//! the same cell, produce the same [`CellId`] many times. Coverage keeps the
//! first occurrence of each cell and preserves encounter order, so output
//! is deterministic for a given viewport.

use crate::cell_index::CellId;
use rustc_hash::FxHashSet;

/// Incremental deduplicator that counts what it drops.
#[derive(Debug, Default)]
pub struct CellDedup {
    seen: FxHashSet<CellId>,
    cells: Vec<CellId>,
    duplicates: usize,
}

impl CellDedup {
    /// Create a deduplicator sized for roughly `capacity` distinct cells.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut seen = FxHashSet::default();
        seen.reserve(capacity);
        Self {
            seen,
            cells: Vec::with_capacity(capacity),
            duplicates: 0,
        }
    }

    /// Add a cell. Returns `true` if it had not been seen before.
    pub fn push(&mut self, cell: CellId) -> bool {
        if self.seen.insert(cell) {
            self.cells.push(cell);
            true
        } else {
            self.duplicates += 1;
            false
        }
    }

    /// Number of repeats dropped so far.
    pub fn duplicates(&self) -> usize {
        self.duplicates
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Distinct cells in first-seen order.
    pub fn finish(self) -> Vec<CellId> {
        self.cells
    }
}
