//! Click-to-toggle cell selection.
//!
//! The store owns a single ordered list of [`SelectionEntry`] values. The
//! map outline layer and the detail panel read it through two projections,
//! [`SelectionStore::selection`] and [`SelectionStore::details`], which
//! borrow the same slice, so they can never disagree. A toggle computes
//! everything it needs before touching the list; a cell index failure
//! therefore leaves the selection exactly as it was.

use crate::cell_index::{CellId, CellIndex, CellMetadata};
use crate::config::SelectionConfig;
use crate::error::Result;
use crate::geometry::{ring_to_polygon, GeoPoint, Viewport};
use crate::resolution::Resolution;
use serde::{Deserialize, Serialize};
use std::ops::Deref;

/// One selected cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionEntry {
    pub cell: CellId,

    /// Where the user clicked.
    pub point: GeoPoint,

    pub metadata: CellMetadata,
}

/// What a toggle did.
#[derive(Debug, Clone, PartialEq)]
pub enum ToggleOutcome {
    /// The cell was added.
    Selected(SelectionEntry),
    /// The cell was already selected and has been removed.
    Deselected(CellId),
    /// Unusable coordinates; nothing changed.
    Ignored,
}

impl ToggleOutcome {
    /// The new entry, if the toggle added one.
    pub fn into_entry(self) -> Option<SelectionEntry> {
        match self {
            ToggleOutcome::Selected(entry) => Some(entry),
            _ => None,
        }
    }
}

/// Read-only view of the selection as drawn on the map.
#[derive(Debug, Clone, Copy)]
pub struct SelectionView<'a>(&'a [SelectionEntry]);

/// Read-only view of the selection as listed in the detail panel.
#[derive(Debug, Clone, Copy)]
pub struct DetailsView<'a>(&'a [SelectionEntry]);

impl Deref for SelectionView<'_> {
    type Target = [SelectionEntry];

    fn deref(&self) -> &Self::Target {
        self.0
    }
}

impl Deref for DetailsView<'_> {
    type Target = [SelectionEntry];

    fn deref(&self) -> &Self::Target {
        self.0
    }
}

/// Ordered selection keyed by cell.
#[derive(Debug, Clone, Default)]
pub struct SelectionStore {
    entries: Vec<SelectionEntry>,
    config: SelectionConfig,
}

impl SelectionStore {
    pub fn new(config: SelectionConfig) -> Self {
        Self {
            entries: Vec::new(),
            config,
        }
    }

    /// Toggle the cell under `point` at `res`.
    ///
    /// Returns the new entry when the cell was added, `None` when it was
    /// removed or when the point was ignored.
    pub fn toggle(
        &mut self,
        index: &dyn CellIndex,
        point: GeoPoint,
        res: Resolution,
    ) -> Result<Option<SelectionEntry>> {
        Ok(self.apply_toggle(index, point, res)?.into_entry())
    }

    /// Toggle and report which way it went.
    pub fn apply_toggle(
        &mut self,
        index: &dyn CellIndex,
        point: GeoPoint,
        res: Resolution,
    ) -> Result<ToggleOutcome> {
        if !self.accepts(point) {
            tracing::trace!(?point, "Ignoring click with unusable coordinates");
            return Ok(ToggleOutcome::Ignored);
        }

        let cell = index.point_to_cell(point, res)?;

        if let Some(pos) = self.position(cell) {
            self.entries.remove(pos);
            tracing::debug!(%cell, selected = self.entries.len(), "Deselected cell");
            return Ok(ToggleOutcome::Deselected(cell));
        }

        let metadata = index.cell_metadata(cell)?;
        let entry = SelectionEntry {
            cell,
            point,
            metadata,
        };
        self.entries.push(entry.clone());
        tracing::debug!(%cell, selected = self.entries.len(), "Selected cell");
        Ok(ToggleOutcome::Selected(entry))
    }

    /// Selection as drawn on the map.
    pub fn selection(&self) -> SelectionView<'_> {
        SelectionView(&self.entries)
    }

    /// Selection as listed in the detail panel.
    pub fn details(&self) -> DetailsView<'_> {
        DetailsView(&self.entries)
    }

    pub fn contains(&self, cell: CellId) -> bool {
        self.position(cell).is_some()
    }

    pub fn get(&self, cell: CellId) -> Option<&SelectionEntry> {
        self.entries.iter().find(|e| e.cell == cell)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Bounding viewport of all selected cell boundaries.
    pub fn extent(&self, index: &dyn CellIndex) -> Result<Option<Viewport>> {
        let polygons = self
            .entries
            .iter()
            .map(|e| index.cell_boundary(e.cell).map(|ring| ring_to_polygon(&ring)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Viewport::enclosing(polygons))
    }

    fn accepts(&self, point: GeoPoint) -> bool {
        if !point.is_finite() {
            return false;
        }
        !(self.config.reject_zero_coordinates && point.has_zero_coordinate())
    }

    fn position(&self, cell: CellId) -> Option<usize> {
        self.entries.iter().position(|e| e.cell == cell)
    }
}
