//! Viewport controller: the single entry point for map events.
//!
//! The controller owns all session state and reacts to three inbound events
//! from the map widget:
//!
//! - [`ViewportController::on_viewport_settled`] recomputes coverage for the
//!   new extent, replacing the previous set.
//! - [`ViewportController::on_resolutions_changed`] swaps the active
//!   resolutions. Coverage is **not** recomputed here; the next settle
//!   picks the new resolutions up.
//! - [`ViewportController::on_point_clicked`] toggles the clicked cell at
//!   the primary resolution and remembers it as the last clicked cell.
//!
//! Handlers take `&mut self` and run to completion; snapshots are `&self`
//! borrows or owned [`ControllerSnapshot`] copies.

use crate::cell_index::CellIndex;
use crate::config::{HexmapConfig, InitialView, MapStyle};
use crate::covering::{CoverageGenerator, CoverageSet};
use crate::error::Result;
use crate::geometry::{GeoPoint, Viewport};
use crate::resolution::ResolutionSet;
use crate::selection::{DetailsView, SelectionEntry, SelectionStore, SelectionView};
use serde::{Deserialize, Serialize};

/// Inbound map event, as delivered by a front end or an event script.
///
/// Corner pairs are `[lat, lng]`. A click with a missing coordinate is
/// treated like a non-finite one and ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum MapEvent {
    ViewportSettled {
        southwest: [f64; 2],
        northeast: [f64; 2],
    },
    ResolutionsChanged {
        resolutions: Vec<u8>,
    },
    PointClicked {
        #[serde(default)]
        lat: Option<f64>,
        #[serde(default)]
        lng: Option<f64>,
    },
    MapStyleToggled,
}

/// Owned copy of the controller's observable state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControllerSnapshot {
    pub viewport: Option<Viewport>,
    pub resolutions: ResolutionSet,
    pub coverage: CoverageSet,
    pub selection: Vec<SelectionEntry>,
    pub last_clicked: Option<SelectionEntry>,
    pub map_style: MapStyle,
}

/// Event-driven session state over a [`CellIndex`].
pub struct ViewportController<I: CellIndex> {
    index: I,
    generator: CoverageGenerator,
    store: SelectionStore,
    initial_view: InitialView,
    viewport: Option<Viewport>,
    resolutions: ResolutionSet,
    coverage: CoverageSet,
    last_clicked: Option<SelectionEntry>,
    map_style: MapStyle,
}

impl<I: CellIndex> ViewportController<I> {
    /// Create a controller from configuration.
    pub fn new(index: I, config: HexmapConfig) -> Result<Self> {
        let generator = CoverageGenerator::new(config.coverage)?;
        let resolutions = config.session.resolution_set()?;
        Ok(Self {
            index,
            generator,
            store: SelectionStore::new(config.selection),
            initial_view: config.session.initial_view,
            viewport: None,
            resolutions,
            coverage: CoverageSet::empty(),
            last_clicked: None,
            map_style: config.session.map_style,
        })
    }

    /// Create a controller with default configuration.
    pub fn with_defaults(index: I) -> Result<Self> {
        Self::new(index, HexmapConfig::default())
    }

    /// The map settled on a new extent.
    pub fn on_viewport_settled(&mut self, viewport: Viewport) -> Result<&CoverageSet> {
        let coverage = self
            .generator
            .generate(&self.index, &viewport, &self.resolutions)?;
        self.viewport = Some(viewport);
        self.coverage = coverage;
        Ok(&self.coverage)
    }

    /// The user picked a new set of resolutions.
    ///
    /// Takes effect on the next [`Self::on_viewport_settled`].
    pub fn on_resolutions_changed(&mut self, resolutions: ResolutionSet) {
        tracing::debug!(
            resolutions = ?resolutions.as_slice(),
            "Active resolutions changed"
        );
        self.resolutions = resolutions;
    }

    /// The user clicked the map.
    ///
    /// Returns the new entry if the click selected a cell.
    pub fn on_point_clicked(&mut self, point: GeoPoint) -> Result<Option<SelectionEntry>> {
        let res = self.resolutions.primary();
        let added = self.store.toggle(&self.index, point, res)?;
        if let Some(entry) = &added {
            self.last_clicked = Some(entry.clone());
        }
        Ok(added)
    }

    /// Switch between street and satellite base maps.
    pub fn on_map_style_toggled(&mut self) -> MapStyle {
        self.map_style = self.map_style.toggled();
        self.map_style
    }

    /// Dispatch a [`MapEvent`] to its handler.
    ///
    /// Invalid viewports and resolution sets are errors; state is unchanged
    /// when one is returned.
    pub fn handle(&mut self, event: MapEvent) -> Result<()> {
        match event {
            MapEvent::ViewportSettled {
                southwest,
                northeast,
            } => {
                let viewport = Viewport::from_corners(
                    (southwest[0], southwest[1]),
                    (northeast[0], northeast[1]),
                )?;
                self.on_viewport_settled(viewport)?;
            }
            MapEvent::ResolutionsChanged { resolutions } => {
                self.on_resolutions_changed(ResolutionSet::from_levels(&resolutions)?);
            }
            MapEvent::PointClicked { lat, lng } => {
                let point = GeoPoint::new(lat.unwrap_or(f64::NAN), lng.unwrap_or(f64::NAN));
                self.on_point_clicked(point)?;
            }
            MapEvent::MapStyleToggled => {
                self.on_map_style_toggled();
            }
        }
        Ok(())
    }

    pub fn index(&self) -> &I {
        &self.index
    }

    pub fn viewport(&self) -> Option<&Viewport> {
        self.viewport.as_ref()
    }

    pub fn initial_view(&self) -> InitialView {
        self.initial_view
    }

    pub fn resolutions(&self) -> &ResolutionSet {
        &self.resolutions
    }

    /// Coverage for the last settled viewport.
    pub fn coverage(&self) -> &CoverageSet {
        &self.coverage
    }

    pub fn selection(&self) -> SelectionView<'_> {
        self.store.selection()
    }

    pub fn details(&self) -> DetailsView<'_> {
        self.store.details()
    }

    pub fn selection_store(&self) -> &SelectionStore {
        &self.store
    }

    /// Most recently selected cell, kept across deselects.
    pub fn last_clicked(&self) -> Option<&SelectionEntry> {
        self.last_clicked.as_ref()
    }

    pub fn map_style(&self) -> MapStyle {
        self.map_style
    }

    /// Owned copy of everything observable.
    pub fn snapshot(&self) -> ControllerSnapshot {
        ControllerSnapshot {
            viewport: self.viewport,
            resolutions: self.resolutions.clone(),
            coverage: self.coverage.clone(),
            selection: self.store.selection().to_vec(),
            last_clicked: self.last_clicked.clone(),
            map_style: self.map_style,
        }
    }
}
