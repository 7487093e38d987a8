//! Engine configuration types.
//!
//! Everything here is plain serde data so the CLI can load it from a
//! `config.toml` section without any glue.

use crate::error::{HexmapError, Result};
use crate::resolution::{Resolution, ResolutionSet};
use serde::{Deserialize, Serialize};

/// Configuration for viewport sampling.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CoverageConfig {
    /// Distance between samples on both axes, in degrees.
    /// Default: 0.1
    pub sample_step_deg: f64,
}

impl Default for CoverageConfig {
    fn default() -> Self {
        Self {
            sample_step_deg: 0.1,
        }
    }
}

impl CoverageConfig {
    /// Set the sampling step.
    pub fn with_sample_step(mut self, step_deg: f64) -> Self {
        self.sample_step_deg = step_deg;
        self
    }

    /// Check that the step can drive a finite walk.
    pub fn validate(&self) -> Result<()> {
        if !self.sample_step_deg.is_finite() || self.sample_step_deg <= 0.0 {
            return Err(HexmapError::Config(format!(
                "sample_step_deg must be finite and positive, got {}",
                self.sample_step_deg
            )));
        }
        Ok(())
    }
}

/// Configuration for click handling.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    /// Treat a latitude or longitude of exactly 0.0 as a missing coordinate.
    ///
    /// Clicks on the equator or the prime meridian are ignored while this is
    /// set. Default: true
    pub reject_zero_coordinates: bool,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            reject_zero_coordinates: true,
        }
    }
}

/// Camera position the map opens on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InitialView {
    pub latitude: f64,
    pub longitude: f64,
    pub zoom: f64,
}

impl Default for InitialView {
    fn default() -> Self {
        // San Francisco
        Self {
            latitude: 37.7749,
            longitude: -122.4194,
            zoom: 10.0,
        }
    }
}

/// Session defaults applied when a controller is created.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Resolutions active before the user picks any. Default: [7]
    pub default_resolutions: Vec<u8>,

    /// Initial camera.
    pub initial_view: InitialView,

    /// Base map style.
    pub map_style: MapStyle,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            default_resolutions: vec![7],
            initial_view: InitialView::default(),
            map_style: MapStyle::default(),
        }
    }
}

impl SessionConfig {
    /// Validate `default_resolutions` into a [`ResolutionSet`].
    pub fn resolution_set(&self) -> Result<ResolutionSet> {
        let resolutions = self
            .default_resolutions
            .iter()
            .map(|&r| Resolution::try_from(r))
            .collect::<Result<Vec<_>>>()?;
        ResolutionSet::new(resolutions)
    }
}

/// Base map style shown under the cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MapStyle {
    #[default]
    Streets,
    SatelliteStreets,
}

impl MapStyle {
    /// Style URL understood by the map widget.
    pub fn url(&self) -> &'static str {
        match self {
            MapStyle::Streets => "mapbox://styles/mapbox/streets-v11",
            MapStyle::SatelliteStreets => "mapbox://styles/mapbox/satellite-streets-v11",
        }
    }

    /// The other style.
    pub fn toggled(self) -> Self {
        match self {
            MapStyle::Streets => MapStyle::SatelliteStreets,
            MapStyle::SatelliteStreets => MapStyle::Streets,
        }
    }
}

/// Full engine configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HexmapConfig {
    pub coverage: CoverageConfig,
    pub selection: SelectionConfig,
    pub session: SessionConfig,
}

impl HexmapConfig {
    /// Set coverage configuration.
    pub fn with_coverage(mut self, coverage: CoverageConfig) -> Self {
        self.coverage = coverage;
        self
    }

    /// Set selection configuration.
    pub fn with_selection(mut self, selection: SelectionConfig) -> Self {
        self.selection = selection;
        self
    }

    /// Set session defaults.
    pub fn with_session(mut self, session: SessionConfig) -> Self {
        self.session = session;
        self
    }
}
