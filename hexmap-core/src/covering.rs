//! Viewport coverage by point sampling.
//!
//! For every active resolution the viewport is walked on a regular grid
//! (`sample_step_deg` on both axes) and each sample is mapped to its cell.
//! The union across resolutions, deduplicated, is the [`CoverageSet`].
//!
//! This is an approximation: once cells get smaller than the sampling step
//! (roughly resolution 8 and finer at the default 0.1°) whole cells between
//! samples are missed. Callers that need exact tiling must enumerate cells
//! hierarchically instead; the dedup and replace-on-update contract stays
//! the same.

use crate::cell_index::{CellId, CellIndex};
use crate::config::CoverageConfig;
use crate::dedup::CellDedup;
use crate::error::Result;
use crate::geometry::Viewport;
use crate::resolution::{Resolution, ResolutionSet};
use serde::{Deserialize, Serialize};

/// Statistics collected while generating a coverage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageStats {
    /// Sample points evaluated, summed over resolutions.
    pub samples: usize,

    /// Samples whose cell was already in the set.
    pub duplicates_dropped: usize,

    /// Distinct cells in the result.
    pub cells: usize,
}

/// Deduplicated cells covering a viewport.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoverageSet {
    cells: Vec<CellId>,
    resolutions: Vec<Resolution>,
    stats: CoverageStats,
}

impl CoverageSet {
    /// Empty coverage (no viewport seen yet).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Cells in first-sampled order.
    pub fn cells(&self) -> &[CellId] {
        &self.cells
    }

    /// Resolutions the set was generated for.
    pub fn resolutions(&self) -> &[Resolution] {
        &self.resolutions
    }

    pub fn stats(&self) -> &CoverageStats {
        &self.stats
    }

    /// Linear scan. Collect [`Self::iter`] into a hash set for repeated
    /// lookups.
    pub fn contains(&self, cell: CellId) -> bool {
        self.cells.contains(&cell)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = CellId> + '_ {
        self.cells.iter().copied()
    }
}

/// Generates [`CoverageSet`]s for viewports.
#[derive(Debug, Clone)]
pub struct CoverageGenerator {
    config: CoverageConfig,
}

impl CoverageGenerator {
    /// Create a generator, validating the sampling step.
    pub fn new(config: CoverageConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &CoverageConfig {
        &self.config
    }

    /// Cells covering `viewport` at every resolution in `resolutions`.
    ///
    /// A degenerate viewport (both corners equal) covers nothing.
    pub fn generate(
        &self,
        index: &dyn CellIndex,
        viewport: &Viewport,
        resolutions: &ResolutionSet,
    ) -> Result<CoverageSet> {
        if viewport.is_degenerate() {
            tracing::trace!(?viewport, "Degenerate viewport, empty coverage");
            return Ok(CoverageSet {
                resolutions: resolutions.as_slice().to_vec(),
                ..CoverageSet::default()
            });
        }

        let step = self.config.sample_step_deg;
        let mut dedup = CellDedup::with_capacity(capacity_hint(viewport.sample_count(step)));
        let mut samples = 0usize;

        for res in resolutions.iter() {
            for point in viewport.sample_grid(step) {
                samples += 1;
                dedup.push(index.point_to_cell(point, res)?);
            }
        }

        let stats = CoverageStats {
            samples,
            duplicates_dropped: dedup.duplicates(),
            cells: dedup.len(),
        };

        tracing::debug!(
            resolutions = resolutions.len(),
            samples = stats.samples,
            cells = stats.cells,
            duplicates = stats.duplicates_dropped,
            "Generated viewport coverage"
        );

        Ok(CoverageSet {
            cells: dedup.finish(),
            resolutions: resolutions.as_slice().to_vec(),
            stats,
        })
    }
}

/// Upper bound on cells reserved before sampling.
const MAX_PRESIZED_CELLS: usize = 4096;

/// Initial dedup capacity for `samples` sample points.
///
/// Samples overcount distinct cells by orders of magnitude at coarse
/// resolutions, so the reservation is capped and the set grows on demand.
fn capacity_hint(samples: usize) -> usize {
    samples.min(MAX_PRESIZED_CELLS)
}

impl Default for CoverageGenerator {
    fn default() -> Self {
        Self {
            config: CoverageConfig::default(),
        }
    }
}
