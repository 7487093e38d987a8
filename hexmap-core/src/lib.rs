//! Hexagonal coverage and selection engine.
//!
//! This crate powers an H3 map explorer. It turns map events into two pieces
//! of state that a rendering layer can draw:
//!
//! - **Coverage**: the deduplicated set of cells covering the current
//!   viewport at one or more resolutions (drawn as filled polygons).
//! - **Selection**: an ordered list of cells the user toggled by clicking,
//!   each with derived metadata (drawn as outlines and listed in a detail
//!   panel).
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     ViewportController                       │
//! ├──────────────────────────────────────────────────────────────┤
//! │  viewport settled        resolutions changed   point clicked │
//! └──────────┬───────────────────────┬───────────────────┬───────┘
//!            │                       │ (lazy: next       │
//!            ▼                       │  settle)          ▼
//!   CoverageGenerator                ▼            SelectionStore
//!   (grid sampling) ◄──────── ResolutionSet ────► (toggle by cell)
//!            │                                           │
//!            ▼                                           ▼
//!   CellDedup (first seen)                  selection / details views
//!            │                                           │
//!            └───────────────┬───────────────────────────┘
//!                            ▼
//!                       CellIndex (h3o)
//! ```
//!
//! # Modules
//!
//! - [`config`]: Engine configuration types
//! - [`cell_index`]: Cell index trait and the `h3o` implementation
//! - [`geometry`]: Points, viewports and polygon conversion
//! - [`resolution`]: Validated resolutions and the active set
//! - [`covering`]: Viewport coverage by point sampling
//! - [`dedup`]: First-seen cell deduplication
//! - [`selection`]: Toggle-by-cell selection store
//! - [`controller`]: Event handling and snapshots
//! - [`render`]: GeoJSON feature collections for map layers
//! - [`error`]: Error types

pub mod cell_index;
pub mod config;
pub mod controller;
pub mod covering;
pub mod dedup;
pub mod error;
pub mod geometry;
pub mod render;
pub mod resolution;
pub mod selection;

// Re-export key types
pub use cell_index::{AreaUnit, CellId, CellIndex, CellMetadata, H3CellIndex};
pub use config::{CoverageConfig, HexmapConfig, InitialView, MapStyle, SelectionConfig, SessionConfig};
pub use controller::{ControllerSnapshot, MapEvent, ViewportController};
pub use covering::{CoverageGenerator, CoverageSet, CoverageStats};
pub use error::{HexmapError, Result};
pub use geometry::{GeoPoint, Viewport};
pub use resolution::{Resolution, ResolutionSet};
pub use selection::{DetailsView, SelectionEntry, SelectionStore, SelectionView, ToggleOutcome};
