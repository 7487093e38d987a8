//! Error types for the coverage and selection engine.

use thiserror::Error;

/// Engine errors.
///
/// Invalid click coordinates are not errors: the selection store absorbs
/// them as no-ops. Everything here is either a configuration mistake or a
/// failure reported by the cell index.
#[derive(Error, Debug)]
pub enum HexmapError {
    /// Resolution outside the index's supported range (0-15).
    #[error("Invalid resolution: {0} (expected 0..=15)")]
    InvalidResolution(u8),

    /// A 64-bit handle that does not name a valid cell.
    #[error("Invalid cell index: {0:#x}")]
    InvalidCell(u64),

    /// The cell index rejected its input or broke one of its own invariants.
    #[error("Cell index error: {0}")]
    GeometryLibrary(String),

    /// Viewport corners out of order or not finite.
    #[error("Invalid viewport: {0}")]
    InvalidViewport(String),

    /// At least one resolution must stay active.
    #[error("Resolution set must not be empty")]
    EmptyResolutionSet,

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, HexmapError>;
