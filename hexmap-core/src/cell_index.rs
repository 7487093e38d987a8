//! Hexagonal cell index.
//!
//! The engine only talks to the grid through the [`CellIndex`] trait: point
//! to cell, and cell to boundary / faces / base cell / pentagon flag / area.
//! [`H3CellIndex`] implements it on top of the `h3o` crate.
//!
//! Cell identifiers are carried around as [`CellId`], a plain 64-bit handle.
//! Handles are only interpreted by the index that produced them; the engine
//! compares and hashes them and nothing else.

use crate::error::{HexmapError, Result};
use crate::geometry::GeoPoint;
use crate::resolution::Resolution;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Square kilometres per square mile.
const KM2_PER_MI2: f64 = 2.589_988_110_336;

/// Opaque cell identifier.
///
/// Displays and serializes as the lower-case hexadecimal form used by H3
/// tooling (e.g. `872830828ffffff`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellId(u64);

impl CellId {
    /// Wrap a raw handle. Validity is checked by the index on use.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw 64-bit handle.
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:x}", self.0)
    }
}

impl FromStr for CellId {
    type Err = HexmapError;

    fn from_str(s: &str) -> Result<Self> {
        u64::from_str_radix(s.trim(), 16)
            .map(CellId)
            .map_err(|e| HexmapError::GeometryLibrary(format!("bad cell string {s:?}: {e}")))
    }
}

impl Serialize for CellId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CellId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Unit for [`CellIndex::cell_area`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AreaUnit {
    #[serde(rename = "m2")]
    SquareMeters,
    #[default]
    #[serde(rename = "km2")]
    SquareKilometers,
    #[serde(rename = "mi2")]
    SquareMiles,
}

impl AreaUnit {
    /// Machine token, as accepted by `FromStr` and used by serde.
    pub fn as_str(&self) -> &'static str {
        match self {
            AreaUnit::SquareMeters => "m2",
            AreaUnit::SquareKilometers => "km2",
            AreaUnit::SquareMiles => "mi2",
        }
    }

    /// Typographic suffix for human-readable output.
    pub fn suffix(&self) -> &'static str {
        match self {
            AreaUnit::SquareMeters => "m²",
            AreaUnit::SquareKilometers => "km²",
            AreaUnit::SquareMiles => "mi²",
        }
    }
}

impl FromStr for AreaUnit {
    type Err = HexmapError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "m2" => Ok(AreaUnit::SquareMeters),
            "km2" => Ok(AreaUnit::SquareKilometers),
            "mi2" => Ok(AreaUnit::SquareMiles),
            other => Err(HexmapError::Config(format!(
                "unknown area unit {other:?} (expected m2, km2 or mi2)"
            ))),
        }
    }
}

/// Derived attributes of a cell, computed on demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellMetadata {
    pub cell: CellId,

    pub resolution: Resolution,

    /// Topological vertex count: 5 for pentagons, 6 otherwise.
    pub boundary_vertex_count: usize,

    /// Icosahedron faces the cell touches, ascending.
    pub icosahedron_faces: Vec<u8>,

    pub base_cell: u8,

    pub is_pentagon: bool,

    pub area_km2: f64,
}

/// Hierarchical hexagonal grid operations.
///
/// Every method is pure. Errors mean the input was outside the index's
/// domain (non-finite coordinates, unknown handle) and are not expected in
/// normal operation.
pub trait CellIndex: Send + Sync {
    /// Cell containing `point` at `res`.
    fn point_to_cell(&self, point: GeoPoint, res: Resolution) -> Result<CellId>;

    /// Resolution the cell belongs to.
    fn cell_resolution(&self, cell: CellId) -> Result<Resolution>;

    /// Boundary as an open ring (the first point closes it).
    fn cell_boundary(&self, cell: CellId) -> Result<Vec<GeoPoint>>;

    /// Icosahedron faces intersected by the cell, ascending.
    fn cell_faces(&self, cell: CellId) -> Result<Vec<u8>>;

    /// Base cell number (0-121).
    fn cell_base_number(&self, cell: CellId) -> Result<u8>;

    fn cell_is_pentagon(&self, cell: CellId) -> Result<bool>;

    /// Cell area in `unit`.
    fn cell_area(&self, cell: CellId, unit: AreaUnit) -> Result<f64>;

    /// All derived attributes in one go.
    fn cell_metadata(&self, cell: CellId) -> Result<CellMetadata> {
        let is_pentagon = self.cell_is_pentagon(cell)?;
        Ok(CellMetadata {
            cell,
            resolution: self.cell_resolution(cell)?,
            boundary_vertex_count: if is_pentagon { 5 } else { 6 },
            icosahedron_faces: self.cell_faces(cell)?,
            base_cell: self.cell_base_number(cell)?,
            is_pentagon,
            area_km2: self.cell_area(cell, AreaUnit::SquareKilometers)?,
        })
    }
}

/// [`CellIndex`] backed by `h3o`.
#[derive(Debug, Clone, Copy, Default)]
pub struct H3CellIndex;

impl H3CellIndex {
    pub fn new() -> Self {
        Self
    }

    fn h3_cell(cell: CellId) -> Result<h3o::CellIndex> {
        h3o::CellIndex::try_from(cell.raw()).map_err(|_| HexmapError::InvalidCell(cell.raw()))
    }

    fn h3_resolution(res: Resolution) -> Result<h3o::Resolution> {
        h3o::Resolution::try_from(res.get())
            .map_err(|_| HexmapError::InvalidResolution(res.get()))
    }
}

impl CellIndex for H3CellIndex {
    fn point_to_cell(&self, point: GeoPoint, res: Resolution) -> Result<CellId> {
        let ll = h3o::LatLng::new(point.latitude, point.longitude)
            .map_err(|e| HexmapError::GeometryLibrary(format!("{point:?}: {e}")))?;
        let cell = ll.to_cell(Self::h3_resolution(res)?);
        Ok(CellId(u64::from(cell)))
    }

    fn cell_resolution(&self, cell: CellId) -> Result<Resolution> {
        let res = Self::h3_cell(cell)?.resolution();
        Resolution::try_from(u8::from(res))
    }

    fn cell_boundary(&self, cell: CellId) -> Result<Vec<GeoPoint>> {
        let boundary = Self::h3_cell(cell)?.boundary();
        Ok(boundary
            .iter()
            .map(|ll| GeoPoint::new(ll.lat(), ll.lng()))
            .collect())
    }

    fn cell_faces(&self, cell: CellId) -> Result<Vec<u8>> {
        let mut faces: Vec<u8> = Self::h3_cell(cell)?
            .icosahedron_faces()
            .iter()
            .map(u8::from)
            .collect();
        faces.sort_unstable();
        Ok(faces)
    }

    fn cell_base_number(&self, cell: CellId) -> Result<u8> {
        Ok(u8::from(Self::h3_cell(cell)?.base_cell()))
    }

    fn cell_is_pentagon(&self, cell: CellId) -> Result<bool> {
        Ok(Self::h3_cell(cell)?.is_pentagon())
    }

    fn cell_area(&self, cell: CellId, unit: AreaUnit) -> Result<f64> {
        let km2 = Self::h3_cell(cell)?.area_km2();
        Ok(match unit {
            AreaUnit::SquareMeters => km2 * 1_000_000.0,
            AreaUnit::SquareKilometers => km2,
            AreaUnit::SquareMiles => km2 / KM2_PER_MI2,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn res(level: u8) -> Resolution {
        Resolution::try_from(level).unwrap()
    }

    fn sf() -> GeoPoint {
        GeoPoint::new(37.7749, -122.4194)
    }

    #[test]
    fn test_point_to_cell_is_stable() {
        let index = H3CellIndex::new();
        let a = index.point_to_cell(sf(), res(7)).unwrap();
        let b = index.point_to_cell(sf(), res(7)).unwrap();
        assert_eq!(a, b);
        assert_eq!(index.cell_resolution(a).unwrap(), res(7));
    }

    #[test]
    fn test_point_to_cell_rejects_nan() {
        let index = H3CellIndex::new();
        let result = index.point_to_cell(GeoPoint::new(f64::NAN, 10.0), res(7));
        assert!(matches!(result, Err(HexmapError::GeometryLibrary(_))));
    }

    #[test]
    fn test_invalid_handle() {
        let index = H3CellIndex::new();
        let result = index.cell_boundary(CellId::from_raw(0));
        assert!(matches!(result, Err(HexmapError::InvalidCell(0))));
    }

    #[test]
    fn test_cell_string_roundtrip() {
        let index = H3CellIndex::new();
        let cell = index.point_to_cell(sf(), res(9)).unwrap();
        let s = cell.to_string();
        assert_eq!(s.len(), 15);
        assert_eq!(s.parse::<CellId>().unwrap(), cell);

        let json = serde_json::to_string(&cell).unwrap();
        assert_eq!(json, format!("\"{s}\""));
    }

    #[test]
    fn test_hexagon_metadata() {
        let index = H3CellIndex::new();
        let cell = index.point_to_cell(sf(), res(8)).unwrap();
        let meta = index.cell_metadata(cell).unwrap();

        assert!(!meta.is_pentagon);
        assert_eq!(meta.boundary_vertex_count, 6);
        assert_eq!(index.cell_boundary(cell).unwrap().len(), 6);
        assert!(!meta.icosahedron_faces.is_empty() && meta.icosahedron_faces.len() <= 2);
        assert!(meta.icosahedron_faces.iter().all(|&f| f < 20));
        assert!(meta.base_cell < 122);
        // Resolution 8 hexagons are roughly 0.7 km².
        assert!(meta.area_km2 > 0.4 && meta.area_km2 < 1.0, "{}", meta.area_km2);
    }

    #[test]
    fn test_area_units_agree() {
        let index = H3CellIndex::new();
        let cell = index.point_to_cell(sf(), res(5)).unwrap();
        let km2 = index.cell_area(cell, AreaUnit::SquareKilometers).unwrap();
        let m2 = index.cell_area(cell, AreaUnit::SquareMeters).unwrap();
        let mi2 = index.cell_area(cell, AreaUnit::SquareMiles).unwrap();
        assert!((m2 / 1_000_000.0 - km2).abs() < 1e-9);
        assert!((mi2 * KM2_PER_MI2 - km2).abs() < 1e-9);
    }

    #[test]
    fn test_area_unit_parse() {
        assert_eq!("mi2".parse::<AreaUnit>().unwrap(), AreaUnit::SquareMiles);
        assert!("acres".parse::<AreaUnit>().is_err());
    }

    #[test]
    fn test_area_unit_token_matches_parse_and_serde() {
        for unit in [
            AreaUnit::SquareMeters,
            AreaUnit::SquareKilometers,
            AreaUnit::SquareMiles,
        ] {
            assert_eq!(unit.as_str().parse::<AreaUnit>().unwrap(), unit);
            assert_eq!(
                serde_json::to_string(&unit).unwrap(),
                format!("\"{}\"", unit.as_str())
            );
            assert!(unit.as_str().is_ascii());
        }
        assert_eq!(AreaUnit::SquareKilometers.suffix(), "km²");
    }
}
