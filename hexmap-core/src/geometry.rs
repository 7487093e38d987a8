//! Geographic primitives: points and viewports.
//!
//! Coordinates are WGS84 degrees. Conversions to `geo-types` use the usual
//! `x = longitude, y = latitude` convention.

use crate::error::{HexmapError, Result};
use geo::BoundingRect;
use geo_types::{Coord, LineString, MultiPolygon, Point, Polygon};
use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    /// Create a point. No validation; see [`GeoPoint::is_finite`].
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Both coordinates are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }

    /// Either coordinate is exactly zero.
    pub fn has_zero_coordinate(&self) -> bool {
        self.latitude == 0.0 || self.longitude == 0.0
    }
}

impl From<GeoPoint> for Coord<f64> {
    fn from(p: GeoPoint) -> Self {
        Coord {
            x: p.longitude,
            y: p.latitude,
        }
    }
}

impl From<GeoPoint> for Point<f64> {
    fn from(p: GeoPoint) -> Self {
        Point::new(p.longitude, p.latitude)
    }
}

impl From<Coord<f64>> for GeoPoint {
    fn from(c: Coord<f64>) -> Self {
        GeoPoint::new(c.y, c.x)
    }
}

/// Visible map extent.
///
/// Invariant: `southwest.latitude <= northeast.latitude`. Antimeridian
/// wraparound is not handled; a viewport whose north-east longitude is west
/// of its south-west longitude simply contains no samples.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    southwest: GeoPoint,
    northeast: GeoPoint,
}

impl Viewport {
    /// Create a viewport from its corners.
    pub fn new(southwest: GeoPoint, northeast: GeoPoint) -> Result<Self> {
        if !southwest.is_finite() || !northeast.is_finite() {
            return Err(HexmapError::InvalidViewport(
                "corner coordinates must be finite".into(),
            ));
        }
        if southwest.latitude > northeast.latitude {
            return Err(HexmapError::InvalidViewport(format!(
                "south-west latitude {} is north of north-east latitude {}",
                southwest.latitude, northeast.latitude
            )));
        }
        Ok(Self {
            southwest,
            northeast,
        })
    }

    /// Create a viewport from `(lat, lng)` corner pairs.
    pub fn from_corners(sw: (f64, f64), ne: (f64, f64)) -> Result<Self> {
        Self::new(GeoPoint::new(sw.0, sw.1), GeoPoint::new(ne.0, ne.1))
    }

    pub fn southwest(&self) -> GeoPoint {
        self.southwest
    }

    pub fn northeast(&self) -> GeoPoint {
        self.northeast
    }

    /// Both corners coincide.
    pub fn is_degenerate(&self) -> bool {
        self.southwest == self.northeast
    }

    /// Check if the viewport contains a point (edges inclusive).
    pub fn contains(&self, p: GeoPoint) -> bool {
        p.latitude >= self.southwest.latitude
            && p.latitude <= self.northeast.latitude
            && p.longitude >= self.southwest.longitude
            && p.longitude <= self.northeast.longitude
    }

    /// Regular grid of sample points, row by row from the south-west corner.
    ///
    /// Sample `i` along an axis sits at `corner + i * step` (clamped to the
    /// far edge), so long walks do not accumulate rounding error.
    pub fn sample_grid(&self, step_deg: f64) -> impl Iterator<Item = GeoPoint> {
        let rows = axis_steps(self.southwest.latitude, self.northeast.latitude, step_deg);
        let cols = axis_steps(self.southwest.longitude, self.northeast.longitude, step_deg);
        let (sw, ne) = (self.southwest, self.northeast);
        (0..rows).flat_map(move |i| {
            let lat = (sw.latitude + i as f64 * step_deg).min(ne.latitude);
            (0..cols).map(move |j| {
                let lng = (sw.longitude + j as f64 * step_deg).min(ne.longitude);
                GeoPoint::new(lat, lng)
            })
        })
    }

    /// Number of points [`Viewport::sample_grid`] yields.
    pub fn sample_count(&self, step_deg: f64) -> usize {
        let rows = axis_steps(self.southwest.latitude, self.northeast.latitude, step_deg);
        let cols = axis_steps(self.southwest.longitude, self.northeast.longitude, step_deg);
        rows.saturating_mul(cols)
    }

    /// Smallest viewport enclosing every polygon, or `None` for no polygons.
    pub fn enclosing(polygons: Vec<Polygon<f64>>) -> Option<Self> {
        let rect = MultiPolygon::new(polygons).bounding_rect()?;
        Some(Self {
            southwest: rect.min().into(),
            northeast: rect.max().into(),
        })
    }
}

/// Count of grid positions `from + i * step <= to`.
fn axis_steps(from: f64, to: f64, step: f64) -> usize {
    if to < from {
        return 0;
    }
    // Tolerate the last sample landing a hair past `to` from rounding.
    let span = (to - from) / step;
    (span + 1e-9).floor() as usize + 1
}

/// Open ring of points to a closed `geo-types` polygon.
pub fn ring_to_polygon(ring: &[GeoPoint]) -> Polygon<f64> {
    let exterior: LineString<f64> = ring.iter().map(|&p| Coord::from(p)).collect();
    // Polygon::new closes the ring.
    Polygon::new(exterior, Vec::new())
}
