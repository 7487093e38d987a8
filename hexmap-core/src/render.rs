//! GeoJSON output for the map layers.
//!
//! The fill layer draws every coverage cell, the outline layer every
//! selected cell. Both consume a `FeatureCollection` of `Polygon` features
//! whose rings are `[lng, lat]` positions, closed.

use crate::cell_index::{CellId, CellIndex};
use crate::covering::CoverageSet;
use crate::error::Result;
use crate::geometry::ring_to_polygon;
use crate::selection::SelectionEntry;
use geo_types::Polygon;
use serde_json::{json, Value};

/// Boundary of `cell` as a closed polygon (x = lng, y = lat).
pub fn cell_polygon(index: &dyn CellIndex, cell: CellId) -> Result<Polygon<f64>> {
    Ok(ring_to_polygon(&index.cell_boundary(cell)?))
}

/// Fill features, one per coverage cell.
pub fn coverage_feature_collection(index: &dyn CellIndex, coverage: &CoverageSet) -> Result<Value> {
    let features = coverage
        .iter()
        .map(|cell| {
            let properties = json!({
                "cell": cell.to_string(),
                "resolution": index.cell_resolution(cell)?,
            });
            polygon_feature(index, cell, properties)
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(feature_collection(features))
}

/// Outline features, one per selected cell, carrying the cell's details.
pub fn selection_feature_collection(
    index: &dyn CellIndex,
    entries: &[SelectionEntry],
) -> Result<Value> {
    let features = entries
        .iter()
        .map(|entry| {
            let meta = &entry.metadata;
            let properties = json!({
                "cell": entry.cell.to_string(),
                "resolution": meta.resolution,
                "clicked": [entry.point.longitude, entry.point.latitude],
                "base_cell": meta.base_cell,
                "is_pentagon": meta.is_pentagon,
                "icosahedron_faces": meta.icosahedron_faces,
                "boundary_vertex_count": meta.boundary_vertex_count,
                "area_km2": meta.area_km2,
            });
            polygon_feature(index, entry.cell, properties)
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(feature_collection(features))
}

fn polygon_feature(index: &dyn CellIndex, cell: CellId, properties: Value) -> Result<Value> {
    let polygon = cell_polygon(index, cell)?;
    let ring: Vec<[f64; 2]> = polygon.exterior().coords().map(|c| [c.x, c.y]).collect();
    Ok(json!({
        "type": "Feature",
        "geometry": {
            "type": "Polygon",
            "coordinates": [ring],
        },
        "properties": properties,
    }))
}

fn feature_collection(features: Vec<Value>) -> Value {
    json!({
        "type": "FeatureCollection",
        "features": features,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell_index::H3CellIndex;
    use crate::covering::CoverageGenerator;
    use crate::geometry::{GeoPoint, Viewport};
    use crate::resolution::{Resolution, ResolutionSet};
    use crate::selection::SelectionStore;

    #[test]
    fn test_coverage_features_are_closed_rings() {
        let index = H3CellIndex::new();
        let vp = Viewport::from_corners((37.70, -122.45), (37.80, -122.40)).unwrap();
        let coverage = CoverageGenerator::default()
            .generate(&index, &vp, &ResolutionSet::from_levels(&[8]).unwrap())
            .unwrap();

        let fc = coverage_feature_collection(&index, &coverage).unwrap();
        assert_eq!(fc["type"], "FeatureCollection");

        let features = fc["features"].as_array().unwrap();
        assert_eq!(features.len(), coverage.len());
        for feature in features {
            let ring = feature["geometry"]["coordinates"][0].as_array().unwrap();
            // Six vertices plus the closing point (even resolutions have no
            // edge-crossing distortion vertices).
            assert_eq!(ring.len(), 7);
            assert_eq!(ring.first(), ring.last());
            // [lng, lat]
            let lng = ring[0][0].as_f64().unwrap();
            assert!(lng < -122.0 && lng > -123.0);
            assert_eq!(feature["properties"]["resolution"], 8);
        }
    }

    #[test]
    fn test_selection_features_carry_details() {
        let index = H3CellIndex::new();
        let mut store = SelectionStore::default();
        let entry = store
            .toggle(
                &index,
                GeoPoint::new(37.7749, -122.4194),
                Resolution::try_from(8).unwrap(),
            )
            .unwrap()
            .unwrap();

        let fc = selection_feature_collection(&index, &store.selection()).unwrap();
        let props = &fc["features"][0]["properties"];
        assert_eq!(props["cell"], entry.cell.to_string());
        assert_eq!(props["is_pentagon"], false);
        assert_eq!(props["boundary_vertex_count"], 6);
        assert_eq!(props["clicked"][1], 37.7749);
    }
}
