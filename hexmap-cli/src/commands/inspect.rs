use crate::cli::InspectFormat;
use crate::error::{CliError, CliResult};
use crate::output;
use hexmap_core::{AreaUnit, CellIndex, GeoPoint, H3CellIndex, HexmapConfig, Resolution};
use serde_json::json;

pub fn run(
    lat: f64,
    lng: f64,
    resolution: Option<u8>,
    unit: AreaUnit,
    format: InspectFormat,
    config: &HexmapConfig,
) -> CliResult<()> {
    let point = GeoPoint::new(lat, lng);
    if !point.is_finite() {
        return Err(CliError::Usage(format!(
            "coordinates must be finite, got ({lat}, {lng})"
        )));
    }
    let res = match resolution {
        Some(level) => Resolution::try_from(level)?,
        None => config.session.resolution_set()?.primary(),
    };

    let index = H3CellIndex::new();
    let cell = index.point_to_cell(point, res)?;
    let meta = index.cell_metadata(cell)?;

    let rendered = match format {
        InspectFormat::Json => output::to_json(&json!({
            "point": point,
            "metadata": meta,
            "area": index.cell_area(cell, unit)?,
            "unit": unit.as_str(),
            "boundary": index
                .cell_boundary(cell)?
                .iter()
                .map(|p| [p.latitude, p.longitude])
                .collect::<Vec<_>>(),
        }))?,
        InspectFormat::Table => output::metadata_table(&index, &meta, unit)?,
    };
    println!("{rendered}");
    Ok(())
}
