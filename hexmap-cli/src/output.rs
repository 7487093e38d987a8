use crate::error::CliResult;
use comfy_table::{ContentArrangement, Table};
use hexmap_core::{AreaUnit, CellIndex, CellMetadata, ControllerSnapshot, CoverageSet, SelectionEntry};

/// Pretty JSON for any serializable value.
pub fn to_json<T: serde::Serialize>(value: &T) -> CliResult<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

fn new_table() -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// One row per coverage cell.
pub fn coverage_table(index: &dyn CellIndex, coverage: &CoverageSet) -> CliResult<String> {
    let mut table = new_table();
    table.set_header(vec!["cell", "resolution"]);
    for cell in coverage.iter() {
        table.add_row(vec![
            cell.to_string(),
            index.cell_resolution(cell)?.to_string(),
        ]);
    }
    let stats = coverage.stats();
    Ok(format!(
        "{table}\n{} cells ({} samples, {} duplicates dropped)",
        stats.cells, stats.samples, stats.duplicates_dropped
    ))
}

/// Attribute/value table for a single cell.
pub fn metadata_table(
    index: &dyn CellIndex,
    meta: &CellMetadata,
    unit: AreaUnit,
) -> CliResult<String> {
    let area = index.cell_area(meta.cell, unit)?;
    let faces = meta
        .icosahedron_faces
        .iter()
        .map(u8::to_string)
        .collect::<Vec<_>>()
        .join(", ");

    let mut table = new_table();
    table.set_header(vec!["attribute", "value"]);
    table.add_row(vec!["cell".to_string(), meta.cell.to_string()]);
    table.add_row(vec!["resolution".to_string(), meta.resolution.to_string()]);
    table.add_row(vec!["base cell".to_string(), meta.base_cell.to_string()]);
    table.add_row(vec!["pentagon".to_string(), meta.is_pentagon.to_string()]);
    table.add_row(vec!["icosahedron faces".to_string(), faces]);
    table.add_row(vec![
        "boundary vertices".to_string(),
        meta.boundary_vertex_count.to_string(),
    ]);
    table.add_row(vec![
        "area".to_string(),
        format!("{area:.6} {}", unit.suffix()),
    ]);
    Ok(table.to_string())
}

/// Detail panel: one row per selected cell, in selection order.
pub fn selection_table(entries: &[SelectionEntry]) -> String {
    let mut table = new_table();
    table.set_header(vec![
        "cell",
        "resolution",
        "clicked (lat, lng)",
        "base cell",
        "pentagon",
        "faces",
        "area km2",
    ]);
    for entry in entries {
        let meta = &entry.metadata;
        let faces = meta
            .icosahedron_faces
            .iter()
            .map(u8::to_string)
            .collect::<Vec<_>>()
            .join(",");
        table.add_row(vec![
            entry.cell.to_string(),
            meta.resolution.to_string(),
            format!("{:.6}, {:.6}", entry.point.latitude, entry.point.longitude),
            meta.base_cell.to_string(),
            meta.is_pentagon.to_string(),
            faces,
            format!("{:.6}", meta.area_km2),
        ]);
    }
    table.to_string()
}

/// Session summary followed by the detail panel.
pub fn snapshot_table(snapshot: &ControllerSnapshot) -> String {
    let resolutions = snapshot
        .resolutions
        .iter()
        .map(|r| r.to_string())
        .collect::<Vec<_>>()
        .join(", ");

    let mut summary = new_table();
    summary.set_header(vec!["state", "value"]);
    summary.add_row(vec![
        "viewport".to_string(),
        match &snapshot.viewport {
            Some(vp) => format!(
                "({:.4}, {:.4}) - ({:.4}, {:.4})",
                vp.southwest().latitude,
                vp.southwest().longitude,
                vp.northeast().latitude,
                vp.northeast().longitude
            ),
            None => "-".to_string(),
        },
    ]);
    summary.add_row(vec!["resolutions".to_string(), resolutions]);
    summary.add_row(vec![
        "coverage cells".to_string(),
        snapshot.coverage.len().to_string(),
    ]);
    summary.add_row(vec![
        "selected cells".to_string(),
        snapshot.selection.len().to_string(),
    ]);
    summary.add_row(vec![
        "last clicked".to_string(),
        snapshot
            .last_clicked
            .as_ref()
            .map(|e| e.cell.to_string())
            .unwrap_or_else(|| "-".to_string()),
    ]);
    summary.add_row(vec![
        "map style".to_string(),
        snapshot.map_style.url().to_string(),
    ]);

    format!("{summary}\n{}", selection_table(&snapshot.selection))
}
