use crate::cli::SessionFormat;
use crate::error::{CliError, CliResult};
use crate::input::EventSource;
use crate::output;
use hexmap_core::{render, H3CellIndex, HexmapConfig, MapEvent, ViewportController};
use serde_json::json;
use std::path::Path;

/// Parse a JSON-lines event script.
///
/// Blank lines and lines starting with `#` are skipped. Errors carry the
/// 1-based line number.
pub fn parse_events(script: &str) -> CliResult<Vec<(usize, MapEvent)>> {
    script
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .map(|(lineno, line)| {
            serde_json::from_str::<MapEvent>(line)
                .map(|event| (lineno, event))
                .map_err(|e| CliError::Input(format!("line {lineno}: invalid event: {e}")))
        })
        .collect()
}

/// Replay `events` against a fresh controller.
pub fn replay(
    events: Vec<(usize, MapEvent)>,
    config: HexmapConfig,
) -> CliResult<ViewportController<H3CellIndex>> {
    let mut controller = ViewportController::new(H3CellIndex::new(), config)?;
    for (lineno, event) in events {
        tracing::debug!(line = lineno, ?event, "Replaying event");
        controller
            .handle(event)
            .map_err(|e| CliError::Input(format!("line {lineno}: {e}")))?;
    }
    Ok(controller)
}

pub fn run(
    file: Option<&Path>,
    expr: Option<&str>,
    format: SessionFormat,
    config: HexmapConfig,
) -> CliResult<()> {
    let source = EventSource::resolve(expr, file)?;
    let script = source.read()?;
    let controller = parse_events(&script)
        .and_then(|events| replay(events, config))
        .map_err(|e| match e {
            CliError::Input(msg) => CliError::Input(format!("{}: {msg}", source.label())),
            other => other,
        })?;

    let rendered = match format {
        SessionFormat::Json => output::to_json(&controller.snapshot())?,
        SessionFormat::Table => output::snapshot_table(&controller.snapshot()),
        SessionFormat::Geojson => {
            let index = controller.index();
            output::to_json(&json!({
                "coverage": render::coverage_feature_collection(index, controller.coverage())?,
                "selection": render::selection_feature_collection(index, &controller.selection())?,
                "selection_extent": controller.selection_store().extent(index)?,
                "map_style": controller.map_style().url(),
            }))?
        }
    };
    println!("{rendered}");
    Ok(())
}
