use crate::cli::CoverFormat;
use crate::error::CliResult;
use crate::output;
use hexmap_core::{
    render, CoverageGenerator, GeoPoint, H3CellIndex, HexmapConfig, ResolutionSet, Viewport,
};
use serde_json::json;

pub fn run(
    sw: GeoPoint,
    ne: GeoPoint,
    resolutions: &[u8],
    step: Option<f64>,
    format: CoverFormat,
    config: &HexmapConfig,
) -> CliResult<()> {
    let viewport = Viewport::new(sw, ne)?;
    let resolutions = if resolutions.is_empty() {
        config.session.resolution_set()?
    } else {
        ResolutionSet::from_levels(resolutions)?
    };
    let mut coverage_config = config.coverage.clone();
    if let Some(step) = step {
        coverage_config = coverage_config.with_sample_step(step);
    }

    let index = H3CellIndex::new();
    let generator = CoverageGenerator::new(coverage_config)?;
    let coverage = generator.generate(&index, &viewport, &resolutions)?;

    let rendered = match format {
        CoverFormat::Json => output::to_json(&json!({
            "resolutions": coverage.resolutions(),
            "cells": coverage.cells(),
            "stats": coverage.stats(),
        }))?,
        CoverFormat::Table => output::coverage_table(&index, &coverage)?,
        CoverFormat::Geojson => {
            output::to_json(&render::coverage_feature_collection(&index, &coverage)?)?
        }
    };
    println!("{rendered}");
    Ok(())
}
