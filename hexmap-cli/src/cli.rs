use clap::{Parser, Subcommand, ValueEnum};
use hexmap_core::{AreaUnit, GeoPoint};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "hexmap", about = "Hexagonal map coverage and selection CLI", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output (also respects NO_COLOR env var)
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Path to config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a default .hexmap/config.toml in the current directory
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Compute the cells covering a viewport
    Cover {
        /// South-west corner as LAT,LNG
        #[arg(long, value_parser = parse_lat_lng, allow_hyphen_values = true)]
        sw: GeoPoint,

        /// North-east corner as LAT,LNG
        #[arg(long, value_parser = parse_lat_lng, allow_hyphen_values = true)]
        ne: GeoPoint,

        /// Resolution (repeatable); defaults to the configured session resolutions
        #[arg(short = 'r', long = "resolution", value_parser = clap::value_parser!(u8).range(0..=15))]
        resolutions: Vec<u8>,

        /// Sampling step in degrees (overrides config)
        #[arg(long)]
        step: Option<f64>,

        /// Output format
        #[arg(long, value_enum, default_value = "json")]
        format: CoverFormat,
    },

    /// Show the cell under a point and its derived attributes
    #[command(allow_negative_numbers = true)]
    Inspect {
        /// Latitude in degrees
        lat: f64,

        /// Longitude in degrees
        lng: f64,

        /// Resolution; defaults to the first configured session resolution
        #[arg(short = 'r', long = "resolution", value_parser = clap::value_parser!(u8).range(0..=15))]
        resolution: Option<u8>,

        /// Unit for the reported area
        #[arg(long, value_enum, default_value = "km2")]
        unit: UnitArg,

        /// Output format
        #[arg(long, value_enum, default_value = "table")]
        format: InspectFormat,
    },

    /// Replay a JSON-lines map event script and print the resulting state
    Session {
        /// Event script (reads stdin when omitted)
        file: Option<PathBuf>,

        /// Inline event script
        #[arg(short = 'e', long = "expr")]
        expr: Option<String>,

        /// Output format
        #[arg(long, value_enum, default_value = "json")]
        format: SessionFormat,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CoverFormat {
    Json,
    Table,
    Geojson,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InspectFormat {
    Json,
    Table,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SessionFormat {
    Json,
    Table,
    Geojson,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum UnitArg {
    #[value(name = "m2")]
    M2,
    #[value(name = "km2")]
    Km2,
    #[value(name = "mi2")]
    Mi2,
}

impl From<UnitArg> for AreaUnit {
    fn from(unit: UnitArg) -> Self {
        match unit {
            UnitArg::M2 => AreaUnit::SquareMeters,
            UnitArg::Km2 => AreaUnit::SquareKilometers,
            UnitArg::Mi2 => AreaUnit::SquareMiles,
        }
    }
}

/// Parse `LAT,LNG` into a point.
fn parse_lat_lng(s: &str) -> Result<GeoPoint, String> {
    let (lat, lng) = s
        .split_once(',')
        .ok_or_else(|| format!("expected LAT,LNG, got {s:?}"))?;
    let lat: f64 = lat
        .trim()
        .parse()
        .map_err(|e| format!("bad latitude {lat:?}: {e}"))?;
    let lng: f64 = lng
        .trim()
        .parse()
        .map_err(|e| format!("bad longitude {lng:?}: {e}"))?;
    Ok(GeoPoint::new(lat, lng))
}
