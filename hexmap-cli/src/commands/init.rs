use crate::config;
use crate::error::CliResult;

/// Default config.toml template with every setting at its default.
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# Hexmap Configuration
#
# Read by every `hexmap` command run in this directory or below it.
# Command-line flags take precedence over values here.

# ──────────────────────────────────────────────────────────────────────
# Coverage
# ──────────────────────────────────────────────────────────────────────

[coverage]
# Distance between viewport samples on both axes, in degrees.
# Cells smaller than this can be skipped between samples.
sample_step_deg = 0.1

# ──────────────────────────────────────────────────────────────────────
# Selection
# ──────────────────────────────────────────────────────────────────────

[selection]
# Ignore clicks whose latitude or longitude is exactly 0.0.
reject_zero_coordinates = true

# ──────────────────────────────────────────────────────────────────────
# Session
# ──────────────────────────────────────────────────────────────────────

[session]
# Resolutions (0-15) active at start; the first one is used for clicks.
default_resolutions = [7]
map_style = "streets"                # streets, satellite_streets

[session.initial_view]
latitude = 37.7749
longitude = -122.4194
zoom = 10.0
"#;

pub fn run(force: bool) -> CliResult<()> {
    let cwd = std::env::current_dir()?;
    let hexmap_dir = config::init_hexmap_dir(&cwd, DEFAULT_CONFIG_TEMPLATE, force)?;
    println!("Initialized hexmap config in {}", hexmap_dir.display());
    Ok(())
}
