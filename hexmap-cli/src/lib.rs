//! Hexmap CLI library.
//!
//! Types and command handlers behind the `hexmap` binary. The binary parses
//! arguments, sets up tracing and calls [`run`].

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod input;
pub mod output;

use cli::{Cli, Commands};

/// Dispatch a parsed [`Cli`] to the appropriate command handler.
pub fn run(cli: Cli) -> error::CliResult<()> {
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Init { force } => commands::init::run(force),

        Commands::Cover {
            sw,
            ne,
            resolutions,
            step,
            format,
        } => {
            let config = config::load_config(config_path)?;
            commands::cover::run(sw, ne, &resolutions, step, format, &config)
        }

        Commands::Inspect {
            lat,
            lng,
            resolution,
            unit,
            format,
        } => {
            let config = config::load_config(config_path)?;
            commands::inspect::run(lat, lng, resolution, unit.into(), format, &config)
        }

        Commands::Session { file, expr, format } => {
            let config = config::load_config(config_path)?;
            commands::session::run(file.as_deref(), expr.as_deref(), format, config)
        }
    }
}
