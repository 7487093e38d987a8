use clap::Parser;
use hexmap_cli::cli::Cli;
use hexmap_cli::error::exit_with_error;
use tracing_subscriber::EnvFilter;

/// Log filter for a run.
///
/// Command output (JSON, GeoJSON, tables) goes to stdout and is usually piped
/// into another tool, so logs stay off unless `--verbose` asks for them.
/// `RUST_LOG` only refines what `--verbose` enables.
fn log_filter(cli: &Cli) -> EnvFilter {
    if cli.verbose && !cli.quiet {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    } else {
        EnvFilter::new("off")
    }
}

/// `--no-color` or a set `NO_COLOR` turns off color for errors and logs alike.
fn color_enabled(cli: &Cli) -> bool {
    !cli.no_color && std::env::var_os("NO_COLOR").is_none()
}

fn main() {
    let cli = Cli::parse();
    let color = color_enabled(&cli);

    if !color {
        colored::control::set_override(false);
    }

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(&cli))
        .with_ansi(color)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = hexmap_cli::run(cli) {
        exit_with_error(e);
    }
}
