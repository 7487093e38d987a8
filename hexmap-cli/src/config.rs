use crate::error::{CliError, CliResult};
use colored::Colorize;
use hexmap_core::HexmapConfig;
use std::fs;
use std::path::{Path, PathBuf};

const HEXMAP_DIR: &str = ".hexmap";
const CONFIG_FILE: &str = "config.toml";

/// Walk up from `start` looking for a `.hexmap/` directory.
fn find_hexmap_dir_from(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        let candidate = current.join(HEXMAP_DIR);
        if candidate.is_dir() {
            return Some(candidate);
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Find `.hexmap/` by walking up from cwd. Returns `None` if not found.
pub fn find_hexmap_dir() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    find_hexmap_dir_from(&cwd)
}

/// Resolve a `--config` override to a config file path.
///
/// Accepts either the file itself or the directory holding `config.toml`.
fn resolve_config_override(p: &Path) -> CliResult<PathBuf> {
    let resolved = if p.is_absolute() {
        p.to_path_buf()
    } else {
        std::env::current_dir()?.join(p)
    };

    if resolved.is_file() {
        return Ok(resolved);
    }
    if resolved.is_dir() {
        let file = resolved.join(CONFIG_FILE);
        if file.is_file() {
            return Ok(file);
        }
        return Err(CliError::Config(format!(
            "no {CONFIG_FILE} in {}",
            resolved.display()
        )));
    }

    Err(CliError::Config(format!(
        "config path does not exist: {}",
        p.display()
    )))
}

/// Locate the config file to use, if any.
///
/// An explicit `--config` must exist. Otherwise `.hexmap/config.toml` is
/// looked up from cwd; running without one is fine.
pub fn config_file(config_override: Option<&Path>) -> CliResult<Option<PathBuf>> {
    if let Some(p) = config_override {
        return resolve_config_override(p).map(Some);
    }
    Ok(find_hexmap_dir()
        .map(|dir| dir.join(CONFIG_FILE))
        .filter(|file| file.is_file()))
}

/// Parse a config file body. Missing sections and keys take their defaults.
pub fn parse_config(text: &str) -> CliResult<HexmapConfig> {
    let config: HexmapConfig =
        toml::from_str(text).map_err(|e| CliError::Config(format!("invalid config: {e}")))?;
    config.coverage.validate()?;
    config.session.resolution_set()?;
    Ok(config)
}

/// Load the effective engine config.
pub fn load_config(config_override: Option<&Path>) -> CliResult<HexmapConfig> {
    let Some(path) = config_file(config_override)? else {
        tracing::debug!("No config file found, using defaults");
        return Ok(HexmapConfig::default());
    };

    let text = fs::read_to_string(&path)
        .map_err(|e| CliError::Config(format!("failed to read {}: {e}", path.display())))?;
    let config = parse_config(&text).map_err(|e| match e {
        CliError::Config(msg) => CliError::Config(format!("{}: {msg}", path.display())),
        other => other,
    })?;
    tracing::debug!(path = %path.display(), "Loaded config");
    Ok(config)
}

/// Create `.hexmap/config.toml` under `base` from `template`.
///
/// Refuses to replace an existing file unless `force` is set.
pub fn init_hexmap_dir(base: &Path, template: &str, force: bool) -> CliResult<PathBuf> {
    let hexmap_dir = base.join(HEXMAP_DIR);
    fs::create_dir_all(&hexmap_dir).map_err(|e| {
        CliError::Config(format!("failed to create {}: {e}", hexmap_dir.display()))
    })?;

    let config_path = hexmap_dir.join(CONFIG_FILE);
    if config_path.exists() && !force {
        return Err(CliError::Usage(format!(
            "{} already exists\n  {} pass --force to overwrite it",
            config_path.display(),
            "help:".cyan().bold()
        )));
    }
    fs::write(&config_path, template).map_err(|e| {
        CliError::Config(format!("failed to write {}: {e}", config_path.display()))
    })?;

    Ok(hexmap_dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexmap_core::MapStyle;
    use tempfile::TempDir;

    #[test]
    fn test_find_dir_walks_up() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join(".hexmap")).unwrap();
        let nested = tmp.path().join("a/b/c");
        fs::create_dir_all(&nested).unwrap();

        let found = find_hexmap_dir_from(&nested).unwrap();
        assert_eq!(found, tmp.path().join(".hexmap"));
    }

    #[test]
    fn test_parse_partial_config() {
        let config = parse_config(
            r#"
            [coverage]
            sample_step_deg = 0.05

            [session]
            default_resolutions = [6, 8]
            map_style = "satellite_streets"
            "#,
        )
        .unwrap();

        assert_eq!(config.coverage.sample_step_deg, 0.05);
        assert_eq!(config.session.default_resolutions, vec![6, 8]);
        assert_eq!(config.session.map_style, MapStyle::SatelliteStreets);
        assert!(config.selection.reject_zero_coordinates);
    }

    #[test]
    fn test_parse_rejects_bad_values() {
        assert!(parse_config("[coverage]\nsample_step_deg = 0.0\n").is_err());
        assert!(parse_config("[session]\ndefault_resolutions = []\n").is_err());
        assert!(parse_config("[session]\ndefault_resolutions = [16]\n").is_err());
        assert!(parse_config("coverage = 3").is_err());
    }

    #[test]
    fn test_init_refuses_without_force() {
        let tmp = TempDir::new().unwrap();
        init_hexmap_dir(tmp.path(), "# one\n", false).unwrap();
        assert!(init_hexmap_dir(tmp.path(), "# two\n", false).is_err());

        init_hexmap_dir(tmp.path(), "# two\n", true).unwrap();
        let text = fs::read_to_string(tmp.path().join(".hexmap/config.toml")).unwrap();
        assert_eq!(text, "# two\n");
    }
}
