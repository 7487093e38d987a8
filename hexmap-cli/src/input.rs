//! Where `hexmap session` reads its event script from.

use crate::error::{CliError, CliResult};
use colored::Colorize;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};

/// Origin of a JSON-lines event script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventSource {
    /// Events passed with `-e`.
    Inline(String),
    /// A script file.
    File(PathBuf),
    /// Events piped on stdin.
    Stdin,
}

impl EventSource {
    /// Pick the source: `-e` wins over a file, and stdin is used only when
    /// it is piped. An interactive terminal with neither is a usage error.
    pub fn resolve(expr: Option<&str>, file: Option<&Path>) -> CliResult<Self> {
        Self::resolve_with(expr, file, !io::stdin().is_terminal())
    }

    fn resolve_with(expr: Option<&str>, file: Option<&Path>, stdin_piped: bool) -> CliResult<Self> {
        match (expr, file) {
            (Some(events), _) => Ok(EventSource::Inline(events.to_string())),
            (None, Some(path)) => Ok(EventSource::File(path.to_path_buf())),
            (None, None) if stdin_piped => Ok(EventSource::Stdin),
            (None, None) => Err(CliError::Usage(format!(
                "no events provided\n  {} pass a script file, use -e for inline events, or pipe them via stdin",
                "help:".cyan().bold()
            ))),
        }
    }

    /// Name used to prefix script errors.
    pub fn label(&self) -> String {
        match self {
            EventSource::Inline(_) => "inline events".to_string(),
            EventSource::File(path) => path.display().to_string(),
            EventSource::Stdin => "stdin".to_string(),
        }
    }

    /// Read the whole script.
    pub fn read(&self) -> CliResult<String> {
        match self {
            EventSource::Inline(events) => Ok(events.clone()),
            EventSource::File(path) => std::fs::read_to_string(path)
                .map_err(|e| CliError::Input(format!("failed to read {}: {e}", path.display()))),
            EventSource::Stdin => {
                let mut script = String::new();
                io::stdin().read_to_string(&mut script)?;
                Ok(script)
            }
        }
    }
}
