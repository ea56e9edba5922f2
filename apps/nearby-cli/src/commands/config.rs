//! # Config Command
//!
//! Writes a starter `nearby.toml` and prints the configuration in effect.

use std::io::Write;
use std::path::PathBuf;

use tracing::info;

use crate::config::{AppConfig, ConfigError};
use crate::error::CliResult;

/// Writes the default configuration to `path` (or the platform default).
///
/// Refuses to replace an existing file unless `force` is set.
pub fn init(path: Option<PathBuf>, force: bool, out: &mut dyn Write) -> CliResult<()> {
    let path = AppConfig::resolve_path(path)?;

    if path.exists() && !force {
        return Err(ConfigError::AlreadyExists(path).into());
    }

    let written = AppConfig::default().save(Some(path))?;
    info!(path = %written.display(), "Wrote default config");
    writeln!(out, "Wrote {}", written.display())?;
    Ok(())
}

/// Prints `config` as TOML.
pub fn show(config: &AppConfig, out: &mut dyn Write) -> CliResult<()> {
    let rendered = toml::to_string_pretty(config).map_err(ConfigError::from)?;
    write!(out, "{}", rendered)?;
    Ok(())
}
