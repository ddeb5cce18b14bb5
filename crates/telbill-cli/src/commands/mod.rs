//! CLI subcommands.

pub mod batch;
pub mod config;
pub mod last;
pub mod process;

use std::path::{Path, PathBuf};

use tracing::debug;

use telbill_core::TelbillConfig;

/// Default location of the configuration file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("telbill")
        .join("config.json")
}

/// Configuration file in effect: the `--config` path, else the default one.
pub fn resolve_config_path(config_path: Option<&Path>) -> PathBuf {
    config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(default_config_path)
}

/// Load configuration, falling back to defaults when no file exists.
///
/// An explicit `--config` path must exist.
pub fn load_config(config_path: Option<&Path>) -> anyhow::Result<TelbillConfig> {
    if let Some(path) = config_path {
        if !path.exists() {
            anyhow::bail!("Config file not found: {}", path.display());
        }
        debug!("Loading config from {}", path.display());
        return Ok(TelbillConfig::from_file(path)?);
    }

    let path = default_config_path();
    if path.exists() {
        debug!("Loading config from {}", path.display());
        Ok(TelbillConfig::from_file(&path)?)
    } else {
        Ok(TelbillConfig::default())
    }
}
