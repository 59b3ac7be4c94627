// Configuration loader
// Loads settings from ~/.clinic-router/config.toml, then applies environment overrides

use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use super::settings::{app_dir, Config};
use crate::errors::config_parse_error;

/// Overrides the export directory from the config file
pub const EXPORT_DIR_ENV: &str = "CLINIC_ROUTER_EXPORT_DIR";

/// Load configuration from the default location and the environment
pub fn load_config() -> Result<Config> {
    let config = load_config_from(&app_dir().join("config.toml"))?;
    Ok(apply_env_overrides(config, |key| std::env::var(key).ok()))
}

/// Load configuration from a specific file
///
/// A missing file yields the defaults; a malformed file is an error.
pub fn load_config_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "No config file, using defaults");
        return Ok(Config::default());
    }

    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let config: Config = toml::from_str(&contents)
        .map_err(|e| anyhow!(config_parse_error(&path.display().to_string(), &e.to_string())))?;

    Ok(config)
}

/// Apply environment overrides using `lookup` to read variables
pub fn apply_env_overrides<F>(mut config: Config, lookup: F) -> Config
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(dir) = lookup(EXPORT_DIR_ENV).filter(|v| !v.trim().is_empty()) {
        config.export_dir = PathBuf::from(dir);
    }
    config
}
