// Configuration structs

use serde::Deserialize;
use std::path::PathBuf;

/// Directory holding the config file and REPL history: ~/.clinic-router
pub fn app_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".clinic-router")
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where session exports are written
    pub export_dir: PathBuf,

    /// REPL input history file
    pub history_path: PathBuf,

    /// Default log level to debug when RUST_LOG is not set
    pub debug_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            export_dir: PathBuf::from("."),
            history_path: app_dir().join("history.txt"),
            debug_logging: false,
        }
    }
}
