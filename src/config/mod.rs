// Configuration module
// Public interface for configuration loading

mod loader;
mod settings;

pub use loader::{apply_env_overrides, load_config, load_config_from, EXPORT_DIR_ENV};
pub use settings::{app_dir, Config};
