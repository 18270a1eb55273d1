//! Path utilities for pirace configuration files

use std::path::PathBuf;

/// Get the default config file path
///
/// Returns: `~/.config/pirace/config.yaml` (platform config dir)
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
        .join("pirace")
        .join("config.yaml")
}
