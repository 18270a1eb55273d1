//! Race settings on disk
//!
//! Settings are YAML. A missing or unreadable file never stops the program:
//! the caller gets defaults and a warning in the log.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::ErrorKind;
use std::path::Path;

/// Read settings from `path`, falling back to `T::default()`
pub fn load_config<T>(path: &Path) -> T
where
    T: DeserializeOwned + Default,
{
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::info!("No settings at {}, starting with defaults", path.display());
            return T::default();
        }
        Err(e) => {
            log::warn!("Cannot read settings {}: {}; using defaults", path.display(), e);
            return T::default();
        }
    };

    match serde_yaml::from_str(&contents) {
        Ok(config) => {
            log::info!("Settings loaded from {}", path.display());
            config
        }
        Err(e) => {
            log::warn!("Ignoring malformed settings {}: {}", path.display(), e);
            T::default()
        }
    }
}

/// Write settings to `path`, creating missing parent directories
pub fn save_config<T>(config: &T, path: &Path) -> Result<()>
where
    T: Serialize,
{
    let yaml = serde_yaml::to_string(config).context("Cannot serialize settings")?;

    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Cannot create settings directory {}", dir.display()))?;
    }
    std::fs::write(path, yaml)
        .with_context(|| format!("Cannot write settings {}", path.display()))?;

    log::info!("Settings written to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    struct TestConfig {
        value: i32,
        name: String,
    }

    #[test]
    fn test_load_nonexistent_returns_default() {
        let config: TestConfig = load_config(Path::new("/nonexistent/path/config.yaml"));
        assert_eq!(config, TestConfig::default());
    }

    #[test]
    fn test_invalid_yaml_returns_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.yaml");
        std::fs::write(&path, "value: [not a number").unwrap();

        let config: TestConfig = load_config(&path);
        assert_eq!(config, TestConfig::default());
    }

    #[test]
    fn test_unreadable_path_returns_default() {
        let dir = tempfile::tempdir().unwrap();
        let config: TestConfig = load_config(dir.path());
        assert_eq!(config, TestConfig::default());
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("config.yaml");

        let config = TestConfig {
            value: 42,
            name: "race".to_string(),
        };
        save_config(&config, &path).unwrap();

        let loaded: TestConfig = load_config(&path);
        assert_eq!(loaded, config);
    }
}
