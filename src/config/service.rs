//! Configuration service for managing application config.

use std::path::{Path, PathBuf};
use std::sync::{LazyLock, RwLock};

use crate::error::ConfigError;

use super::types::AppConfig;

/// Global config instance (mutable via RwLock).
///
/// Holds `AppConfig::default()` until `init_config` or `set_config` runs.
static CONFIG: LazyLock<RwLock<AppConfig>> = LazyLock::new(|| RwLock::new(AppConfig::default()));

/// Get the config directory path.
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("appfinder"))
}

/// Read and parse a config file.
pub fn read_config_file(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFailed)?;
    toml::from_str::<AppConfig>(&content).map_err(ConfigError::ParseFailed)
}

/// Load application config from `~/.config/appfinder/config.toml`.
///
/// Returns `None` if the config file doesn't exist.
/// Logs warning and returns `None` if reading or parsing fails.
fn load_app_config() -> Option<AppConfig> {
    let config_path = match config_dir() {
        Some(dir) => dir.join("config.toml"),
        None => {
            tracing::debug!("{}, using defaults", ConfigError::NoDirFound);
            return None;
        }
    };

    if !config_path.exists() {
        tracing::debug!("Config file not found at {:?}, using defaults", config_path);
        return None;
    }

    match read_config_file(&config_path) {
        Ok(config) => {
            tracing::info!("Loaded app config from {:?}", config_path);
            Some(config)
        }
        Err(e) => {
            tracing::warn!("{} ({:?}), using defaults", e, config_path);
            None
        }
    }
}

/// Initialize config from file (call once at startup).
///
/// This function loads the configuration and validates it, logging
/// any warnings for invalid or unusual values.
pub fn init_config() {
    let loaded = load_app_config().unwrap_or_default();
    set_config(loaded);
}

/// Replace the current config after validating it.
pub fn set_config(loaded: AppConfig) {
    let warnings = super::validation::validate_config(&loaded);
    for warning in warnings {
        tracing::warn!("Config validation: {} - {}", warning.field, warning.message);
    }

    match CONFIG.write() {
        Ok(mut config) => *config = loaded,
        Err(poisoned) => *poisoned.into_inner() = loaded,
    }
}

/// Get a clone of the current config.
pub fn config() -> AppConfig {
    match CONFIG.read() {
        Ok(config) => config.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "icon_size = 48\nexcluded_apps = [\"Foo\"]").unwrap();

        let config = read_config_file(&path).unwrap();
        assert_eq!(config.icon_size, 48);
        assert_eq!(config.excluded_apps, vec!["Foo"]);
    }

    #[test]
    fn test_read_config_file_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "icon_size = \"large\"").unwrap();

        assert!(matches!(
            read_config_file(&path),
            Err(ConfigError::ParseFailed(_))
        ));
    }

    #[test]
    fn test_config_before_init_uses_defaults() {
        let config = config();
        assert_eq!(config.excluded_apps, AppConfig::default().excluded_apps);
        assert_eq!(config.icon_size, super::super::types::DEFAULT_ICON_SIZE);
    }

    #[test]
    fn test_read_config_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_config_file(&dir.path().join("absent.toml"));
        assert!(matches!(result, Err(ConfigError::ReadFailed(_))));
    }
}
