//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the engine
//! configuration from a YAML file.

use std::fs;
use std::path::Path;

use rust_decimal::Decimal;
use tracing::debug;

use crate::error::{EngineError, EngineResult};

use super::types::AppConfig;

/// Loads the engine configuration.
///
/// # File Format
///
/// ```text
/// storage:
///   data_dir: ./data
/// payroll:
///   standard_monthly_hours: 176
/// login:
///   enabled: true
///   username: Admin
///   password: admin123
/// ```
///
/// # Example
///
/// ```no_run
/// use attendance_engine::config::ConfigLoader;
///
/// let config = ConfigLoader::load("./config/attendance.yaml")?;
/// println!("Data lives in {}", config.storage.data_dir.display());
/// # Ok::<(), attendance_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads configuration from the specified file.
    ///
    /// # Returns
    ///
    /// Returns the configuration on success, or an error if:
    /// - The file is missing (`ConfigNotFound`)
    /// - The file contains invalid YAML or an invalid value (`ConfigParseError`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<AppConfig> {
        let path = path.as_ref();
        let config = Self::load_yaml::<AppConfig>(path)?;
        Self::validate(path, &config)?;

        debug!(
            path = %path.display(),
            data_dir = %config.storage.data_dir.display(),
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    fn validate(path: &Path, config: &AppConfig) -> EngineResult<()> {
        if config.payroll.standard_monthly_hours <= Decimal::ZERO {
            return Err(EngineError::ConfigParseError {
                path: path.display().to_string(),
                message: "payroll.standard_monthly_hours must be positive".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn config_path() -> &'static str {
        "./config/attendance.yaml"
    }

    fn write_config(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("attendance.yaml");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_bundled_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let config = result.unwrap();
        assert_eq!(config.storage.data_dir, PathBuf::from("data"));
        assert_eq!(config.payroll.standard_monthly_hours, Decimal::from(176));
        assert_eq!(config.login.username, "Admin");
    }

    #[test]
    fn test_load_missing_file_returns_error() {
        let result = ConfigLoader::load("/nonexistent/attendance.yaml");

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("attendance.yaml"));
            }
            _ => panic!("Expected ConfigNotFound error"),
        }
    }

    #[test]
    fn test_load_invalid_yaml_returns_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "storage: [unterminated");

        match ConfigLoader::load(&path) {
            Err(EngineError::ConfigParseError { path: p, .. }) => {
                assert!(p.ends_with("attendance.yaml"));
            }
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }
    }

    #[test]
    fn test_load_empty_mapping_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "{}\n");

        let config = ConfigLoader::load(&path).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_rejects_zero_monthly_hours() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "payroll:\n  standard_monthly_hours: 0\n");

        assert!(matches!(
            ConfigLoader::load(&path),
            Err(EngineError::ConfigParseError { .. })
        ));
    }

    #[test]
    fn test_login_can_be_disabled() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "login:\n  enabled: false\n");

        let config = ConfigLoader::load(&path).unwrap();
        assert!(!config.login.enabled);
        assert_eq!(config.login.password, "admin123");
    }
}
