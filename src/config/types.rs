//! Configuration types for the attendance engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the YAML configuration file. Every field has a
//! default, so a partial file (or no file at all) is valid.

use std::path::PathBuf;

use rust_decimal::Decimal;
use serde::Deserialize;

/// Standard working hours in a month, used to derive an hourly rate.
pub const DEFAULT_MONTHLY_HOURS: Decimal = Decimal::from_parts(176, 0, 0, false, 0);

const SALARY_DIR: &str = "salary";

/// Where records are stored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Root directory holding the roster and attendance snapshots.
    pub data_dir: PathBuf,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
        }
    }
}

/// Payroll constants.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PayrollSettings {
    /// Hours in a standard month. The hourly rate is base salary over this.
    pub standard_monthly_hours: Decimal,
}

impl Default for PayrollSettings {
    fn default() -> Self {
        Self {
            standard_monthly_hours: DEFAULT_MONTHLY_HOURS,
        }
    }
}

/// Credentials for the placeholder login gate.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoginSettings {
    /// When false, every caller is let through.
    pub enabled: bool,
    /// Expected user name.
    pub username: String,
    /// Expected password.
    pub password: String,
}

impl Default for LoginSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            username: "Admin".to_string(),
            password: "admin123".to_string(),
        }
    }
}

/// The complete engine configuration.
///
/// # Example
///
/// ```
/// use attendance_engine::config::AppConfig;
/// use rust_decimal::Decimal;
///
/// let config = AppConfig::default();
/// assert_eq!(config.storage.data_dir.to_str(), Some("data"));
/// assert_eq!(config.payroll.standard_monthly_hours, Decimal::from(176));
/// assert!(config.login.enabled);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Storage settings.
    pub storage: StorageSettings,
    /// Payroll settings.
    pub payroll: PayrollSettings,
    /// Login gate settings.
    pub login: LoginSettings,
}

impl AppConfig {
    /// Creates a default configuration rooted at `data_dir`.
    pub fn with_data_dir<P: Into<PathBuf>>(data_dir: P) -> Self {
        Self {
            storage: StorageSettings {
                data_dir: data_dir.into(),
            },
            ..Self::default()
        }
    }

    /// Directory that default salary exports are written to.
    pub fn salary_dir(&self) -> PathBuf {
        self.storage.data_dir.join(SALARY_DIR)
    }
}
