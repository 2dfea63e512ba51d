//! Configuration loading and management for the attendance engine.
//!
//! This module loads the engine configuration from a YAML file: where data
//! is stored, the payroll constants, and the login gate credentials.
//!
//! # Example
//!
//! ```no_run
//! use attendance_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/attendance.yaml").unwrap();
//! println!("Salary exports go to {}", config.salary_dir().display());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{AppConfig, DEFAULT_MONTHLY_HOURS, LoginSettings, PayrollSettings, StorageSettings};
