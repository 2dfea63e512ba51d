//! Error types for the attendance engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure the engine reports to its callers. Unreadable stored
//! files are not errors; they surface as
//! [`Loaded::Corrupt`](crate::store::Loaded::Corrupt).

use thiserror::Error;

/// The main error type for the attendance engine.
///
/// All fallible operations return this error type. No variant is produced
/// after persisted state has been partially modified.
///
/// # Example
///
/// ```
/// use attendance_engine::error::EngineError;
///
/// let error = EngineError::EmployeeNotFound {
///     emp_id: "1042".to_string(),
/// };
/// assert_eq!(error.to_string(), "Employee not found: 1042");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// An employee field was missing or malformed.
    #[error("Invalid employee field '{field}': {message}")]
    InvalidEmployee {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// An attendance edit was missing or malformed.
    #[error("Invalid attendance field '{field}': {message}")]
    InvalidAttendance {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A date string was not a real `YYYY-MM-DD` calendar date.
    #[error("Invalid date '{value}': expected YYYY-MM-DD")]
    InvalidDate {
        /// The rejected input.
        value: String,
    },

    /// A month string was not a `YYYY-MM` month within the supported years.
    #[error("Invalid month '{value}': expected YYYY-MM with year 1900-3000")]
    InvalidMonth {
        /// The rejected input.
        value: String,
    },

    /// An employee with this id is already on the roster.
    #[error("Employee id already exists: {emp_id}")]
    DuplicateEmployee {
        /// The conflicting employee id.
        emp_id: String,
    },

    /// No employee (or attendance row) with this id exists.
    #[error("Employee not found: {emp_id}")]
    EmployeeNotFound {
        /// The id that was looked up.
        emp_id: String,
    },

    /// An export was requested for an empty collection.
    #[error("Nothing to export: {what}")]
    NothingToExport {
        /// What was being exported.
        what: String,
    },

    /// Writing to the record store failed.
    #[error("Storage error at '{path}': {message}")]
    Storage {
        /// The file or directory involved.
        path: String,
        /// A description of the failure.
        message: String,
    },

    /// Writing a CSV export failed.
    #[error("Export to '{path}' failed: {message}")]
    Export {
        /// The destination path.
        path: String,
        /// A description of the failure.
        message: String,
    },

    /// The login gate rejected the supplied credentials.
    #[error("Invalid username or password")]
    AuthenticationFailed,
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
