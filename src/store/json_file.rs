//! JSON file backed record store.
//!
//! This module provides [`JsonFileStore`], which keeps the roster and each
//! day snapshot in its own pretty-printed JSON file.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::error::{EngineError, EngineResult};
use crate::models::{AttendanceRecord, Employee};

use super::{Loaded, RecordStore, date_key};

const ROSTER_FILE: &str = "employees.json";
const ATTENDANCE_DIR: &str = "attendance";

/// Stores records as JSON files under a data directory.
///
/// # Directory Structure
///
/// ```text
/// data/
/// ├── employees.json          # The roster, an array of employees
/// └── attendance/
///     └── 2025-08-19.json     # One snapshot per saved day
/// ```
///
/// Every write goes to a temporary file in the target directory which is
/// then renamed over the destination, so a failed save leaves the previous
/// file intact.
///
/// # Example
///
/// ```no_run
/// use attendance_engine::store::{JsonFileStore, RecordStore};
///
/// let store = JsonFileStore::open("./data")?;
/// let roster = store.load_roster().into_value_or_default();
/// println!("{} employees", roster.len());
/// # Ok::<(), attendance_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    /// Opens the store rooted at `root`, creating the directory layout and
    /// an empty roster if they do not exist yet.
    pub fn open<P: AsRef<Path>>(root: P) -> EngineResult<Self> {
        let store = Self {
            root: root.as_ref().to_path_buf(),
        };

        let attendance_dir = store.root.join(ATTENDANCE_DIR);
        fs::create_dir_all(&attendance_dir).map_err(|e| storage_error(&attendance_dir, e))?;

        let roster_path = store.roster_path();
        if !roster_path.exists() {
            debug!(path = %roster_path.display(), "Initializing empty roster");
            write_json(&roster_path, &Vec::<Employee>::new())?;
        }

        Ok(store)
    }

    /// The data directory this store reads from and writes to.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the roster file.
    pub fn roster_path(&self) -> PathBuf {
        self.root.join(ROSTER_FILE)
    }

    /// Path of the snapshot file for `date`.
    pub fn day_path(&self, date: NaiveDate) -> PathBuf {
        self.root
            .join(ATTENDANCE_DIR)
            .join(format!("{}.json", date_key(date)))
    }
}

impl RecordStore for JsonFileStore {
    fn load_roster(&self) -> Loaded<Vec<Employee>> {
        read_json(&self.roster_path())
    }

    fn save_roster(&mut self, employees: &[Employee]) -> EngineResult<()> {
        write_json(&self.roster_path(), employees)
    }

    fn load_day_attendance(&self, date: NaiveDate) -> Loaded<Vec<AttendanceRecord>> {
        read_json(&self.day_path(date))
    }

    fn save_day_attendance(
        &mut self,
        date: NaiveDate,
        records: &[AttendanceRecord],
    ) -> EngineResult<()> {
        write_json(&self.day_path(date), records)
    }
}

/// Reads and decodes a JSON file, classifying every failure.
fn read_json<T: DeserializeOwned>(path: &Path) -> Loaded<T> {
    let location = path.display().to_string();

    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(path = %location, "No stored file");
            return Loaded::Missing;
        }
        Err(e) => {
            warn!(path = %location, error = %e, "Stored file is unreadable");
            return Loaded::Corrupt {
                location,
                reason: e.to_string(),
            };
        }
    };

    match serde_json::from_str(&content) {
        Ok(value) => {
            debug!(path = %location, bytes = content.len(), "Loaded stored file");
            Loaded::Found(value)
        }
        Err(e) => {
            warn!(path = %location, error = %e, "Stored file is malformed");
            Loaded::Corrupt {
                location,
                reason: e.to_string(),
            }
        }
    }
}

/// Serializes `value` and atomically replaces `path` with it.
fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> EngineResult<()> {
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent).map_err(|e| storage_error(parent, e))?;

    let mut file = NamedTempFile::new_in(parent).map_err(|e| storage_error(parent, e))?;
    serde_json::to_writer_pretty(&mut file, value).map_err(|e| EngineError::Storage {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    file.write_all(b"\n")
        .and_then(|_| file.flush())
        .map_err(|e| storage_error(path, e))?;
    file.persist(path).map_err(|e| storage_error(path, e.error))?;

    debug!(path = %path.display(), "Wrote stored file");
    Ok(())
}

fn storage_error(path: &Path, error: io::Error) -> EngineError {
    EngineError::Storage {
        path: path.display().to_string(),
        message: error.to_string(),
    }
}
