//! Record storage for the roster and day snapshots.
//!
//! The [`RecordStore`] trait is the only way the rest of the engine reaches
//! persisted data. Two implementations are provided: [`JsonFileStore`] for
//! the on-disk layout and [`InMemoryStore`] for tests and benchmarks.

mod json_file;
mod loaded;
mod memory;

use chrono::NaiveDate;

use crate::error::EngineResult;
use crate::models::{AttendanceRecord, Employee};

pub use json_file::JsonFileStore;
pub use loaded::Loaded;
pub use memory::InMemoryStore;

/// Loads and saves the employee roster and per-day attendance snapshots.
///
/// Reads are lenient and report their outcome through [`Loaded`]. Writes
/// replace the whole roster or the whole day and are all-or-nothing.
pub trait RecordStore {
    /// Loads the full roster in stored order.
    fn load_roster(&self) -> Loaded<Vec<Employee>>;

    /// Replaces the full roster.
    fn save_roster(&mut self, employees: &[Employee]) -> EngineResult<()>;

    /// Loads the snapshot for one calendar day.
    ///
    /// A day that was never saved is [`Loaded::Missing`], not an error.
    fn load_day_attendance(&self, date: NaiveDate) -> Loaded<Vec<AttendanceRecord>>;

    /// Replaces the snapshot for one calendar day.
    fn save_day_attendance(&mut self, date: NaiveDate, records: &[AttendanceRecord])
    -> EngineResult<()>;
}

/// Formats a date as the `YYYY-MM-DD` key used to address day snapshots.
pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
