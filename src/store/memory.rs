//! In-memory record store.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;

use crate::error::EngineResult;
use crate::models::{AttendanceRecord, Employee};

use super::{Loaded, RecordStore, date_key};

/// A [`RecordStore`] that keeps everything in memory.
///
/// Used by tests and benchmarks. Days can be flagged as damaged with
/// [`InMemoryStore::corrupt_day`] to exercise the lenient read path.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    roster: Option<Vec<Employee>>,
    days: HashMap<NaiveDate, Vec<AttendanceRecord>>,
    corrupt_days: HashSet<NaiveDate>,
}

impl InMemoryStore {
    /// Creates an empty store with no roster written yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store whose roster is already saved.
    pub fn with_roster(employees: Vec<Employee>) -> Self {
        Self {
            roster: Some(employees),
            ..Self::default()
        }
    }

    /// Marks a day as unreadable. Later loads of that day report
    /// [`Loaded::Corrupt`] until it is saved again.
    pub fn corrupt_day(&mut self, date: NaiveDate) {
        self.corrupt_days.insert(date);
    }

    /// Number of days with a saved snapshot.
    pub fn saved_day_count(&self) -> usize {
        self.days.len()
    }
}

impl RecordStore for InMemoryStore {
    fn load_roster(&self) -> Loaded<Vec<Employee>> {
        match &self.roster {
            Some(employees) => Loaded::Found(employees.clone()),
            None => Loaded::Missing,
        }
    }

    fn save_roster(&mut self, employees: &[Employee]) -> EngineResult<()> {
        self.roster = Some(employees.to_vec());
        Ok(())
    }

    fn load_day_attendance(&self, date: NaiveDate) -> Loaded<Vec<AttendanceRecord>> {
        if self.corrupt_days.contains(&date) {
            return Loaded::Corrupt {
                location: format!("memory:{}", date_key(date)),
                reason: "marked corrupt".to_string(),
            };
        }

        match self.days.get(&date) {
            Some(records) => Loaded::Found(records.clone()),
            None => Loaded::Missing,
        }
    }

    fn save_day_attendance(
        &mut self,
        date: NaiveDate,
        records: &[AttendanceRecord],
    ) -> EngineResult<()> {
        self.corrupt_days.remove(&date);
        self.days.insert(date, records.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_new_store_has_missing_roster() {
        let store = InMemoryStore::new();
        assert_eq!(store.load_roster(), Loaded::Missing);
    }

    #[test]
    fn test_day_round_trip() {
        let mut store = InMemoryStore::new();
        let date = make_date("2025-08-19");
        let records = vec![AttendanceRecord::absent("1", "Ana", "127.0.0.1")];

        store.save_day_attendance(date, &records).unwrap();

        assert_eq!(store.load_day_attendance(date), Loaded::Found(records));
        assert_eq!(store.saved_day_count(), 1);
    }

    #[test]
    fn test_corrupt_day_until_saved() {
        let mut store = InMemoryStore::new();
        let date = make_date("2025-08-19");
        store.corrupt_day(date);

        assert!(store.load_day_attendance(date).is_corrupt());

        store.save_day_attendance(date, &[]).unwrap();
        assert_eq!(store.load_day_attendance(date), Loaded::Found(vec![]));
    }
}
