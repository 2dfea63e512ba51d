//! Monthly attendance aggregation.
//!
//! This module folds the day snapshots of a month into one
//! [`MonthlyAggregate`] per employee id. The fold only reads from the store,
//! so running it twice over unchanged data gives the same totals.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::models::{AttendanceRecord, MonthlyAggregate, YearMonth};
use crate::store::{Loaded, RecordStore};

/// Per-employee attendance totals for a month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyAttendance {
    /// The month aggregated.
    pub month: YearMonth,
    /// Totals keyed by employee id.
    pub totals: BTreeMap<String, MonthlyAggregate>,
    /// Number of days that had a readable snapshot.
    pub days_recorded: u32,
    /// Days whose snapshot existed but could not be read. These are skipped.
    pub days_unreadable: Vec<NaiveDate>,
}

impl MonthlyAttendance {
    /// Returns the totals for an employee, or zeros if they have no rows.
    ///
    /// # Example
    ///
    /// ```
    /// use attendance_engine::calculation::aggregate_month;
    /// use attendance_engine::models::YearMonth;
    /// use attendance_engine::store::InMemoryStore;
    ///
    /// let store = InMemoryStore::new();
    /// let attendance = aggregate_month(&store, YearMonth::new(2025, 8).unwrap());
    /// assert_eq!(attendance.get("1001").present_days, 0);
    /// ```
    pub fn get(&self, emp_id: &str) -> MonthlyAggregate {
        self.totals.get(emp_id).cloned().unwrap_or_default()
    }
}

/// Adds one day's rows to the running totals.
///
/// Each row counts one present or absent day for its employee id and adds
/// its overtime, saturating at [`Decimal::MAX`](rust_decimal::Decimal::MAX).
/// Ids are taken as stored, so rows for employees no longer on the roster
/// are still counted.
pub fn fold_day(totals: &mut BTreeMap<String, MonthlyAggregate>, records: &[AttendanceRecord]) {
    for record in records {
        let entry = totals.entry(record.emp_id.clone()).or_default();
        if record.status.is_present() {
            entry.present_days += 1;
        } else {
            entry.absent_days += 1;
        }
        entry.overtime_hours = entry.overtime_hours.saturating_add(record.overtime);
    }
}

/// Aggregates every day snapshot of `month`.
///
/// Walks each calendar day in ascending order. A day with no snapshot is
/// skipped and is not counted as absent. A day whose snapshot cannot be read
/// is skipped with a warning and listed in
/// [`MonthlyAttendance::days_unreadable`].
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::aggregate_month;
/// use attendance_engine::models::{AttendanceRecord, AttendanceStatus, YearMonth};
/// use attendance_engine::store::{InMemoryStore, RecordStore};
/// use chrono::NaiveDate;
///
/// let mut store = InMemoryStore::new();
/// let mut row = AttendanceRecord::absent("1001", "Ana", "127.0.0.1");
/// row.status = AttendanceStatus::Present;
/// store
///     .save_day_attendance(NaiveDate::from_ymd_opt(2025, 8, 4).unwrap(), &[row])
///     .unwrap();
///
/// let attendance = aggregate_month(&store, YearMonth::new(2025, 8).unwrap());
/// assert_eq!(attendance.get("1001").present_days, 1);
/// assert_eq!(attendance.days_recorded, 1);
/// ```
pub fn aggregate_month<S: RecordStore + ?Sized>(store: &S, month: YearMonth) -> MonthlyAttendance {
    let mut totals = BTreeMap::new();
    let mut days_recorded = 0;
    let mut days_unreadable = Vec::new();

    for day in month.days() {
        match store.load_day_attendance(day) {
            Loaded::Found(records) => {
                fold_day(&mut totals, &records);
                days_recorded += 1;
            }
            Loaded::Missing => {}
            Loaded::Corrupt { location, reason } => {
                warn!(
                    date = %day,
                    location = %location,
                    reason = %reason,
                    "Skipping unreadable attendance day"
                );
                days_unreadable.push(day);
            }
        }
    }

    debug!(
        month = %month,
        days_recorded,
        employees = totals.len(),
        "Aggregated month attendance"
    );

    MonthlyAttendance {
        month,
        totals,
        days_recorded,
        days_unreadable,
    }
}
