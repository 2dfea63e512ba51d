//! Editable attendance sheet for one day.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{AttendanceRecord, AttendanceStatus};
use crate::validation::parse_non_negative_decimal;

/// Raw edits to one row, as typed by a user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttendanceEdit {
    /// Status text. Only the first letter counts; blank means absent.
    pub status: String,
    /// Recording address. Blank means the sheet's fallback address.
    pub ip: String,
    /// Overtime hours. Must be a non-negative number.
    pub overtime: String,
}

/// A day's attendance rows held in memory while they are edited.
///
/// A sheet is built by [`AppContext::open_day`](crate::app::AppContext::open_day)
/// and only reaches storage through
/// [`AppContext::save_day`](crate::app::AppContext::save_day).
///
/// # Example
///
/// ```
/// use attendance_engine::app::{AttendanceEdit, DaySheet};
/// use attendance_engine::models::{AttendanceRecord, AttendanceStatus};
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2025, 8, 19).unwrap();
/// let rows = vec![AttendanceRecord::absent("1", "Ana", "127.0.0.1")];
/// let mut sheet = DaySheet::new(date, rows, "127.0.0.1");
///
/// sheet.mark_all(AttendanceStatus::Present);
/// sheet
///     .update("1", &AttendanceEdit {
///         status: "absent".to_string(),
///         ip: String::new(),
///         overtime: "1.5".to_string(),
///     })
///     .unwrap();
///
/// assert_eq!(sheet.rows()[0].status, AttendanceStatus::Absent);
/// assert_eq!(sheet.rows()[0].overtime.to_string(), "1.5");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DaySheet {
    date: NaiveDate,
    rows: Vec<AttendanceRecord>,
    fallback_ip: String,
}

impl DaySheet {
    /// Creates a sheet over already merged rows.
    pub fn new(date: NaiveDate, rows: Vec<AttendanceRecord>, fallback_ip: impl Into<String>) -> Self {
        Self {
            date,
            rows,
            fallback_ip: fallback_ip.into(),
        }
    }

    /// The day this sheet covers.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// The rows, in roster order.
    pub fn rows(&self) -> &[AttendanceRecord] {
        &self.rows
    }

    /// Returns true when the sheet has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Sets every row to `status`.
    pub fn mark_all(&mut self, status: AttendanceStatus) {
        for row in &mut self.rows {
            row.status = status;
        }
        debug!(date = %self.date, status = %status, rows = self.rows.len(), "Marked all rows");
    }

    /// Applies `edit` to the row for `emp_id`.
    ///
    /// The overtime is checked before anything changes, so a rejected edit
    /// leaves the row as it was.
    pub fn update(&mut self, emp_id: &str, edit: &AttendanceEdit) -> EngineResult<()> {
        let overtime = parse_non_negative_decimal(&edit.overtime, |message| {
            EngineError::InvalidAttendance {
                field: "overtime".to_string(),
                message: format!("overtime hours must be a non-negative number: {}", message),
            }
        })?;

        let row = self
            .rows
            .iter_mut()
            .find(|r| r.emp_id == emp_id)
            .ok_or_else(|| EngineError::EmployeeNotFound {
                emp_id: emp_id.to_string(),
            })?;

        row.status = AttendanceStatus::from_code(&edit.status);
        row.ip = match edit.ip.trim() {
            "" => self.fallback_ip.clone(),
            ip => ip.to_string(),
        };
        row.overtime = overtime;

        debug!(date = %self.date, emp_id, status = %row.status, "Updated attendance row");
        Ok(())
    }

    /// Consumes the sheet, returning its rows.
    pub fn into_rows(self) -> Vec<AttendanceRecord> {
        self.rows
    }
}
