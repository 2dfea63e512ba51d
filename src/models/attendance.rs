//! Attendance record model.
//!
//! This module defines [`AttendanceRecord`], one row of a day snapshot, and
//! [`AttendanceStatus`]. Both decode leniently so that hand-edited or
//! partially damaged day files still load.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Whether an employee attended on a given day.
///
/// Stored as the single letters `"P"` and `"A"`. When reading, only the
/// first character matters and case is ignored, so `"present"` and `"p"`
/// are both [`AttendanceStatus::Present`]; anything else, including a
/// missing value or a leading space, is [`AttendanceStatus::Absent`].
///
/// # Example
///
/// ```
/// use attendance_engine::models::AttendanceStatus;
///
/// assert_eq!(AttendanceStatus::from_code("present"), AttendanceStatus::Present);
/// assert_eq!(AttendanceStatus::from_code("a"), AttendanceStatus::Absent);
/// assert_eq!(AttendanceStatus::from_code(""), AttendanceStatus::Absent);
/// assert_eq!(AttendanceStatus::Present.code(), "P");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum AttendanceStatus {
    /// The employee was present.
    Present,
    /// The employee was absent. This is the default for a new row.
    #[default]
    Absent,
}

impl AttendanceStatus {
    /// Interprets a status code using the first-letter convention.
    pub fn from_code(code: &str) -> Self {
        match code.chars().next() {
            Some(c) if c.eq_ignore_ascii_case(&'P') => AttendanceStatus::Present,
            _ => AttendanceStatus::Absent,
        }
    }

    /// The single-letter code written to storage and exports.
    pub fn code(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "P",
            AttendanceStatus::Absent => "A",
        }
    }

    /// Returns true for [`AttendanceStatus::Present`].
    pub fn is_present(&self) -> bool {
        *self == AttendanceStatus::Present
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl Serialize for AttendanceStatus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for AttendanceStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw
            .as_deref()
            .map(AttendanceStatus::from_code)
            .unwrap_or_default())
    }
}

/// One employee's attendance on one day.
///
/// `name` is a snapshot taken when the day was first materialised and is
/// not re-synced when the roster changes. `emp_id` is not checked against
/// the roster after the fact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// Employee id at the time the row was created.
    #[serde(default)]
    pub emp_id: String,
    /// Employee name at the time the row was created.
    #[serde(default)]
    pub name: String,
    /// Present or absent.
    #[serde(default)]
    pub status: AttendanceStatus,
    /// Address of the machine the row was recorded from.
    #[serde(default)]
    pub ip: String,
    /// Overtime hours worked on this day.
    #[serde(default, deserialize_with = "lenient_hours")]
    pub overtime: Decimal,
}

impl AttendanceRecord {
    /// Creates an absent row with zero overtime.
    pub fn absent(emp_id: impl Into<String>, name: impl Into<String>, ip: impl Into<String>) -> Self {
        Self {
            emp_id: emp_id.into(),
            name: name.into(),
            status: AttendanceStatus::Absent,
            ip: ip.into(),
            overtime: Decimal::ZERO,
        }
    }
}

/// Reads overtime from a number or a numeric string; anything unparsable
/// becomes zero.
fn lenient_hours<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let hours = match value {
        serde_json::Value::Number(number) => {
            let text = number.to_string();
            Decimal::from_str(&text)
                .or_else(|_| Decimal::from_scientific(&text))
                .unwrap_or(Decimal::ZERO)
        }
        serde_json::Value::String(text) => Decimal::from_str(text.trim()).unwrap_or(Decimal::ZERO),
        _ => Decimal::ZERO,
    };
    Ok(hours)
}
