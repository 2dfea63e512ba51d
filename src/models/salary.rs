//! Derived attendance and salary models.
//!
//! These types are computed from stored data on demand and are never
//! written back to the record store.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::YearMonth;

/// One employee's attendance totals for a month.
///
/// # Example
///
/// ```
/// use attendance_engine::models::MonthlyAggregate;
/// use rust_decimal::Decimal;
///
/// let empty = MonthlyAggregate::default();
/// assert_eq!(empty.present_days, 0);
/// assert_eq!(empty.absent_days, 0);
/// assert_eq!(empty.overtime_hours, Decimal::ZERO);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyAggregate {
    /// Days the employee was marked present.
    pub present_days: u32,
    /// Days the employee was marked absent.
    pub absent_days: u32,
    /// Sum of overtime hours over the month.
    pub overtime_hours: Decimal,
}

impl MonthlyAggregate {
    /// Total days with a recorded row for this employee.
    pub fn recorded_days(&self) -> u32 {
        self.present_days + self.absent_days
    }
}

/// The pay components behind a net pay figure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayBreakdown {
    /// Base salary divided by the standard monthly hours.
    pub per_hour_rate: Decimal,
    /// Base salary scaled by present days over working days.
    pub prorated: Decimal,
    /// Hourly rate times overtime hours.
    pub overtime_pay: Decimal,
    /// Prorated pay plus overtime pay, floored at zero.
    pub net_pay: Decimal,
}

/// One employee's salary for a month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryResult {
    /// The employee's id.
    pub emp_id: String,
    /// The employee's current roster name.
    pub name: String,
    /// The month the salary covers.
    pub month: YearMonth,
    /// Monthly gross salary from the roster.
    pub base_salary: Decimal,
    /// Monday to Friday days in the month.
    pub working_days: u32,
    /// Days marked present.
    pub present_days: u32,
    /// Days marked absent.
    pub absent_days: u32,
    /// Total overtime hours.
    pub overtime_hours: Decimal,
    /// Prorated salary plus overtime pay, never negative.
    pub net_pay: Decimal,
}

/// A complete salary run for one month.
///
/// Wraps the result rows with the identifying metadata of the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryReport {
    /// Unique identifier for this run.
    pub report_id: Uuid,
    /// When the run was computed.
    pub generated_at: DateTime<Utc>,
    /// The version of the engine that computed the run.
    pub engine_version: String,
    /// The month covered.
    pub month: YearMonth,
    /// Monday to Friday days in the month.
    pub working_days: u32,
    /// One row per employee, in roster order.
    pub results: Vec<SalaryResult>,
}

impl SalaryReport {
    /// Sum of net pay over every row.
    pub fn total_net_pay(&self) -> Decimal {
        self.results
            .iter()
            .fold(Decimal::ZERO, |total, r| total.saturating_add(r.net_pay))
    }

    /// Returns true when the run produced no rows.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
