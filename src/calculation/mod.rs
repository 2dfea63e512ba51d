//! Calculation logic for the attendance engine.
//!
//! This module contains the pure functions behind the engine: business day
//! counting, materialising a day's sheet from the roster, folding a month
//! of day snapshots into per-employee totals, and prorating salaries.

mod aggregation;
mod calendar;
mod salary;
mod snapshot;

pub use aggregation::{MonthlyAttendance, aggregate_month, fold_day};
pub use calendar::{business_days_in_month, is_business_day};
pub use salary::{STANDARD_MONTHLY_HOURS, calculate_pay, compute_salaries, per_hour_rate, prorate};
pub use snapshot::merge_day_snapshot;
