//! Business day counting.
//!
//! Counts the Monday to Friday days of a month, which is the `working_days`
//! figure salaries are prorated against.

use chrono::{Datelike, NaiveDate, Weekday};

use crate::models::YearMonth;

/// Returns true for Monday through Friday.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::is_business_day;
/// use chrono::NaiveDate;
///
/// // 2025-08-16 is a Saturday, 2025-08-18 a Monday
/// assert!(!is_business_day(NaiveDate::from_ymd_opt(2025, 8, 16).unwrap()));
/// assert!(is_business_day(NaiveDate::from_ymd_opt(2025, 8, 18).unwrap()));
/// ```
pub fn is_business_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Counts the Monday to Friday days in a month.
///
/// Public holidays are not considered.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::business_days_in_month;
/// use attendance_engine::models::YearMonth;
///
/// let august = YearMonth::new(2025, 8).unwrap();
/// assert_eq!(business_days_in_month(august), 21);
/// ```
pub fn business_days_in_month(month: YearMonth) -> u32 {
    month.days().filter(|d| is_business_day(*d)).count() as u32
}
