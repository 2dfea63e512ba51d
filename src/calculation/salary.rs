//! Monthly salary calculation.
//!
//! Net pay is the base salary prorated by present days over the month's
//! business days, plus overtime paid at the base hourly rate:
//!
//! ```text
//! per_hour_rate = base_salary / standard_monthly_hours      (0 when base is 0)
//! prorated      = base_salary * present_days / working_days (0 when no working days)
//! overtime_pay  = per_hour_rate * overtime_hours
//! net_pay       = max(0, prorated + overtime_pay)
//! ```
//!
//! `present_days` is not capped at `working_days`, so weekend attendance
//! can raise the prorated figure above the base salary.
//!
//! Every step saturates at [`Decimal::MAX`] instead of overflowing, so a
//! hand-edited roster or day file cannot abort a salary run.

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::config::DEFAULT_MONTHLY_HOURS;
use crate::models::{MonthlyAggregate, PayBreakdown, SalaryResult, YearMonth};
use crate::store::{Loaded, RecordStore};

use super::aggregation::aggregate_month;
use super::calendar::business_days_in_month;

/// Standard working hours in a month.
pub const STANDARD_MONTHLY_HOURS: Decimal = DEFAULT_MONTHLY_HOURS;

/// Calculates the hourly rate used for overtime.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::{STANDARD_MONTHLY_HOURS, per_hour_rate};
/// use rust_decimal::Decimal;
///
/// assert_eq!(per_hour_rate(Decimal::from(17600), STANDARD_MONTHLY_HOURS), Decimal::from(100));
/// assert_eq!(per_hour_rate(Decimal::ZERO, STANDARD_MONTHLY_HOURS), Decimal::ZERO);
/// ```
pub fn per_hour_rate(base_salary: Decimal, monthly_hours: Decimal) -> Decimal {
    if base_salary > Decimal::ZERO && monthly_hours > Decimal::ZERO {
        base_salary.checked_div(monthly_hours).unwrap_or(Decimal::MAX)
    } else {
        Decimal::ZERO
    }
}

/// Scales the base salary by present days over working days.
pub fn prorate(base_salary: Decimal, present_days: u32, working_days: u32) -> Decimal {
    if working_days == 0 {
        return Decimal::ZERO;
    }
    base_salary.saturating_mul(Decimal::from(present_days)) / Decimal::from(working_days)
}

/// Calculates one employee's pay for a month.
///
/// # Arguments
///
/// * `base_salary` - Monthly gross salary
/// * `working_days` - Business days in the month
/// * `aggregate` - The employee's attendance totals
/// * `monthly_hours` - Standard hours in a month
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::{STANDARD_MONTHLY_HOURS, calculate_pay};
/// use attendance_engine::models::MonthlyAggregate;
/// use rust_decimal::Decimal;
///
/// let aggregate = MonthlyAggregate {
///     present_days: 20,
///     absent_days: 0,
///     overtime_hours: Decimal::from(10),
/// };
/// let pay = calculate_pay(Decimal::from(17600), 20, &aggregate, STANDARD_MONTHLY_HOURS);
///
/// assert_eq!(pay.per_hour_rate, Decimal::from(100));
/// assert_eq!(pay.overtime_pay, Decimal::from(1000));
/// assert_eq!(pay.net_pay, Decimal::from(18600));
/// ```
pub fn calculate_pay(
    base_salary: Decimal,
    working_days: u32,
    aggregate: &MonthlyAggregate,
    monthly_hours: Decimal,
) -> PayBreakdown {
    let per_hour_rate = per_hour_rate(base_salary, monthly_hours);
    let prorated = prorate(base_salary, aggregate.present_days, working_days);
    let overtime_pay = per_hour_rate.saturating_mul(aggregate.overtime_hours);
    let net_pay = prorated.saturating_add(overtime_pay).max(Decimal::ZERO);

    PayBreakdown {
        per_hour_rate,
        prorated,
        overtime_pay,
        net_pay,
    }
}

/// Computes salaries for every roster employee, or only `filter` when given.
///
/// Results follow roster order. An employee with no attendance rows gets
/// zeros. An empty roster, an unreadable roster, or a filter matching nobody
/// yields an empty result.
pub fn compute_salaries<S: RecordStore + ?Sized>(
    store: &S,
    month: YearMonth,
    filter: Option<&str>,
    monthly_hours: Decimal,
) -> Vec<SalaryResult> {
    let roster = match store.load_roster() {
        Loaded::Found(roster) => roster,
        Loaded::Missing => Vec::new(),
        Loaded::Corrupt { location, reason } => {
            warn!(location = %location, reason = %reason, "Roster unreadable, computing no salaries");
            Vec::new()
        }
    };

    let selected: Vec<_> = roster
        .into_iter()
        .filter(|e| filter.is_none_or(|id| e.emp_id == id))
        .collect();
    if selected.is_empty() {
        debug!(month = %month, filter = ?filter, "No employees selected for salary run");
        return Vec::new();
    }

    let working_days = business_days_in_month(month);
    let attendance = aggregate_month(store, month);

    selected
        .into_iter()
        .map(|employee| {
            let aggregate = attendance.get(&employee.emp_id);
            let pay = calculate_pay(employee.base_salary, working_days, &aggregate, monthly_hours);
            SalaryResult {
                emp_id: employee.emp_id,
                name: employee.name,
                month,
                base_salary: employee.base_salary,
                working_days,
                present_days: aggregate.present_days,
                absent_days: aggregate.absent_days,
                overtime_hours: aggregate.overtime_hours,
                net_pay: pay.net_pay,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AttendanceRecord, AttendanceStatus, Employee};
    use crate::store::InMemoryStore;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn august() -> YearMonth {
        YearMonth::new(2025, 8).unwrap()
    }

    fn create_test_employee(emp_id: &str, base_salary: &str) -> Employee {
        Employee {
            emp_id: emp_id.to_string(),
            name: format!("Employee {}", emp_id),
            department: None,
            role: None,
            base_salary: dec(base_salary),
            join_date: None,
            phone: None,
            email: None,
        }
    }

    fn aggregate(present: u32, absent: u32, overtime: &str) -> MonthlyAggregate {
        MonthlyAggregate {
            present_days: present,
            absent_days: absent,
            overtime_hours: dec(overtime),
        }
    }

    fn mark(
        store: &mut InMemoryStore,
        day: NaiveDate,
        emp_id: &str,
        status: AttendanceStatus,
        overtime: &str,
    ) {
        let mut records = store.load_day_attendance(day).into_value_or_default();
        records.push(AttendanceRecord {
            emp_id: emp_id.to_string(),
            name: format!("Employee {}", emp_id),
            status,
            ip: "127.0.0.1".to_string(),
            overtime: dec(overtime),
        });
        store.save_day_attendance(day, &records).unwrap();
    }

    // ==========================================================================
    // calculate_pay
    // ==========================================================================
    #[test]
    fn test_full_attendance_pays_exact_base() {
        let pay = calculate_pay(dec("4200"), 21, &aggregate(21, 0, "0"), STANDARD_MONTHLY_HOURS);
        assert_eq!(pay.prorated, dec("4200"));
        assert_eq!(pay.net_pay, dec("4200"));
    }

    #[test]
    fn test_full_absence_pays_zero() {
        let pay = calculate_pay(dec("4200"), 21, &aggregate(0, 21, "0"), STANDARD_MONTHLY_HOURS);
        assert_eq!(pay.net_pay, Decimal::ZERO);
    }

    #[test]
    fn test_overtime_scenario_nets_18000() {
        let pay = calculate_pay(dec("17600"), 22, &aggregate(22, 0, "10"), STANDARD_MONTHLY_HOURS);
        assert_eq!(pay.per_hour_rate, dec("100"));
        assert_eq!(pay.prorated, dec("17600"));
        assert_eq!(pay.overtime_pay, dec("1000"));
        assert_eq!(pay.net_pay, dec("18000"));
    }

    #[test]
    fn test_half_attendance_with_heavy_overtime() {
        // 10 present of 20 = 8800; 92 hours at 100 = 9200
        let pay = calculate_pay(dec("17600"), 20, &aggregate(10, 10, "92"), STANDARD_MONTHLY_HOURS);
        assert_eq!(pay.per_hour_rate, dec("100"));
        assert_eq!(pay.prorated, dec("8800"));
        assert_eq!(pay.overtime_pay, dec("9200"));
        assert_eq!(pay.net_pay, dec("18000"));
    }

    #[test]
    fn test_present_days_are_not_capped() {
        let pay = calculate_pay(dec("2000"), 20, &aggregate(22, 0, "0"), STANDARD_MONTHLY_HOURS);
        assert_eq!(pay.net_pay, dec("2200"));
    }

    #[test]
    fn test_zero_working_days_prorates_to_zero() {
        let pay = calculate_pay(dec("17600"), 0, &aggregate(3, 0, "2"), STANDARD_MONTHLY_HOURS);
        assert_eq!(pay.prorated, Decimal::ZERO);
        assert_eq!(pay.net_pay, dec("200"));
    }

    #[test]
    fn test_zero_base_salary_pays_nothing() {
        let pay = calculate_pay(Decimal::ZERO, 21, &aggregate(21, 0, "40"), STANDARD_MONTHLY_HOURS);
        assert_eq!(pay.per_hour_rate, Decimal::ZERO);
        assert_eq!(pay.net_pay, Decimal::ZERO);
    }

    #[test]
    fn test_custom_monthly_hours() {
        let pay = calculate_pay(dec("16000"), 20, &aggregate(20, 0, "1"), dec("160"));
        assert_eq!(pay.per_hour_rate, dec("100"));
        assert_eq!(pay.net_pay, dec("16100"));
    }

    #[test]
    fn test_huge_values_saturate_instead_of_overflowing() {
        let huge = dec("50000000000000000000000000000");
        assert_eq!(prorate(huge, 2, 21), Decimal::MAX / Decimal::from(21));

        let pay = calculate_pay(huge, 21, &aggregate(2, 0, "50000000000000000000000000000"), STANDARD_MONTHLY_HOURS);
        assert_eq!(pay.overtime_pay, Decimal::MAX);
        assert_eq!(pay.net_pay, Decimal::MAX);
    }

    #[test]
    fn test_tiny_monthly_hours_saturate_rate() {
        let rate = per_hour_rate(dec("70000000000000000000000000000"), dec("0.001"));
        assert_eq!(rate, Decimal::MAX);
    }

    #[test]
    fn test_proration_multiplies_before_dividing() {
        // 1000 * 7 / 21 = 333.33..., not 1000 / 21 * 7
        assert_eq!(prorate(dec("1000"), 7, 21), dec("7000") / dec("21"));
        assert_eq!(prorate(dec("2100"), 7, 21), dec("700"));
    }

    // ==========================================================================
    // compute_salaries
    // ==========================================================================
    #[test]
    fn test_compute_salaries_follows_roster_order() {
        let mut store = InMemoryStore::with_roster(vec![
            create_test_employee("30", "2100"),
            create_test_employee("10", "4200"),
        ]);
        let monday = NaiveDate::from_ymd_opt(2025, 8, 4).unwrap();
        mark(&mut store, monday, "10", AttendanceStatus::Present, "0");

        let results = compute_salaries(&store, august(), None, STANDARD_MONTHLY_HOURS);

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].emp_id, "30");
        assert_eq!(results[0].present_days, 0);
        assert_eq!(results[0].net_pay, Decimal::ZERO);
        assert_eq!(results[1].emp_id, "10");
        assert_eq!(results[1].working_days, 21);
        assert_eq!(results[1].net_pay, dec("200"));
    }

    #[test]
    fn test_compute_salaries_with_filter() {
        let store = InMemoryStore::with_roster(vec![
            create_test_employee("1", "1000"),
            create_test_employee("2", "2000"),
        ]);

        let results = compute_salaries(&store, august(), Some("2"), STANDARD_MONTHLY_HOURS);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].base_salary, dec("2000"));

        let none = compute_salaries(&store, august(), Some("99"), STANDARD_MONTHLY_HOURS);
        assert!(none.is_empty());
    }

    #[test]
    fn test_compute_salaries_empty_roster() {
        let store = InMemoryStore::new();
        assert!(compute_salaries(&store, august(), None, STANDARD_MONTHLY_HOURS).is_empty());
    }

    #[test]
    fn test_compute_salaries_uses_current_roster_name() {
        let mut store = InMemoryStore::with_roster(vec![create_test_employee("1", "4200")]);
        let monday = NaiveDate::from_ymd_opt(2025, 8, 4).unwrap();
        mark(&mut store, monday, "1", AttendanceStatus::Present, "0");

        let mut roster = store.load_roster().into_value_or_default();
        roster[0].name = "Renamed".to_string();
        store.save_roster(&roster).unwrap();

        let results = compute_salaries(&store, august(), None, STANDARD_MONTHLY_HOURS);
        assert_eq!(results[0].name, "Renamed");
        assert_eq!(results[0].present_days, 1);
    }
}
