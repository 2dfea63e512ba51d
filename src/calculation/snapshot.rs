//! Day snapshot materialisation.
//!
//! A day's editable sheet is built from the current roster, carrying
//! forward whatever was previously saved for that day.

use std::collections::HashMap;

use crate::models::{AttendanceRecord, Employee};

/// Merges the roster with the rows previously saved for a day.
///
/// The result has one row per roster employee, in roster order, named as
/// the roster names them now. Status, ip and overtime come from the prior
/// row with the same id when there is one; otherwise the row is absent,
/// recorded from `fallback_ip`, with zero overtime. A prior row without an
/// ip also takes `fallback_ip`. Prior rows for ids no
/// longer on the roster are dropped. When the prior snapshot repeats an
/// id, the last row wins.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::merge_day_snapshot;
/// use attendance_engine::models::{AttendanceRecord, AttendanceStatus, Employee};
///
/// let roster = vec![
///     Employee::new("1", "Ana"),
///     Employee::new("2", "Bo"),
/// ];
/// let mut prior = AttendanceRecord::absent("2", "Bo", "10.0.0.7");
/// prior.status = AttendanceStatus::Present;
///
/// let merged = merge_day_snapshot(&roster, &[prior], "127.0.0.1");
///
/// assert_eq!(merged[0].status, AttendanceStatus::Absent);
/// assert_eq!(merged[0].ip, "127.0.0.1");
/// assert_eq!(merged[1].status, AttendanceStatus::Present);
/// assert_eq!(merged[1].ip, "10.0.0.7");
/// ```
pub fn merge_day_snapshot(
    roster: &[Employee],
    prior: &[AttendanceRecord],
    fallback_ip: &str,
) -> Vec<AttendanceRecord> {
    let saved: HashMap<&str, &AttendanceRecord> =
        prior.iter().map(|r| (r.emp_id.as_str(), r)).collect();

    roster
        .iter()
        .map(|employee| match saved.get(employee.emp_id.as_str()) {
            Some(row) => AttendanceRecord {
                emp_id: employee.emp_id.clone(),
                name: employee.name.clone(),
                status: row.status,
                ip: match row.ip.trim() {
                    "" => fallback_ip.to_string(),
                    _ => row.ip.clone(),
                },
                overtime: row.overtime,
            },
            None => AttendanceRecord::absent(&employee.emp_id, &employee.name, fallback_ip),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AttendanceStatus;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_prior(emp_id: &str, name: &str, status: AttendanceStatus, overtime: &str) -> AttendanceRecord {
        AttendanceRecord {
            emp_id: emp_id.to_string(),
            name: name.to_string(),
            status,
            ip: "10.0.0.9".to_string(),
            overtime: dec(overtime),
        }
    }

    #[test]
    fn test_first_time_day_defaults_every_row() {
        let roster = vec![Employee::new("1", "Ana"), Employee::new("2", "Bo")];

        let merged = merge_day_snapshot(&roster, &[], "192.168.1.4");

        assert_eq!(merged.len(), 2);
        for (row, employee) in merged.iter().zip(&roster) {
            assert_eq!(row.emp_id, employee.emp_id);
            assert_eq!(row.status, AttendanceStatus::Absent);
            assert_eq!(row.ip, "192.168.1.4");
            assert_eq!(row.overtime, Decimal::ZERO);
        }
    }

    #[test]
    fn test_prior_values_carry_forward() {
        let roster = vec![Employee::new("1", "Ana")];
        let prior = vec![create_prior("1", "Ana", AttendanceStatus::Present, "2.5")];

        let merged = merge_day_snapshot(&roster, &prior, "127.0.0.1");

        assert_eq!(merged[0].status, AttendanceStatus::Present);
        assert_eq!(merged[0].ip, "10.0.0.9");
        assert_eq!(merged[0].overtime, dec("2.5"));
    }

    #[test]
    fn test_prior_row_without_ip_takes_fallback() {
        let roster = vec![Employee::new("1", "Ana"), Employee::new("2", "Bo")];
        let prior: Vec<AttendanceRecord> = serde_json::from_str(
            r#"[
                {"emp_id": "1", "name": "Ana", "status": "P", "overtime": "1"},
                {"emp_id": "2", "name": "Bo", "status": "P", "ip": "  "}
            ]"#,
        )
        .unwrap();

        let merged = merge_day_snapshot(&roster, &prior, "192.168.1.4");

        assert_eq!(merged[0].ip, "192.168.1.4");
        assert_eq!(merged[0].status, AttendanceStatus::Present);
        assert_eq!(merged[0].overtime, dec("1"));
        assert_eq!(merged[1].ip, "192.168.1.4");
    }

    #[test]
    fn test_follows_roster_order_not_prior_order() {
        let roster = vec![Employee::new("3", "Cy"), Employee::new("1", "Ana")];
        let prior = vec![
            create_prior("1", "Ana", AttendanceStatus::Present, "0"),
            create_prior("3", "Cy", AttendanceStatus::Present, "0"),
        ];

        let merged = merge_day_snapshot(&roster, &prior, "127.0.0.1");
        let ids: Vec<_> = merged.iter().map(|r| r.emp_id.as_str()).collect();
        assert_eq!(ids, vec!["3", "1"]);
    }

    #[test]
    fn test_name_comes_from_current_roster() {
        let roster = vec![Employee::new("1", "Ana Lima")];
        let prior = vec![create_prior("1", "Ana", AttendanceStatus::Present, "0")];

        let merged = merge_day_snapshot(&roster, &prior, "127.0.0.1");
        assert_eq!(merged[0].name, "Ana Lima");
    }

    #[test]
    fn test_departed_employees_are_dropped() {
        let roster = vec![Employee::new("1", "Ana")];
        let prior = vec![
            create_prior("1", "Ana", AttendanceStatus::Present, "0"),
            create_prior("9", "Gone", AttendanceStatus::Present, "4"),
        ];

        let merged = merge_day_snapshot(&roster, &prior, "127.0.0.1");
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].emp_id, "1");
    }

    #[test]
    fn test_duplicate_prior_rows_last_wins() {
        let roster = vec![Employee::new("1", "Ana")];
        let prior = vec![
            create_prior("1", "Ana", AttendanceStatus::Absent, "1"),
            create_prior("1", "Ana", AttendanceStatus::Present, "3"),
        ];

        let merged = merge_day_snapshot(&roster, &prior, "127.0.0.1");
        assert_eq!(merged[0].status, AttendanceStatus::Present);
        assert_eq!(merged[0].overtime, dec("3"));
    }

    #[test]
    fn test_empty_roster_gives_empty_sheet() {
        let prior = vec![create_prior("1", "Ana", AttendanceStatus::Present, "0")];
        assert!(merge_day_snapshot(&[], &prior, "127.0.0.1").is_empty());
    }
}
