//! CSV export of the roster, day snapshots and salary runs.
//!
//! Each exportable type implements [`CsvRow`], which pairs a fixed header
//! line with the fields of one row. Absent optional fields are written as
//! empty strings.

use std::fs;
use std::path::Path;

use rust_decimal::{Decimal, RoundingStrategy};
use tracing::info;

use crate::error::{EngineError, EngineResult};
use crate::models::{AttendanceRecord, Employee, SalaryResult};

/// Headers of the employee roster export.
pub const EMPLOYEE_HEADERS: [&str; 8] = [
    "Emp Id",
    "Name",
    "Department",
    "Role",
    "Base Salary",
    "Join Date",
    "Phone",
    "Email",
];

/// Headers of a day snapshot export.
pub const ATTENDANCE_HEADERS: [&str; 5] = ["emp_id", "name", "status", "ip", "overtime"];

/// Headers of a salary run export.
pub const SALARY_HEADERS: [&str; 9] = [
    "Emp_Id",
    "Name",
    "Month",
    "Base Salary",
    "Working Days",
    "Present",
    "Absent",
    "Overtime Hours",
    "Net Pay",
];

/// A value that can be written as one CSV row.
pub trait CsvRow {
    /// The header line, in column order.
    fn headers() -> &'static [&'static str];

    /// The row's fields, in the same order as [`CsvRow::headers`].
    fn fields(&self) -> Vec<String>;
}

impl CsvRow for Employee {
    fn headers() -> &'static [&'static str] {
        &EMPLOYEE_HEADERS
    }

    fn fields(&self) -> Vec<String> {
        vec![
            self.emp_id.clone(),
            self.name.clone(),
            self.department.clone().unwrap_or_default(),
            self.role.clone().unwrap_or_default(),
            self.base_salary.normalize().to_string(),
            self.join_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            self.phone.clone().unwrap_or_default(),
            self.email.clone().unwrap_or_default(),
        ]
    }
}

impl CsvRow for AttendanceRecord {
    fn headers() -> &'static [&'static str] {
        &ATTENDANCE_HEADERS
    }

    fn fields(&self) -> Vec<String> {
        vec![
            self.emp_id.clone(),
            self.name.clone(),
            self.status.code().to_string(),
            self.ip.clone(),
            self.overtime.normalize().to_string(),
        ]
    }
}

impl CsvRow for SalaryResult {
    fn headers() -> &'static [&'static str] {
        &SALARY_HEADERS
    }

    fn fields(&self) -> Vec<String> {
        vec![
            self.emp_id.clone(),
            self.name.clone(),
            self.month.to_string(),
            money(self.base_salary),
            self.working_days.to_string(),
            self.present_days.to_string(),
            self.absent_days.to_string(),
            money(self.overtime_hours),
            money(self.net_pay),
        ]
    }
}

/// Formats a decimal with exactly two places, rounding half away from zero.
///
/// # Example
///
/// ```
/// use attendance_engine::export::money;
/// use rust_decimal::Decimal;
///
/// assert_eq!(money(Decimal::new(200, 0)), "200.00");
/// assert_eq!(money(Decimal::new(3333333, 4)), "333.33");
/// assert_eq!(money(Decimal::new(1005, 3)), "1.01");
/// ```
pub fn money(value: Decimal) -> String {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded.to_string()
}

/// Writes `rows` to a CSV file at `path`, replacing any existing file.
///
/// Parent directories are created as needed. `what` names the collection in
/// the error returned when `rows` is empty; nothing is written in that case.
///
/// # Returns
///
/// The number of data rows written.
pub fn export_csv<R: CsvRow>(path: &Path, what: &str, rows: &[R]) -> EngineResult<usize> {
    if rows.is_empty() {
        return Err(EngineError::NothingToExport {
            what: what.to_string(),
        });
    }

    let export_error = |message: String| EngineError::Export {
        path: path.display().to_string(),
        message,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| export_error(e.to_string()))?;
    }

    let mut writer = csv::Writer::from_path(path).map_err(|e| export_error(e.to_string()))?;
    writer
        .write_record(R::headers())
        .map_err(|e| export_error(e.to_string()))?;
    for row in rows {
        writer
            .write_record(row.fields())
            .map_err(|e| export_error(e.to_string()))?;
    }
    writer.flush().map_err(|e| export_error(e.to_string()))?;

    info!(path = %path.display(), rows = rows.len(), what, "Exported CSV");
    Ok(rows.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AttendanceStatus, YearMonth};
    use chrono::NaiveDate;
    use std::str::FromStr;
    use tempfile::TempDir;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_test_employee() -> Employee {
        Employee {
            emp_id: "1001".to_string(),
            name: "Priya Nair".to_string(),
            department: Some("Finance".to_string()),
            role: None,
            base_salary: dec("42000.00"),
            join_date: NaiveDate::from_ymd_opt(2023, 4, 3),
            phone: Some("0412345678".to_string()),
            email: None,
        }
    }

    fn create_salary_result() -> SalaryResult {
        SalaryResult {
            emp_id: "1001".to_string(),
            name: "Priya Nair".to_string(),
            month: YearMonth::new(2025, 8).unwrap(),
            base_salary: dec("1000"),
            working_days: 21,
            present_days: 7,
            absent_days: 14,
            overtime_hours: dec("1.5"),
            net_pay: dec("1000") * dec("7") / dec("21"),
        }
    }

    fn read_lines(path: &Path) -> Vec<String> {
        fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_employee_fields_blank_for_missing_values() {
        let fields = create_test_employee().fields();
        assert_eq!(
            fields,
            vec!["1001", "Priya Nair", "Finance", "", "42000", "2023-04-03", "0412345678", ""]
        );
    }

    #[test]
    fn test_attendance_fields() {
        let record = AttendanceRecord {
            emp_id: "7".to_string(),
            name: "Bo".to_string(),
            status: AttendanceStatus::Present,
            ip: "10.0.0.2".to_string(),
            overtime: dec("2.50"),
        };
        assert_eq!(record.fields(), vec!["7", "Bo", "P", "10.0.0.2", "2.5"]);
    }

    #[test]
    fn test_salary_fields_use_two_decimals() {
        let fields = create_salary_result().fields();
        assert_eq!(
            fields,
            vec!["1001", "Priya Nair", "2025-08", "1000.00", "21", "7", "14", "1.50", "333.33"]
        );
    }

    #[test]
    fn test_export_writes_headers_then_rows() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("salary-2025-08.csv");

        let written = export_csv(&path, "salary results", &[create_salary_result()]).unwrap();

        assert_eq!(written, 1);
        let lines = read_lines(&path);
        assert_eq!(
            lines[0],
            "Emp_Id,Name,Month,Base Salary,Working Days,Present,Absent,Overtime Hours,Net Pay"
        );
        assert_eq!(lines[1], "1001,Priya Nair,2025-08,1000.00,21,7,14,1.50,333.33");
    }

    #[test]
    fn test_export_quotes_fields_with_commas() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("employees.csv");
        let mut employee = create_test_employee();
        employee.name = "Nair, Priya".to_string();

        export_csv(&path, "employees", &[employee]).unwrap();

        assert!(read_lines(&path)[1].starts_with("1001,\"Nair, Priya\",Finance"));
    }

    #[test]
    fn test_export_empty_collection_fails_without_writing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("employees.csv");

        let result = export_csv::<Employee>(&path, "employees", &[]);

        match result {
            Err(EngineError::NothingToExport { what }) => assert_eq!(what, "employees"),
            other => panic!("Expected NothingToExport, got {:?}", other),
        }
        assert!(!path.exists());
    }

    #[test]
    fn test_money_rounding() {
        assert_eq!(money(dec("0")), "0.00");
        assert_eq!(money(dec("18000")), "18000.00");
        assert_eq!(money(dec("2.345")), "2.35");
        assert_eq!(money(dec("2.344")), "2.34");
    }
}
