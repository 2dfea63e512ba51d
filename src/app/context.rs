//! Application context for the attendance engine.
//!
//! [`AppContext`] owns the record store and the configuration and exposes
//! every user-facing operation. Each operation reloads what it needs from
//! the store, so two contexts over the same directory see each other's
//! saved changes.

use std::path::{Path, PathBuf};

use chrono::{NaiveDate, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    MonthlyAttendance, aggregate_month, business_days_in_month, compute_salaries,
    merge_day_snapshot,
};
use crate::config::AppConfig;
use crate::error::{EngineError, EngineResult};
use crate::export::export_csv;
use crate::host::host_address;
use crate::models::{AttendanceRecord, Employee, EmployeeForm, SalaryReport, SalaryResult, YearMonth};
use crate::store::{JsonFileStore, Loaded, RecordStore};

use super::day_sheet::DaySheet;
use super::roster;

/// Owns the store and configuration and runs every engine operation.
///
/// # Example
///
/// ```no_run
/// use attendance_engine::app::AppContext;
/// use attendance_engine::config::AppConfig;
/// use attendance_engine::models::YearMonth;
///
/// let context = AppContext::open(AppConfig::with_data_dir("./data"))?;
/// let report = context.salary_report(YearMonth::new(2025, 8)?, None);
/// println!("{} rows, total {}", report.results.len(), report.total_net_pay());
/// # Ok::<(), attendance_engine::error::EngineError>(())
/// ```
#[derive(Debug)]
pub struct AppContext<S: RecordStore> {
    store: S,
    config: AppConfig,
    host_ip: String,
}

impl AppContext<JsonFileStore> {
    /// Opens the JSON file store under the configured data directory.
    ///
    /// The host address is resolved once here and reused as the default
    /// recording address for new attendance rows.
    pub fn open(config: AppConfig) -> EngineResult<Self> {
        let store = JsonFileStore::open(&config.storage.data_dir)?;
        let host_ip = host_address();
        info!(
            data_dir = %config.storage.data_dir.display(),
            host_ip = %host_ip,
            "Opened attendance store"
        );
        Ok(Self::new(store, config, host_ip))
    }
}

impl<S: RecordStore> AppContext<S> {
    /// Creates a context over an existing store.
    pub fn new(store: S, config: AppConfig, host_ip: impl Into<String>) -> Self {
        Self {
            store,
            config,
            host_ip: host_ip.into(),
        }
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The active configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// The default recording address for attendance rows.
    pub fn host_ip(&self) -> &str {
        &self.host_ip
    }

    // ==========================================================================
    // Roster
    // ==========================================================================

    /// Returns the roster in stored order. An unreadable roster reads as empty.
    pub fn list_employees(&self) -> Vec<Employee> {
        match self.store.load_roster() {
            Loaded::Found(roster) => roster,
            Loaded::Missing => Vec::new(),
            Loaded::Corrupt { location, reason } => {
                warn!(location = %location, reason = %reason, "Roster unreadable, treating as empty");
                Vec::new()
            }
        }
    }

    /// Returns employees whose id, name, department or role contains `query`.
    pub fn search_employees(&self, query: &str) -> Vec<Employee> {
        roster::search(&self.list_employees(), query)
    }

    /// Returns the employee with `emp_id`.
    pub fn find_employee(&self, emp_id: &str) -> EngineResult<Employee> {
        self.list_employees()
            .into_iter()
            .find(|e| e.emp_id == emp_id)
            .ok_or_else(|| EngineError::EmployeeNotFound {
                emp_id: emp_id.to_string(),
            })
    }

    /// Validates `form` and appends the employee to the roster.
    pub fn add_employee(&mut self, form: &EmployeeForm) -> EngineResult<Employee> {
        let employee = form.validate()?;
        let mut roster = self.roster_for_update()?;
        roster::insert_employee(&mut roster, employee.clone())?;
        self.store.save_roster(&roster)?;

        info!(emp_id = %employee.emp_id, roster_size = roster.len(), "Added employee");
        Ok(employee)
    }

    /// Validates `form` and replaces the employee with the same id.
    pub fn update_employee(&mut self, form: &EmployeeForm) -> EngineResult<Employee> {
        let employee = form.validate()?;
        let mut roster = self.roster_for_update()?;
        roster::replace_employee(&mut roster, employee.clone())?;
        self.store.save_roster(&roster)?;

        info!(emp_id = %employee.emp_id, "Updated employee");
        Ok(employee)
    }

    /// Removes every listed id in a single save and returns how many were removed.
    ///
    /// When none of the ids are on the roster nothing is written.
    pub fn delete_employees<T: AsRef<str>>(&mut self, ids: &[T]) -> EngineResult<usize> {
        let mut roster = self.roster_for_update()?;
        let removed = roster::remove_employees(&mut roster, ids);
        if removed > 0 {
            self.store.save_roster(&roster)?;
        }

        info!(requested = ids.len(), removed, "Deleted employees");
        Ok(removed)
    }

    /// Loads the roster for a mutation. A damaged roster is refused rather
    /// than overwritten.
    fn roster_for_update(&self) -> EngineResult<Vec<Employee>> {
        match self.store.load_roster() {
            Loaded::Found(roster) => Ok(roster),
            Loaded::Missing => Ok(Vec::new()),
            Loaded::Corrupt { location, reason } => {
                warn!(location = %location, reason = %reason, "Refusing to modify unreadable roster");
                Err(EngineError::Storage {
                    path: location,
                    message: format!("roster is unreadable: {}", reason),
                })
            }
        }
    }

    // ==========================================================================
    // Attendance
    // ==========================================================================

    /// Returns the rows saved for `date`, or none if the day was never saved.
    pub fn day_records(&self, date: NaiveDate) -> Vec<AttendanceRecord> {
        match self.store.load_day_attendance(date) {
            Loaded::Found(records) => records,
            Loaded::Missing => Vec::new(),
            Loaded::Corrupt { location, reason } => {
                warn!(date = %date, location = %location, reason = %reason, "Day unreadable, treating as empty");
                Vec::new()
            }
        }
    }

    /// Builds the editable sheet for `date` from the roster and saved rows.
    pub fn open_day(&self, date: NaiveDate) -> DaySheet {
        let rows = merge_day_snapshot(&self.list_employees(), &self.day_records(date), &self.host_ip);
        DaySheet::new(date, rows, self.host_ip.clone())
    }

    /// Replaces the saved snapshot for the sheet's day with its rows.
    pub fn save_day(&mut self, sheet: &DaySheet) -> EngineResult<()> {
        self.store.save_day_attendance(sheet.date(), sheet.rows())?;

        let present = sheet.rows().iter().filter(|r| r.status.is_present()).count();
        info!(
            date = %sheet.date(),
            rows = sheet.rows().len(),
            present,
            "Saved attendance"
        );
        Ok(())
    }

    // ==========================================================================
    // Salary
    // ==========================================================================

    /// Aggregates the month's saved days per employee.
    pub fn aggregate_month(&self, month: YearMonth) -> MonthlyAttendance {
        aggregate_month(&self.store, month)
    }

    /// Computes each selected employee's salary for `month`.
    pub fn compute_salaries(&self, month: YearMonth, filter: Option<&str>) -> Vec<SalaryResult> {
        compute_salaries(
            &self.store,
            month,
            filter,
            self.config.payroll.standard_monthly_hours,
        )
    }

    /// Computes a salary run and stamps it with an id and timestamp.
    pub fn salary_report(&self, month: YearMonth, filter: Option<&str>) -> SalaryReport {
        let report_id = Uuid::new_v4();
        let results = self.compute_salaries(month, filter);

        let report = SalaryReport {
            report_id,
            generated_at: Utc::now(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            month,
            working_days: business_days_in_month(month),
            results,
        };

        info!(
            report_id = %report_id,
            month = %month,
            employees = report.results.len(),
            total_net_pay = %report.total_net_pay(),
            "Computed salary run"
        );
        report
    }

    // ==========================================================================
    // Export
    // ==========================================================================

    /// Writes the roster to `path`.
    pub fn export_employees(&self, path: &Path) -> EngineResult<usize> {
        export_csv(path, "employees", &self.list_employees())
    }

    /// Writes the saved rows for `date` to `path`.
    pub fn export_day(&self, date: NaiveDate, path: &Path) -> EngineResult<usize> {
        export_csv(path, &format!("attendance for {}", date), &self.day_records(date))
    }

    /// Writes a salary run to `path`, or to the default location for its month.
    ///
    /// Returns the path written.
    pub fn export_salaries(&self, report: &SalaryReport, path: Option<&Path>) -> EngineResult<PathBuf> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => self.default_salary_export_path(report.month),
        };
        export_csv(&path, "salary results", &report.results)?;
        Ok(path)
    }

    /// The default salary export location: `<data_dir>/salary/salary-YYYY-MM.csv`.
    pub fn default_salary_export_path(&self, month: YearMonth) -> PathBuf {
        self.config.salary_dir().join(format!("salary-{}.csv", month))
    }
}
