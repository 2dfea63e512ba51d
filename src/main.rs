//! Command-line front end for the attendance engine.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tracing::error;
use tracing_subscriber::EnvFilter;

use attendance_engine::app::{AppContext, AttendanceEdit, LoginGate};
use attendance_engine::config::{AppConfig, ConfigLoader};
use attendance_engine::error::EngineResult;
use attendance_engine::export::money;
use attendance_engine::models::{AttendanceStatus, Employee, EmployeeForm, YearMonth};
use attendance_engine::store::JsonFileStore;
use attendance_engine::validation::parse_date;

#[derive(Debug, Parser)]
#[command(name = "attendance-engine", version, about = "Employee attendance and monthly salary engine")]
struct Cli {
    /// YAML configuration file. Defaults apply when omitted.
    #[arg(long, global = true, env = "ATTENDANCE_CONFIG")]
    config: Option<PathBuf>,

    /// Login user name.
    #[arg(long, global = true, env = "ATTENDANCE_USERNAME", default_value = "")]
    username: String,

    /// Login password.
    #[arg(long, global = true, env = "ATTENDANCE_PASSWORD", default_value = "", hide_env_values = true)]
    password: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Manage the employee roster.
    #[command(subcommand)]
    Employee(EmployeeCommand),
    /// View and record daily attendance.
    #[command(subcommand)]
    Attendance(AttendanceCommand),
    /// Compute salaries for a month (YYYY-MM).
    Salary {
        /// Month to compute, as YYYY-MM.
        month: String,
        /// Only compute this employee.
        #[arg(long)]
        emp_id: Option<String>,
        /// Write the results as CSV. Without a path, writes to the salary directory.
        #[arg(long, num_args = 0..=1)]
        export: Option<Option<PathBuf>>,
    },
}

#[derive(Debug, Subcommand)]
enum EmployeeCommand {
    /// List every employee.
    List,
    /// Find employees by id, name, department or role.
    Search { query: String },
    /// Add a new employee.
    Add(EmployeeFields),
    /// Change fields of an existing employee.
    Update(EmployeeFields),
    /// Delete employees by id.
    Delete {
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Export the roster as CSV.
    Export { path: PathBuf },
}

#[derive(Debug, Args)]
struct EmployeeFields {
    /// Employee id (digits).
    #[arg(long)]
    id: String,
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    department: Option<String>,
    #[arg(long)]
    role: Option<String>,
    /// Monthly base salary.
    #[arg(long)]
    base_salary: Option<String>,
    /// Join date, as YYYY-MM-DD.
    #[arg(long)]
    join_date: Option<String>,
    #[arg(long)]
    phone: Option<String>,
    #[arg(long)]
    email: Option<String>,
}

impl EmployeeFields {
    /// Overlays the given fields onto `form`.
    fn apply(self, mut form: EmployeeForm) -> EmployeeForm {
        form.emp_id = self.id;
        let overlay = [
            (self.name, &mut form.name),
            (self.department, &mut form.department),
            (self.role, &mut form.role),
            (self.base_salary, &mut form.base_salary),
            (self.join_date, &mut form.join_date),
            (self.phone, &mut form.phone),
            (self.email, &mut form.email),
        ];
        for (value, slot) in overlay {
            if let Some(value) = value {
                *slot = value;
            }
        }
        form
    }
}

#[derive(Debug, Subcommand)]
enum AttendanceCommand {
    /// Show the sheet for a day, merged with the current roster.
    Show { date: String },
    /// Record one employee's attendance for a day.
    Set {
        date: String,
        emp_id: String,
        /// Status; only the first letter counts (P or A).
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        ip: Option<String>,
        /// Overtime hours.
        #[arg(long)]
        overtime: Option<String>,
    },
    /// Mark every employee present or absent for a day.
    MarkAll { date: String, status: String },
    /// Export the saved rows for a day as CSV.
    Export { date: String, path: PathBuf },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Command failed");
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> EngineResult<()> {
    let config = match &cli.config {
        Some(path) => ConfigLoader::load(path)?,
        None => AppConfig::default(),
    };
    LoginGate::new(config.login.clone()).verify(&cli.username, &cli.password)?;

    let mut context = AppContext::open(config)?;
    match cli.command {
        Command::Employee(command) => run_employee(&mut context, command),
        Command::Attendance(command) => run_attendance(&mut context, command),
        Command::Salary {
            month,
            emp_id,
            export,
        } => run_salary(&context, &month, emp_id.as_deref(), export),
    }
}

fn run_employee(context: &mut AppContext<JsonFileStore>, command: EmployeeCommand) -> EngineResult<()> {
    match command {
        EmployeeCommand::List => print_employees(&context.list_employees()),
        EmployeeCommand::Search { query } => print_employees(&context.search_employees(&query)),
        EmployeeCommand::Add(fields) => {
            let employee = context.add_employee(&fields.apply(EmployeeForm::default()))?;
            println!("Added employee {} ({})", employee.emp_id, employee.name);
        }
        EmployeeCommand::Update(fields) => {
            let current = context.find_employee(&fields.id)?;
            let employee = context.update_employee(&fields.apply(EmployeeForm::from(&current)))?;
            println!("Updated employee {} ({})", employee.emp_id, employee.name);
        }
        EmployeeCommand::Delete { ids } => {
            let removed = context.delete_employees(ids.as_slice())?;
            println!("Deleted {} employee(s)", removed);
        }
        EmployeeCommand::Export { path } => {
            let rows = context.export_employees(&path)?;
            print_exported(&path, rows);
        }
    }
    Ok(())
}

fn run_attendance(
    context: &mut AppContext<JsonFileStore>,
    command: AttendanceCommand,
) -> EngineResult<()> {
    match command {
        AttendanceCommand::Show { date } => {
            let sheet = context.open_day(parse_date(&date)?);
            println!("{:<10} {:<24} {:<6} {:<16} {:>8}", "Emp Id", "Name", "Status", "IP", "Overtime");
            for row in sheet.rows() {
                println!(
                    "{:<10} {:<24} {:<6} {:<16} {:>8}",
                    row.emp_id,
                    row.name,
                    row.status.code(),
                    row.ip,
                    row.overtime.normalize().to_string()
                );
            }
        }
        AttendanceCommand::Set {
            date,
            emp_id,
            status,
            ip,
            overtime,
        } => {
            let mut sheet = context.open_day(parse_date(&date)?);
            let current = sheet
                .rows()
                .iter()
                .find(|r| r.emp_id == emp_id)
                .cloned();
            let edit = AttendanceEdit {
                status: status
                    .or_else(|| current.as_ref().map(|r| r.status.code().to_string()))
                    .unwrap_or_default(),
                ip: ip
                    .or_else(|| current.as_ref().map(|r| r.ip.clone()))
                    .unwrap_or_default(),
                overtime: overtime
                    .or_else(|| current.as_ref().map(|r| r.overtime.to_string()))
                    .unwrap_or_else(|| "0".to_string()),
            };
            sheet.update(&emp_id, &edit)?;
            context.save_day(&sheet)?;
            println!("Saved attendance for {} on {}", emp_id, sheet.date());
        }
        AttendanceCommand::MarkAll { date, status } => {
            let mut sheet = context.open_day(parse_date(&date)?);
            let status = AttendanceStatus::from_code(&status);
            sheet.mark_all(status);
            context.save_day(&sheet)?;
            println!("Marked {} employee(s) {} on {}", sheet.rows().len(), status, sheet.date());
        }
        AttendanceCommand::Export { date, path } => {
            let rows = context.export_day(parse_date(&date)?, &path)?;
            print_exported(&path, rows);
        }
    }
    Ok(())
}

fn run_salary(
    context: &AppContext<JsonFileStore>,
    month: &str,
    emp_id: Option<&str>,
    export: Option<Option<PathBuf>>,
) -> EngineResult<()> {
    let month: YearMonth = month.parse()?;
    let report = context.salary_report(month, emp_id);

    if report.is_empty() {
        println!("No employees or no matching employee id.");
    } else {
        println!(
            "{:<10} {:<24} {:<8} {:>12} {:>8} {:>8} {:>7} {:>9} {:>12}",
            "Emp_Id", "Name", "Month", "Base Salary", "Working", "Present", "Absent", "OT Hours", "Net Pay"
        );
        for row in &report.results {
            println!(
                "{:<10} {:<24} {:<8} {:>12} {:>8} {:>8} {:>7} {:>9} {:>12}",
                row.emp_id,
                row.name,
                row.month,
                money(row.base_salary),
                row.working_days,
                row.present_days,
                row.absent_days,
                money(row.overtime_hours),
                money(row.net_pay)
            );
        }
        println!("Total net pay: {}", money(report.total_net_pay()));
    }

    if let Some(path) = export {
        let written = context.export_salaries(&report, path.as_deref())?;
        print_exported(&written, report.results.len());
    }
    Ok(())
}

fn print_employees(employees: &[Employee]) {
    println!(
        "{:<10} {:<24} {:<16} {:<16} {:>12} {:<10}",
        "Emp Id", "Name", "Department", "Role", "Base Salary", "Join Date"
    );
    for e in employees {
        println!(
            "{:<10} {:<24} {:<16} {:<16} {:>12} {:<10}",
            e.emp_id,
            e.name,
            e.department.as_deref().unwrap_or(""),
            e.role.as_deref().unwrap_or(""),
            money(e.base_salary),
            e.join_date.map(|d| d.to_string()).unwrap_or_default()
        );
    }
}

fn print_exported(path: &Path, rows: usize) {
    println!("Exported {} row(s) to {}", rows, path.display());
}
