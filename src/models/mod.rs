//! Core data models for the attendance engine.
//!
//! This module contains the stored records (employees and attendance rows)
//! and the derived monthly and salary types.

mod attendance;
mod employee;
mod period;
mod salary;

pub use attendance::{AttendanceRecord, AttendanceStatus};
pub use employee::{Employee, EmployeeForm};
pub use period::YearMonth;
pub use salary::{MonthlyAggregate, PayBreakdown, SalaryReport, SalaryResult};
