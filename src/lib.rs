//! Employee Attendance and Salary Engine
//!
//! This crate keeps an employee roster and daily attendance snapshots in
//! JSON files, aggregates a month of attendance per employee, and computes
//! prorated monthly salaries with overtime. Results can be exported as CSV.

#![warn(missing_docs)]

pub mod app;
pub mod calculation;
pub mod config;
pub mod error;
pub mod export;
pub mod host;
pub mod models;
pub mod store;
pub mod validation;
