//! In-memory roster edits.
//!
//! These functions change a loaded roster without touching storage. The
//! caller saves the result in one write once an edit has succeeded, so a
//! failed edit never reaches disk.

use std::collections::HashSet;

use crate::error::{EngineError, EngineResult};
use crate::models::Employee;

/// Appends `employee`, rejecting an id already on the roster.
pub fn insert_employee(roster: &mut Vec<Employee>, employee: Employee) -> EngineResult<()> {
    if roster.iter().any(|e| e.emp_id == employee.emp_id) {
        return Err(EngineError::DuplicateEmployee {
            emp_id: employee.emp_id,
        });
    }
    roster.push(employee);
    Ok(())
}

/// Replaces the entry with the same id, keeping its position.
pub fn replace_employee(roster: &mut [Employee], employee: Employee) -> EngineResult<()> {
    match roster.iter_mut().find(|e| e.emp_id == employee.emp_id) {
        Some(slot) => {
            *slot = employee;
            Ok(())
        }
        None => Err(EngineError::EmployeeNotFound {
            emp_id: employee.emp_id,
        }),
    }
}

/// Removes every entry whose id is listed and returns how many were removed.
///
/// Ids not on the roster are ignored.
pub fn remove_employees<S: AsRef<str>>(roster: &mut Vec<Employee>, ids: &[S]) -> usize {
    let doomed: HashSet<&str> = ids.iter().map(AsRef::as_ref).collect();
    let before = roster.len();
    roster.retain(|e| !doomed.contains(e.emp_id.as_str()));
    before - roster.len()
}

/// Returns the entries matching `query`, in roster order.
///
/// See [`Employee::matches`] for the matching rule.
pub fn search(roster: &[Employee], query: &str) -> Vec<Employee> {
    roster.iter().filter(|e| e.matches(query)).cloned().collect()
}
