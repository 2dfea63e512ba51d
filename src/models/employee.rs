//! Employee model and the form it is validated from.
//!
//! This module defines the [`Employee`] roster record and [`EmployeeForm`],
//! the raw text a user enters before it is checked and converted.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::validation::{is_digits, is_valid_email, parse_date, parse_non_negative_decimal};

/// Represents an employee on the roster.
///
/// `emp_id` is the immutable key: at most one roster entry carries a given
/// id. Optional text fields are stored as `None` rather than empty strings,
/// and empty strings found in stored files read back as `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique, digits-only identifier.
    pub emp_id: String,
    /// Display name, never empty.
    pub name: String,
    /// Department the employee belongs to.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "empty_as_none"
    )]
    pub department: Option<String>,
    /// Job title.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "empty_as_none"
    )]
    pub role: Option<String>,
    /// Monthly gross salary.
    #[serde(default)]
    pub base_salary: Decimal,
    /// First day of employment.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "empty_date_as_none"
    )]
    pub join_date: Option<NaiveDate>,
    /// Contact phone number, digits only.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "empty_as_none"
    )]
    pub phone: Option<String>,
    /// Contact email address.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "empty_as_none"
    )]
    pub email: Option<String>,
}

impl Employee {
    /// Creates an employee with only an id and name set.
    pub fn new(emp_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            emp_id: emp_id.into(),
            name: name.into(),
            department: None,
            role: None,
            base_salary: Decimal::ZERO,
            join_date: None,
            phone: None,
            email: None,
        }
    }

    /// Returns true if `query` appears, ignoring case, in the id, name,
    /// department or role.
    ///
    /// # Examples
    ///
    /// ```
    /// use attendance_engine::models::Employee;
    /// use rust_decimal::Decimal;
    ///
    /// let employee = Employee {
    ///     emp_id: "1001".to_string(),
    ///     name: "Priya Nair".to_string(),
    ///     department: Some("Finance".to_string()),
    ///     role: None,
    ///     base_salary: Decimal::new(42000, 0),
    ///     join_date: None,
    ///     phone: None,
    ///     email: None,
    /// };
    /// assert!(employee.matches("fin"));
    /// assert!(employee.matches("PRIYA"));
    /// assert!(!employee.matches("sales"));
    /// ```
    pub fn matches(&self, query: &str) -> bool {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }

        [
            Some(self.emp_id.as_str()),
            Some(self.name.as_str()),
            self.department.as_deref(),
            self.role.as_deref(),
        ]
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&needle))
    }
}

/// Raw employee input as typed into a form.
///
/// Every field is free text. [`EmployeeForm::validate`] trims the fields,
/// checks them in a fixed order and reports the first problem found.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmployeeForm {
    /// Employee id text.
    pub emp_id: String,
    /// Name text.
    pub name: String,
    /// Department text, may be blank.
    pub department: String,
    /// Role text, may be blank.
    pub role: String,
    /// Base salary text.
    pub base_salary: String,
    /// Join date text, blank or `YYYY-MM-DD`.
    pub join_date: String,
    /// Phone text, blank or digits.
    pub phone: String,
    /// Email text, blank or `local@domain.tld`.
    pub email: String,
}

impl EmployeeForm {
    /// Validates the form and converts it into an [`Employee`].
    ///
    /// Checks, in order: id present, id numeric, name present, base salary
    /// a non-negative number, then join date, email and phone when given.
    ///
    /// # Example
    ///
    /// ```
    /// use attendance_engine::models::EmployeeForm;
    ///
    /// let form = EmployeeForm {
    ///     emp_id: "1001".to_string(),
    ///     name: "Priya Nair".to_string(),
    ///     base_salary: "42000".to_string(),
    ///     join_date: "2024-03-01".to_string(),
    ///     ..EmployeeForm::default()
    /// };
    /// let employee = form.validate().unwrap();
    /// assert_eq!(employee.emp_id, "1001");
    /// assert!(employee.department.is_none());
    ///
    /// let bad = EmployeeForm { emp_id: "A1".to_string(), ..EmployeeForm::default() };
    /// assert!(bad.validate().is_err());
    /// ```
    pub fn validate(&self) -> EngineResult<Employee> {
        let emp_id = self.emp_id.trim();
        if emp_id.is_empty() {
            return Err(invalid("emp_id", "employee id is required"));
        }
        if !is_digits(emp_id) {
            return Err(invalid("emp_id", "employee id must be numeric"));
        }

        let name = self.name.trim();
        if name.is_empty() {
            return Err(invalid("name", "name is required"));
        }

        let base_salary = parse_non_negative_decimal(&self.base_salary, |message| {
            invalid(
                "base_salary",
                &format!("base salary must be a non-negative number: {}", message),
            )
        })?;

        let join_date = match optional(&self.join_date) {
            Some(text) => Some(
                parse_date(&text).map_err(|_| invalid("join_date", "join date must be YYYY-MM-DD"))?,
            ),
            None => None,
        };

        let email = optional(&self.email);
        if let Some(email) = &email {
            if !is_valid_email(email) {
                return Err(invalid("email", "email format is invalid"));
            }
        }

        let phone = optional(&self.phone);
        if let Some(phone) = &phone {
            if !is_digits(phone) {
                return Err(invalid("phone", "phone must contain digits only"));
            }
        }

        Ok(Employee {
            emp_id: emp_id.to_string(),
            name: name.to_string(),
            department: optional(&self.department),
            role: optional(&self.role),
            base_salary,
            join_date,
            phone,
            email,
        })
    }
}

impl From<&Employee> for EmployeeForm {
    fn from(employee: &Employee) -> Self {
        Self {
            emp_id: employee.emp_id.clone(),
            name: employee.name.clone(),
            department: employee.department.clone().unwrap_or_default(),
            role: employee.role.clone().unwrap_or_default(),
            base_salary: employee.base_salary.to_string(),
            join_date: employee
                .join_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            phone: employee.phone.clone().unwrap_or_default(),
            email: employee.email.clone().unwrap_or_default(),
        }
    }
}

fn invalid(field: &str, message: &str) -> EngineError {
    EngineError::InvalidEmployee {
        field: field.to_string(),
        message: message.to_string(),
    }
}

fn optional(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(optional))
}

fn empty_date_as_none<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().and_then(optional) {
        Some(text) => parse_date(&text)
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}
