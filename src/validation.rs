//! Field validators.
//!
//! Pure checks on the text a user types into the roster and attendance
//! forms. The `is_*` functions answer yes or no; the `parse_*` functions
//! convert and report a descriptive error through the caller-supplied
//! error constructor.

use std::str::FromStr;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};

/// Earliest year accepted by [`is_valid_month`].
pub const MIN_YEAR: i32 = 1900;

/// Latest year accepted by [`is_valid_month`].
pub const MAX_YEAR: i32 = 3000;

/// Largest salary or hour count accepted by [`parse_non_negative_decimal`]
/// (one trillion).
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(3_567_587_328, 232, 0, false, 0);

static DATE_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("date pattern compiles"));

static MONTH_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}$").expect("month pattern compiles"));

static EMAIL_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern compiles")
});

/// Returns true iff `s` is a real calendar date in `YYYY-MM-DD` form.
///
/// # Example
///
/// ```
/// use attendance_engine::validation::is_valid_date;
///
/// assert!(is_valid_date("2024-02-29"));
/// assert!(!is_valid_date("2025-02-29"));
/// assert!(!is_valid_date("2025-13-01"));
/// assert!(!is_valid_date("2025-8-1"));
/// assert!(!is_valid_date("notadate"));
/// ```
pub fn is_valid_date(s: &str) -> bool {
    DATE_SHAPE.is_match(s) && NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()
}

/// Returns true iff `s` is `YYYY-MM` with month 1–12 and year 1900–3000.
pub fn is_valid_month(s: &str) -> bool {
    if !MONTH_SHAPE.is_match(s) {
        return false;
    }

    let Some((year, month)) = s.split_once('-') else {
        return false;
    };

    match (year.parse::<i32>(), month.parse::<u32>()) {
        (Ok(year), Ok(month)) => (1..=12).contains(&month) && (MIN_YEAR..=MAX_YEAR).contains(&year),
        _ => false,
    }
}

/// Returns true iff `s` looks like `local@domain.tld`.
///
/// This is a shape check only, not RFC 5322 validation.
pub fn is_valid_email(s: &str) -> bool {
    EMAIL_SHAPE.is_match(s)
}

/// Returns true iff `s` is non-empty and made of ASCII digits only.
pub fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Parses a `YYYY-MM-DD` string into a date.
///
/// Surrounding whitespace is ignored.
pub fn parse_date(s: &str) -> EngineResult<NaiveDate> {
    let value = s.trim();
    if !is_valid_date(value) {
        return Err(EngineError::InvalidDate {
            value: s.to_string(),
        });
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| EngineError::InvalidDate {
        value: s.to_string(),
    })
}

/// Parses a non-negative decimal such as a salary or an hour count.
///
/// On failure the `on_error` constructor receives a human-readable message
/// and builds the error variant that fits the caller's form.
///
/// # Example
///
/// ```
/// use attendance_engine::error::EngineError;
/// use attendance_engine::validation::parse_non_negative_decimal;
/// use rust_decimal::Decimal;
///
/// let invalid = |message: String| EngineError::InvalidAttendance {
///     field: "overtime".to_string(),
///     message,
/// };
///
/// assert_eq!(parse_non_negative_decimal("2.5", invalid).unwrap(), Decimal::new(25, 1));
/// assert!(parse_non_negative_decimal("-1", invalid).is_err());
/// assert!(parse_non_negative_decimal("two", invalid).is_err());
/// ```
pub fn parse_non_negative_decimal<F>(s: &str, on_error: F) -> EngineResult<Decimal>
where
    F: Fn(String) -> EngineError,
{
    let value = s.trim();
    if value.is_empty() {
        return Err(on_error("a number is required".to_string()));
    }

    let parsed = Decimal::from_str(value)
        .map_err(|_| on_error(format!("'{}' is not a number", value)))?;

    if parsed.is_zero() {
        return Ok(Decimal::ZERO);
    }
    if parsed.is_sign_negative() {
        return Err(on_error(format!("'{}' must not be negative", value)));
    }
    if parsed > MAX_AMOUNT {
        return Err(on_error(format!("'{}' exceeds the maximum of {}", value, MAX_AMOUNT)));
    }

    Ok(parsed)
}
