//! Calendar month model.
//!
//! This module contains the [`YearMonth`] type that identifies the month a
//! salary run or aggregation covers.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::validation::{MAX_YEAR, MIN_YEAR, is_valid_month};

/// A calendar month within the supported year range (1900–3000).
///
/// Only valid months can be constructed, so every `YearMonth` has a real
/// first day. It serializes as the canonical `YYYY-MM` string.
///
/// # Example
///
/// ```
/// use attendance_engine::models::YearMonth;
///
/// let august: YearMonth = "2025-08".parse().unwrap();
/// assert_eq!(august.year(), 2025);
/// assert_eq!(august.month(), 8);
/// assert_eq!(august.to_string(), "2025-08");
/// assert_eq!(august.days().count(), 31);
///
/// assert!("2025-13".parse::<YearMonth>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct YearMonth {
    first_day: NaiveDate,
}

impl YearMonth {
    /// Creates a month from its numeric parts.
    ///
    /// Returns [`EngineError::InvalidMonth`] when the month is outside 1–12
    /// or the year is outside 1900–3000.
    pub fn new(year: i32, month: u32) -> EngineResult<Self> {
        let invalid = || EngineError::InvalidMonth {
            value: format!("{:04}-{:02}", year, month),
        };

        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(invalid());
        }

        NaiveDate::from_ymd_opt(year, month, 1)
            .map(|first_day| Self { first_day })
            .ok_or_else(invalid)
    }

    /// Returns the month containing the given date.
    pub fn containing(date: NaiveDate) -> EngineResult<Self> {
        Self::new(date.year(), date.month())
    }

    /// The four-digit year.
    pub fn year(&self) -> i32 {
        self.first_day.year()
    }

    /// The month number, 1 through 12.
    pub fn month(&self) -> u32 {
        self.first_day.month()
    }

    /// The first calendar day of the month.
    pub fn first_day(&self) -> NaiveDate {
        self.first_day
    }

    /// Iterates every calendar day of the month in ascending order.
    ///
    /// Yields 28 to 31 dates depending on the month and leap-year rule.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        let month = self.month();
        self.first_day
            .iter_days()
            .take_while(move |day| day.month() == month)
    }

    /// Returns true if the date falls within this month.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl FromStr for YearMonth {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        let invalid = || EngineError::InvalidMonth {
            value: s.to_string(),
        };

        if !is_valid_month(value) {
            return Err(invalid());
        }

        let (year, month) = value.split_once('-').ok_or_else(invalid)?;
        let year = year.parse::<i32>().map_err(|_| invalid())?;
        let month = month.parse::<u32>().map_err(|_| invalid())?;
        Self::new(year, month)
    }
}

impl TryFrom<String> for YearMonth {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<YearMonth> for String {
    fn from(value: YearMonth) -> Self {
        value.to_string()
    }
}
