//! Calendar month used to bucket tasks for the monthly breakdown.

use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

static MONTH_KEY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})-(\d{2})$").expect("valid month key regex"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeriodParseError {
    /// Input is not shaped like `YYYY-MM`.
    Malformed(String),
    MonthOutOfRange(u32),
    YearOutOfRange(i32),
}

impl Display for PeriodParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed(value) => write!(f, "expected YYYY-MM, got `{value}`"),
            Self::MonthOutOfRange(month) => write!(f, "month must be 1..=12, got {month}"),
            Self::YearOutOfRange(year) => write!(f, "year must be 0..=9999, got {year}"),
        }
    }
}

impl Error for PeriodParseError {}

/// A validated `(year, month)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MonthPeriod {
    year: i32,
    month: u32,
}

impl MonthPeriod {
    pub fn new(year: i32, month: u32) -> Result<Self, PeriodParseError> {
        if !(1..=12).contains(&month) {
            return Err(PeriodParseError::MonthOutOfRange(month));
        }
        // Dates are stored as four-digit years; anything else cannot match.
        if !(0..=9999).contains(&year) {
            return Err(PeriodParseError::YearOutOfRange(year));
        }
        Ok(Self { year, month })
    }

    /// Month containing `date`.
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// `YYYY-MM` prefix that task start dates in this month begin with.
    pub fn key(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }

    /// Prefix match against a `YYYY-MM-DD` start date.
    pub fn contains_date_text(&self, date: &str) -> bool {
        date.starts_with(&self.key())
    }
}

impl FromStr for MonthPeriod {
    type Err = PeriodParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        let captures = MONTH_KEY_RE
            .captures(trimmed)
            .ok_or_else(|| PeriodParseError::Malformed(trimmed.to_string()))?;
        let year = captures[1]
            .parse::<i32>()
            .map_err(|_| PeriodParseError::Malformed(trimmed.to_string()))?;
        let month = captures[2]
            .parse::<u32>()
            .map_err(|_| PeriodParseError::Malformed(trimmed.to_string()))?;
        Self::new(year, month)
    }
}

impl Display for MonthPeriod {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.key())
    }
}
