//! Calendar date ranges for exports
//!
//! Dates are plain calendar days in `YYYY-MM-DD` form. A [`DateRange`] is
//! inclusive of both ends and must span at least two days (`start < end`).

use super::errors::NdwsError;
use super::result::Result;
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Format accepted for `--start_date` and `--end_date`
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a `YYYY-MM-DD` date, naming `parameter` in the error
pub fn parse_date(parameter: &str, value: &str) -> Result<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return Err(NdwsError::invalid_argument(parameter, "date cannot be empty"));
    }

    // chrono accepts single-digit months and days; the CLI contract does not
    if value.len() != 10 {
        return Err(NdwsError::invalid_argument(
            parameter,
            format!("'{value}' is not a YYYY-MM-DD date"),
        ));
    }

    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|e| {
        NdwsError::invalid_argument(parameter, format!("'{value}' is not a YYYY-MM-DD date ({e})"))
    })
}

/// Inclusive range of calendar days with `start < end`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Creates a new range, rejecting empty or reversed ranges
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use ndws::domain::dates::DateRange;
    ///
    /// let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
    /// let end = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();
    /// assert!(DateRange::new(start, end).is_ok());
    /// assert!(DateRange::new(end, start).is_err());
    /// ```
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start >= end {
            return Err(NdwsError::invalid_argument(
                "start_date",
                format!("start_date ({start}) must be before end_date ({end})"),
            ));
        }
        Ok(Self { start, end })
    }

    /// Parses both ends from `YYYY-MM-DD` strings
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        let start = parse_date("start_date", start)?;
        let end = parse_date("end_date", end)?;
        Self::new(start, end)
    }

    /// First day of the range
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day of the range
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of days in the range, counting both ends
    pub fn num_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Splits the range into consecutive windows of at most `length_days` days
    ///
    /// The final window is shorter when the range does not divide evenly.
    pub fn windows(&self, length_days: u32) -> Vec<DateWindow> {
        let length = i64::from(length_days.max(1));
        let mut windows = Vec::new();
        let mut window_start = self.start;

        while window_start <= self.end {
            let window_end = window_start
                .checked_add_signed(Duration::days(length - 1))
                .map_or(self.end, |end| end.min(self.end));
            windows.push(DateWindow {
                start_date: window_start,
                end_date: window_end,
            });
            match window_end.checked_add_signed(Duration::days(1)) {
                Some(next) => window_start = next,
                None => break,
            }
        }

        windows
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}

/// Inclusive run of consecutive days assigned to one dataset split
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DateWindow {
    /// First day of the window
    pub start_date: NaiveDate,

    /// Last day of the window
    pub end_date: NaiveDate,
}

impl DateWindow {
    /// Number of days in the window, counting both ends
    pub fn num_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }
}
