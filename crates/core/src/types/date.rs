//! Course session dates.

use core::fmt;

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

/// The date a course session runs, as published in the catalog.
///
/// Dates are kept verbatim (the cart identifies a line item by course and
/// date string), so two spellings of the same day are distinct sessions.
/// Parsing is only attempted for display.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CourseDate(String);

impl CourseDate {
    /// Wrap a catalog date string.
    #[must_use]
    pub fn new(date: impl Into<String>) -> Self {
        Self(date.into())
    }

    /// Returns the date exactly as published.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the date string is empty or whitespace only.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Calendar date, if the string is `YYYY-MM-DD` or an RFC 3339 timestamp.
    #[must_use]
    pub fn calendar_date(&self) -> Option<NaiveDate> {
        let s = self.0.trim();
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .ok()
            .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
    }

    /// Long US form such as `Monday, January 1, 2024`.
    ///
    /// Falls back to the raw string when the date cannot be parsed.
    #[must_use]
    pub fn long_format(&self) -> String {
        self.calendar_date().map_or_else(
            || self.0.clone(),
            |date| date.format("%A, %B %-d, %Y").to_string(),
        )
    }
}

impl fmt::Display for CourseDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CourseDate {
    fn from(date: &str) -> Self {
        Self(date.to_owned())
    }
}

impl From<String> for CourseDate {
    fn from(date: String) -> Self {
        Self(date)
    }
}

impl AsRef<str> for CourseDate {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
