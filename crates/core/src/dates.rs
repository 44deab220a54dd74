//! Calendar-date value type used by the itinerary builder.
//!
//! Trip dates are whole days with no time zone: the browser date inputs only
//! ever produce `YYYY-MM-DD`, and every computation works in calendar days.

use std::fmt;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::types::DayCount;

/// Format produced by HTML date inputs.
pub const INPUT_FORMAT: &str = "%Y-%m-%d";

/// Long-form date used in summaries and the export payload ("January 1, 2025").
pub const READABLE_FORMAT: &str = "%B %-d, %Y";

/// An immutable calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TripDate(NaiveDate);

impl TripDate {
    /// Build a date from its parts, returning `None` for impossible dates.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Parse a `YYYY-MM-DD` string. Surrounding whitespace is ignored.
    ///
    /// Returns `None` for empty or malformed input; callers treat both as a
    /// missing date.
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return None;
        }
        NaiveDate::parse_from_str(trimmed, INPUT_FORMAT)
            .ok()
            .map(Self)
    }

    /// The date `days` calendar days later.
    ///
    /// Saturates at the largest representable date.
    pub fn add_days(self, days: DayCount) -> Self {
        Self(
            self.0
                .checked_add_days(Days::new(u64::from(days)))
                .unwrap_or(NaiveDate::MAX),
        )
    }

    /// Absolute number of days between two dates (order does not matter).
    pub fn days_between(self, other: TripDate) -> DayCount {
        let diff = (other.0 - self.0).num_days().unsigned_abs();
        DayCount::try_from(diff).unwrap_or(DayCount::MAX)
    }

    /// Number of calendar days in the range, counting both endpoints.
    pub fn inclusive_days(self, other: TripDate) -> DayCount {
        self.days_between(other).saturating_add(1)
    }

    /// Long-form rendering, e.g. `"January 1, 2025"`.
    pub fn readable(self) -> String {
        self.0.format(READABLE_FORMAT).to_string()
    }

    pub fn as_naive(self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for TripDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for TripDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(INPUT_FORMAT))
    }
}
