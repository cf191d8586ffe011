// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use jiff::ToSpan;
use jiff::civil::{Date, Weekday};
use regex::Regex;

use crate::error::InvalidDateFormat;

/// NOTE: Used for storing in the database, so it should be stable across different runs.
pub(crate) const STABLE_FORMAT_DATEONLY: &str = "%Y-%m-%d";

static ISO_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{4})-([0-9]{2})-([0-9]{2})$").expect("ISO date pattern must compile")
});

/// A valid date in the proleptic Gregorian calendar.
///
/// The only textual form accepted is the strict ISO `YYYY-MM-DD`. Malformed input is rejected
/// with [`InvalidDateFormat`], it is never coerced into a nearby date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate(Date);

impl CalendarDate {
    /// Creates a date from its components.
    ///
    /// # Errors
    ///
    /// Returns an error if the components do not name an existing day.
    pub fn new(year: i16, month: i8, day: i8) -> Result<Self, InvalidDateFormat> {
        Date::new(year, month, day).map(Self).map_err(|e| {
            InvalidDateFormat::new(format!("{year:04}-{month:02}-{day:02}"), e.to_string())
        })
    }

    /// Wraps an already valid civil date.
    #[must_use]
    pub const fn from_date(date: Date) -> Self {
        Self(date)
    }

    /// The underlying civil date.
    #[must_use]
    pub const fn as_date(&self) -> Date {
        self.0
    }

    /// The Gregorian year.
    #[must_use]
    pub fn year(&self) -> i16 {
        self.0.year()
    }

    /// The Gregorian month, 1 to 12.
    #[must_use]
    pub fn month(&self) -> i8 {
        self.0.month()
    }

    /// The day of the month, 1 to 31.
    #[must_use]
    pub fn day(&self) -> i8 {
        self.0.day()
    }

    /// The day of the week.
    #[must_use]
    pub fn weekday(&self) -> Weekday {
        self.0.weekday()
    }

    /// Number of days in this date's month.
    #[must_use]
    pub fn days_in_month(&self) -> i8 {
        self.0.days_in_month()
    }

    /// Signed number of days from `earlier` to `self`.
    #[must_use]
    pub fn days_since(&self, earlier: Self) -> i64 {
        // Both ends lie within jiff's supported range, so day arithmetic cannot overflow.
        self.0
            .since(earlier.0)
            .map_or(0, |span| i64::from(span.get_days()))
    }

    /// The date `days` days later (or earlier when negative), if it exists.
    #[must_use]
    pub fn checked_add_days(&self, days: i64) -> Option<Self> {
        self.0.checked_add(days.days()).ok().map(Self)
    }

    /// The first day of this date's month.
    #[must_use]
    pub fn first_of_month(&self) -> Self {
        Self(self.0.first_of_month())
    }
}

impl FromStr for CalendarDate {
    type Err = InvalidDateFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let caps = ISO_DATE
            .captures(s)
            .ok_or_else(|| InvalidDateFormat::new(s, "expected YYYY-MM-DD"))?;

        let field = |i: usize| -> Result<i16, InvalidDateFormat> {
            caps.get(i)
                .and_then(|m| m.as_str().parse().ok())
                .ok_or_else(|| InvalidDateFormat::new(s, "expected YYYY-MM-DD"))
        };
        let (year, month, day) = (field(1)?, field(2)?, field(3)?);

        let month = i8::try_from(month).map_err(|_| InvalidDateFormat::new(s, "month out of range"))?;
        let day = i8::try_from(day).map_err(|_| InvalidDateFormat::new(s, "day out of range"))?;
        Date::new(year, month, day)
            .map(Self)
            .map_err(|e| InvalidDateFormat::new(s, e.to_string()))
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.strftime(STABLE_FORMAT_DATEONLY))
    }
}

impl From<Date> for CalendarDate {
    fn from(date: Date) -> Self {
        Self(date)
    }
}

impl From<CalendarDate> for Date {
    fn from(date: CalendarDate) -> Self {
        date.0
    }
}
