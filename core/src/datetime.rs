// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use jiff::civil::{DateTime, Time};
use jiff::tz::TimeZone;
use jiff::{Timestamp, Zoned};
use lunacal_lunar::CalendarDate;
use regex::Regex;

static STRICT_TIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([01][0-9]|2[0-3]):([0-5][0-9])$").expect("time pattern must compile")
});

/// A time string that is not a valid `HH:MM` wall clock time.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time `{0}`: expected HH:MM between 00:00 and 23:59")]
pub struct InvalidTimeFormat(String);

/// Wall clock time of day with minute precision, 00:00 to 23:59.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime {
    hour: u8,
    minute: u8,
}

impl ClockTime {
    /// Midnight.
    pub const MIDNIGHT: Self = Self { hour: 0, minute: 0 };

    /// Creates a time, `None` if out of range.
    #[must_use]
    pub const fn new(hour: u8, minute: u8) -> Option<Self> {
        if hour < 24 && minute < 60 {
            Some(Self { hour, minute })
        } else {
            None
        }
    }

    /// The hour, 0 to 23.
    #[must_use]
    pub const fn hour(self) -> u8 {
        self.hour
    }

    /// The minute, 0 to 59.
    #[must_use]
    pub const fn minute(self) -> u8 {
        self.minute
    }

    /// Minutes since midnight.
    #[must_use]
    pub const fn minutes_of_day(self) -> u16 {
        self.hour as u16 * 60 + self.minute as u16
    }

    /// Normalises free-form input typed into a time field.
    ///
    /// Non-digits are dropped and at most four digits kept. One or two digits are the hour
    /// (`"3"` is 03:00), three digits are `H MM` (`"317"` is 03:17), four are `HH MM`. Hours
    /// above 23 and minutes above 59 are clamped.
    ///
    /// # Errors
    ///
    /// Returns an error if the input contains no digit.
    pub fn parse_loose(input: &str) -> Result<Self, InvalidTimeFormat> {
        let digits: Vec<u8> = input
            .bytes()
            .filter(u8::is_ascii_digit)
            .map(|b| b - b'0')
            .take(4)
            .collect();

        let (hour, minute) = match *digits.as_slice() {
            [] => return Err(InvalidTimeFormat(input.to_string())),
            [h] => (h, 0),
            [h1, h2] => (h1 * 10 + h2, 0),
            [h, m1, m2] => (h, m1 * 10 + m2),
            [h1, h2, m1, m2, ..] => (h1 * 10 + h2, m1 * 10 + m2),
        };

        Ok(Self {
            hour: hour.min(23),
            minute: minute.min(59),
        })
    }

    /// Combines with a date into a zoned datetime in `tz`.
    ///
    /// Times skipped by a DST transition move forward; repeated times take the earlier one.
    pub fn on(self, date: CalendarDate, tz: &TimeZone) -> Result<Zoned, jiff::Error> {
        DateTime::from_parts(date.as_date(), self.into()).to_zoned(tz.clone())
    }

    /// The instant this time occurs on `date` in `tz`.
    pub fn instant_on(self, date: CalendarDate, tz: &TimeZone) -> Result<Timestamp, jiff::Error> {
        self.on(date, tz).map(|z| z.timestamp())
    }
}

impl FromStr for ClockTime {
    type Err = InvalidTimeFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidTimeFormat(s.to_string());
        let caps = STRICT_TIME.captures(s).ok_or_else(invalid)?;
        let part = |i| {
            caps.get(i)
                .and_then(|m| m.as_str().parse::<u8>().ok())
                .ok_or_else(invalid)
        };
        Ok(Self {
            hour: part(1)?,
            minute: part(2)?,
        })
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl From<ClockTime> for Time {
    fn from(t: ClockTime) -> Self {
        Time::constant(t.hour as i8, t.minute as i8, 0, 0)
    }
}

impl From<Time> for ClockTime {
    fn from(t: Time) -> Self {
        Self {
            hour: t.hour() as u8,
            minute: t.minute() as u8,
        }
    }
}
