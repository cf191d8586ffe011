// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use jiff::civil;

use crate::date::CalendarDate;
use crate::error::LunarError;
use crate::ganzhi::{Sexagenary, Zodiac};
use crate::solar_term::SolarTerm;
use crate::table::{FIRST_SUPPORTED_DATE, FIRST_YEAR, LAST_SUPPORTED_DATE, YearInfo};

const MONTH_NAMES: [&str; 12] = [
    "正", "二", "三", "四", "五", "六", "七", "八", "九", "十", "冬", "腊",
];
const DAY_TENS: [&str; 4] = ["初", "十", "廿", "卅"];
const DAY_UNITS: [&str; 11] = ["日", "一", "二", "三", "四", "五", "六", "七", "八", "九", "十"];

const SEXAGENARY_DAY_EPOCH: CalendarDate = CalendarDate::from_date(civil::date(1900, 1, 1));

/// A Gregorian date projected onto the Chinese lunisolar calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LunarDate {
    date: CalendarDate,
    year: i16,
    month: u8,
    day: u8,
    is_leap: bool,
    month_days: u8,
    leap_month: Option<u8>,
    year_ganzhi: Sexagenary,
    month_ganzhi: Sexagenary,
    day_ganzhi: Sexagenary,
    solar_term: Option<SolarTerm>,
}

impl LunarDate {
    /// Parses a `YYYY-MM-DD` string and converts it.
    ///
    /// # Errors
    ///
    /// [`LunarError::InvalidDateFormat`] for malformed input, [`LunarError::OutOfRange`] for
    /// dates the lunar table does not cover.
    pub fn parse(s: &str) -> Result<Self, LunarError> {
        to_lunar(s.parse()?)
    }

    /// The Gregorian date this was derived from.
    #[must_use]
    pub fn date(&self) -> CalendarDate {
        self.date
    }

    /// Lunar year number. Differs from the Gregorian year before Spring Festival.
    #[must_use]
    pub fn year(&self) -> i16 {
        self.year
    }

    /// Lunar month, 1 to 12.
    #[must_use]
    pub fn month(&self) -> u8 {
        self.month
    }

    /// Lunar day of month, 1 to 30.
    #[must_use]
    pub fn day(&self) -> u8 {
        self.day
    }

    /// Whether the current month is a leap month.
    #[must_use]
    pub fn is_leap_month(&self) -> bool {
        self.is_leap
    }

    /// Number of days (29 or 30) in the current lunar month.
    #[must_use]
    pub fn month_days(&self) -> u8 {
        self.month_days
    }

    /// Whether this is the last day of its lunar month.
    #[must_use]
    pub fn is_last_day_of_month(&self) -> bool {
        self.day == self.month_days
    }

    /// The leap month of this lunar year, if it has one.
    #[must_use]
    pub fn leap_month(&self) -> Option<u8> {
        self.leap_month
    }

    /// Sexagenary name of the lunar year.
    #[must_use]
    pub fn year_ganzhi(&self) -> Sexagenary {
        self.year_ganzhi
    }

    /// Sexagenary name of the solar month.
    #[must_use]
    pub fn month_ganzhi(&self) -> Sexagenary {
        self.month_ganzhi
    }

    /// Sexagenary name of the day.
    #[must_use]
    pub fn day_ganzhi(&self) -> Sexagenary {
        self.day_ganzhi
    }

    /// Zodiac animal of the lunar year.
    #[must_use]
    pub fn zodiac(&self) -> Zodiac {
        Zodiac::of_year(self.year)
    }

    /// The solar term falling on this exact date.
    #[must_use]
    pub fn solar_term(&self) -> Option<SolarTerm> {
        self.solar_term
    }

    /// Month label such as `正月` or `闰二月`.
    #[must_use]
    #[allow(clippy::indexing_slicing)] // month in 1..=12
    pub fn month_label(&self) -> String {
        let leap = if self.is_leap { "闰" } else { "" };
        format!("{leap}{}月", MONTH_NAMES[usize::from(self.month - 1)])
    }

    /// Day label such as `初一`, `十五` or `廿九`.
    #[must_use]
    #[allow(clippy::indexing_slicing)] // day in 1..=30
    pub fn day_label(&self) -> String {
        match self.day {
            10 => "初十".to_owned(),
            20 => "二十".to_owned(),
            30 => "三十".to_owned(),
            d => format!(
                "{}{}",
                DAY_TENS[usize::from(d / 10)],
                DAY_UNITS[usize::from(d % 10)]
            ),
        }
    }

    /// Year label such as `甲辰龙年`.
    #[must_use]
    pub fn year_label(&self) -> String {
        format!("{}{}年", self.year_ganzhi, self.zodiac())
    }

    /// Compact label for calendar cells: the solar term if there is one, otherwise month and day.
    #[must_use]
    pub fn short_label(&self) -> String {
        match self.solar_term {
            Some(term) => term.name_zh().to_owned(),
            None if self.day == 1 => self.month_label(),
            None => self.day_label(),
        }
    }

    /// Full label such as `甲辰龙年 正月初一 立春`.
    #[must_use]
    pub fn full_label(&self) -> String {
        let mut label = format!(
            "{} {}{}",
            self.year_label(),
            self.month_label(),
            self.day_label()
        );
        if let Some(term) = self.solar_term {
            label.push(' ');
            label.push_str(term.name_zh());
        }
        label
    }
}

impl fmt::Display for LunarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.month_label(), self.day_label())
    }
}

/// Anything that can turn a Gregorian date into lunar data.
///
/// The holiday resolver is generic over this so tests can observe or replace the converter.
pub trait LunarSource {
    /// Converts `date` to the lunar calendar.
    ///
    /// # Errors
    ///
    /// Returns [`LunarError::OutOfRange`] when the date has no lunar data.
    fn lunar(&self, date: CalendarDate) -> Result<LunarDate, LunarError>;
}

/// The table driven lunar calendar converter.
#[derive(Debug, Default, Clone, Copy)]
pub struct Converter;

impl LunarSource for Converter {
    fn lunar(&self, date: CalendarDate) -> Result<LunarDate, LunarError> {
        to_lunar(date)
    }
}

impl<S: LunarSource + ?Sized> LunarSource for &S {
    fn lunar(&self, date: CalendarDate) -> Result<LunarDate, LunarError> {
        (**self).lunar(date)
    }
}

/// Converts a Gregorian date to the lunar calendar.
///
/// # Errors
///
/// Returns [`LunarError::OutOfRange`] for dates before [`FIRST_SUPPORTED_DATE`] or after
/// [`LAST_SUPPORTED_DATE`].
pub fn to_lunar(date: CalendarDate) -> Result<LunarDate, LunarError> {
    if date < FIRST_SUPPORTED_DATE || date > LAST_SUPPORTED_DATE {
        return Err(LunarError::OutOfRange(date));
    }

    let mut offset = date.days_since(FIRST_SUPPORTED_DATE);
    let mut year = FIRST_YEAR;
    let info = loop {
        let info = YearInfo::of(year).ok_or(LunarError::OutOfRange(date))?;
        let days = i64::from(info.total_days());
        if offset < days {
            break info;
        }
        offset -= days;
        year += 1;
    };

    let (month, is_leap, month_days) = info
        .months()
        .find(|&(_, _, days)| {
            let days = i64::from(days);
            if offset < days {
                true
            } else {
                offset -= days;
                false
            }
        })
        .ok_or(LunarError::OutOfRange(date))?;

    let after_first_term = SolarTerm::first_in_month(date).is_some_and(|first| date >= first);

    Ok(LunarDate {
        date,
        year,
        month,
        day: offset as u8 + 1,
        is_leap,
        month_days,
        leap_month: info.leap_month(),
        year_ganzhi: Sexagenary::of_year(year),
        month_ganzhi: Sexagenary::of_month(date.year(), date.month(), after_first_term),
        day_ganzhi: Sexagenary::of_day(date.days_since(SEXAGENARY_DAY_EPOCH)),
        solar_term: SolarTerm::on(date),
    })
}
