// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use strum::FromRepr;

const STEMS: [&str; 10] = ["甲", "乙", "丙", "丁", "戊", "己", "庚", "辛", "壬", "癸"];
const BRANCHES: [&str; 12] = [
    "子", "丑", "寅", "卯", "辰", "巳", "午", "未", "申", "酉", "戌", "亥",
];

/// A position in the sexagenary cycle, written as a heavenly stem followed by an earthly branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Sexagenary(u8);

impl Sexagenary {
    /// The cycle position for any integer index, `0` being 甲子.
    #[must_use]
    pub fn from_index(index: i64) -> Self {
        Self(index.rem_euclid(60) as u8)
    }

    /// Index in the cycle, 0 to 59.
    #[must_use]
    pub fn index(self) -> u8 {
        self.0
    }

    /// Heavenly stem character.
    #[must_use]
    #[allow(clippy::indexing_slicing)] // index < 60
    pub fn stem(self) -> &'static str {
        STEMS[usize::from(self.0 % 10)]
    }

    /// Earthly branch character.
    #[must_use]
    #[allow(clippy::indexing_slicing)] // index < 60
    pub fn branch(self) -> &'static str {
        BRANCHES[usize::from(self.0 % 12)]
    }

    /// Label of the year named after `lunar_year`.
    pub(crate) fn of_year(lunar_year: i16) -> Self {
        Self::from_index(i64::from(lunar_year) - 4)
    }

    /// Label of the day `days_since_1900` days after 1900-01-01, which was 甲戌.
    pub(crate) fn of_day(days_since_1900: i64) -> Self {
        Self::from_index(days_since_1900 + 10)
    }

    /// Label of the solar month containing a Gregorian date.
    ///
    /// Months change on the first solar term of each Gregorian month, not on the 1st.
    pub(crate) fn of_month(year: i16, month: i8, after_first_term: bool) -> Self {
        let base = (i64::from(year) - 1900) * 12 + i64::from(month) + 11;
        Self::from_index(base + i64::from(after_first_term))
    }
}

impl fmt::Display for Sexagenary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.stem(), self.branch())
    }
}

/// Zodiac animal attached to each earthly branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromRepr)]
#[repr(u8)]
#[allow(missing_docs)]
pub enum Zodiac {
    Rat,
    Ox,
    Tiger,
    Rabbit,
    Dragon,
    Snake,
    Horse,
    Goat,
    Monkey,
    Rooster,
    Dog,
    Pig,
}

impl Zodiac {
    /// The zodiac animal of a lunar year.
    #[must_use]
    pub fn of_year(lunar_year: i16) -> Self {
        let branch = (i32::from(lunar_year) - 4).rem_euclid(12) as u8;
        Self::from_repr(branch).unwrap_or(Self::Rat)
    }

    /// Chinese name, e.g. `龙`.
    #[must_use]
    pub const fn name_zh(self) -> &'static str {
        match self {
            Self::Rat => "鼠",
            Self::Ox => "牛",
            Self::Tiger => "虎",
            Self::Rabbit => "兔",
            Self::Dragon => "龙",
            Self::Snake => "蛇",
            Self::Horse => "马",
            Self::Goat => "羊",
            Self::Monkey => "猴",
            Self::Rooster => "鸡",
            Self::Dog => "狗",
            Self::Pig => "猪",
        }
    }

    /// English name, e.g. `Dragon`.
    #[must_use]
    pub const fn name_en(self) -> &'static str {
        match self {
            Self::Rat => "Rat",
            Self::Ox => "Ox",
            Self::Tiger => "Tiger",
            Self::Rabbit => "Rabbit",
            Self::Dragon => "Dragon",
            Self::Snake => "Snake",
            Self::Horse => "Horse",
            Self::Goat => "Goat",
            Self::Monkey => "Monkey",
            Self::Rooster => "Rooster",
            Self::Dog => "Dog",
            Self::Pig => "Pig",
        }
    }
}

impl fmt::Display for Zodiac {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name_zh())
    }
}
