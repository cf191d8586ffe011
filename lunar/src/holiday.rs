// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use crate::date::CalendarDate;
use crate::error::InvalidDateFormat;
use crate::lunar_date::{Converter, LunarSource};

/// A named holiday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum Holiday {
    // Fixed Gregorian dates
    NewYearsDay,
    ValentinesDay,
    WomensDay,
    ArborDay,
    AprilFoolsDay,
    LabourDay,
    YouthDay,
    ChildrensDay,
    PartyFoundingDay,
    ArmyDay,
    TeachersDay,
    NationalDay,
    ChristmasEve,
    Christmas,

    // Lunar dates
    SpringFestival,
    LanternFestival,
    DragonBoatFestival,
    QixiFestival,
    GhostFestival,
    MidAutumnFestival,
    DoubleNinthFestival,
    LabaFestival,
    LittleNewYear,
    NewYearsEve,
}

/// Which calendar a holiday is fixed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HolidayKind {
    /// Fixed Gregorian month and day.
    International,
    /// Fixed lunar month and day.
    Traditional,
}

const INTERNATIONAL: [(i8, i8, Holiday); 14] = [
    (1, 1, Holiday::NewYearsDay),
    (2, 14, Holiday::ValentinesDay),
    (3, 8, Holiday::WomensDay),
    (3, 12, Holiday::ArborDay),
    (4, 1, Holiday::AprilFoolsDay),
    (5, 1, Holiday::LabourDay),
    (5, 4, Holiday::YouthDay),
    (6, 1, Holiday::ChildrensDay),
    (7, 1, Holiday::PartyFoundingDay),
    (8, 1, Holiday::ArmyDay),
    (9, 10, Holiday::TeachersDay),
    (10, 1, Holiday::NationalDay),
    (12, 24, Holiday::ChristmasEve),
    (12, 25, Holiday::Christmas),
];

const TRADITIONAL: [(u8, u8, Holiday); 9] = [
    (1, 1, Holiday::SpringFestival),
    (1, 15, Holiday::LanternFestival),
    (5, 5, Holiday::DragonBoatFestival),
    (7, 7, Holiday::QixiFestival),
    (7, 15, Holiday::GhostFestival),
    (8, 15, Holiday::MidAutumnFestival),
    (9, 9, Holiday::DoubleNinthFestival),
    (12, 8, Holiday::LabaFestival),
    (12, 23, Holiday::LittleNewYear),
];

impl Holiday {
    /// English name, e.g. `Spring Festival`.
    #[must_use]
    pub const fn name_en(self) -> &'static str {
        match self {
            Self::NewYearsDay => "New Year's Day",
            Self::ValentinesDay => "Valentine's Day",
            Self::WomensDay => "Women's Day",
            Self::ArborDay => "Arbor Day",
            Self::AprilFoolsDay => "April Fools' Day",
            Self::LabourDay => "Labour Day",
            Self::YouthDay => "Youth Day",
            Self::ChildrensDay => "Children's Day",
            Self::PartyFoundingDay => "Party Founding Day",
            Self::ArmyDay => "Army Day",
            Self::TeachersDay => "Teachers' Day",
            Self::NationalDay => "National Day",
            Self::ChristmasEve => "Christmas Eve",
            Self::Christmas => "Christmas",
            Self::SpringFestival => "Spring Festival",
            Self::LanternFestival => "Lantern Festival",
            Self::DragonBoatFestival => "Dragon Boat Festival",
            Self::QixiFestival => "Qixi Festival",
            Self::GhostFestival => "Ghost Festival",
            Self::MidAutumnFestival => "Mid-Autumn Festival",
            Self::DoubleNinthFestival => "Double Ninth Festival",
            Self::LabaFestival => "Laba Festival",
            Self::LittleNewYear => "Little New Year",
            Self::NewYearsEve => "New Year's Eve",
        }
    }

    /// Chinese name, e.g. `春节`.
    #[must_use]
    pub const fn name_zh(self) -> &'static str {
        match self {
            Self::NewYearsDay => "元旦",
            Self::ValentinesDay => "情人节",
            Self::WomensDay => "妇女节",
            Self::ArborDay => "植树节",
            Self::AprilFoolsDay => "愚人节",
            Self::LabourDay => "劳动节",
            Self::YouthDay => "青年节",
            Self::ChildrensDay => "儿童节",
            Self::PartyFoundingDay => "建党节",
            Self::ArmyDay => "建军节",
            Self::TeachersDay => "教师节",
            Self::NationalDay => "国庆节",
            Self::ChristmasEve => "平安夜",
            Self::Christmas => "圣诞节",
            Self::SpringFestival => "春节",
            Self::LanternFestival => "元宵节",
            Self::DragonBoatFestival => "端午节",
            Self::QixiFestival => "七夕节",
            Self::GhostFestival => "中元节",
            Self::MidAutumnFestival => "中秋节",
            Self::DoubleNinthFestival => "重阳节",
            Self::LabaFestival => "腊八节",
            Self::LittleNewYear => "小年",
            Self::NewYearsEve => "除夕",
        }
    }

    /// Which calendar this holiday follows.
    #[must_use]
    pub const fn kind(self) -> HolidayKind {
        match self {
            Self::NewYearsDay
            | Self::ValentinesDay
            | Self::WomensDay
            | Self::ArborDay
            | Self::AprilFoolsDay
            | Self::LabourDay
            | Self::YouthDay
            | Self::ChildrensDay
            | Self::PartyFoundingDay
            | Self::ArmyDay
            | Self::TeachersDay
            | Self::NationalDay
            | Self::ChristmasEve
            | Self::Christmas => HolidayKind::International,
            _ => HolidayKind::Traditional,
        }
    }
}

impl fmt::Display for Holiday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name_en())
    }
}

/// Resolves the holiday of a date, international ones first.
#[derive(Debug, Default, Clone, Copy)]
pub struct HolidayResolver<S = Converter> {
    source: S,
}

impl<S: LunarSource> HolidayResolver<S> {
    /// Creates a resolver that reads lunar data from `source`.
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// The holiday falling on `date`, if any.
    ///
    /// A fixed Gregorian holiday wins without consulting the lunar source. Dates without lunar
    /// data simply have no traditional holiday.
    pub fn resolve(&self, date: CalendarDate) -> Option<Holiday> {
        if let Some(holiday) = international(date) {
            return Some(holiday);
        }

        let lunar = match self.source.lunar(date) {
            Ok(lunar) => lunar,
            Err(err) => {
                tracing::trace!(%date, %err, "no lunar data for holiday lookup");
                return None;
            }
        };

        // Festivals are never observed in a leap month.
        if lunar.is_leap_month() {
            return None;
        }

        TRADITIONAL
            .iter()
            .find(|&&(m, d, _)| m == lunar.month() && d == lunar.day())
            .map(|&(_, _, holiday)| holiday)
            .or_else(|| {
                (lunar.month() == 12 && lunar.is_last_day_of_month()).then_some(Holiday::NewYearsEve)
            })
    }
}

fn international(date: CalendarDate) -> Option<Holiday> {
    INTERNATIONAL
        .iter()
        .find(|&&(m, d, _)| m == date.month() && d == date.day())
        .map(|&(_, _, holiday)| holiday)
}

/// The holiday of `date`, using the built-in converter.
#[must_use]
pub fn resolve_holiday(date: CalendarDate) -> Option<Holiday> {
    HolidayResolver::new(Converter).resolve(date)
}

/// Parses a `YYYY-MM-DD` string and resolves its holiday.
///
/// # Errors
///
/// Returns an error if `s` is not a valid date. A valid date without a holiday is `Ok(None)`.
pub fn resolve_holiday_str(s: &str) -> Result<Option<Holiday>, InvalidDateFormat> {
    Ok(resolve_holiday(s.parse()?))
}
