// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use strum::{EnumIter, FromRepr, IntoEnumIterator};

use crate::astro;
use crate::date::CalendarDate;

/// The 24 solar terms, in the order they occur within a Gregorian year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromRepr, EnumIter)]
#[repr(u8)]
#[allow(missing_docs)]
pub enum SolarTerm {
    MinorCold,
    MajorCold,
    StartOfSpring,
    RainWater,
    AwakeningOfInsects,
    SpringEquinox,
    PureBrightness,
    GrainRain,
    StartOfSummer,
    GrainBuds,
    GrainInEar,
    SummerSolstice,
    MinorHeat,
    MajorHeat,
    StartOfAutumn,
    EndOfHeat,
    WhiteDew,
    AutumnEquinox,
    ColdDew,
    FrostsDescent,
    StartOfWinter,
    MinorSnow,
    MajorSnow,
    WinterSolstice,
}

impl SolarTerm {
    /// Chinese name, e.g. `立春`.
    #[must_use]
    pub const fn name_zh(self) -> &'static str {
        match self {
            Self::MinorCold => "小寒",
            Self::MajorCold => "大寒",
            Self::StartOfSpring => "立春",
            Self::RainWater => "雨水",
            Self::AwakeningOfInsects => "惊蛰",
            Self::SpringEquinox => "春分",
            Self::PureBrightness => "清明",
            Self::GrainRain => "谷雨",
            Self::StartOfSummer => "立夏",
            Self::GrainBuds => "小满",
            Self::GrainInEar => "芒种",
            Self::SummerSolstice => "夏至",
            Self::MinorHeat => "小暑",
            Self::MajorHeat => "大暑",
            Self::StartOfAutumn => "立秋",
            Self::EndOfHeat => "处暑",
            Self::WhiteDew => "白露",
            Self::AutumnEquinox => "秋分",
            Self::ColdDew => "寒露",
            Self::FrostsDescent => "霜降",
            Self::StartOfWinter => "立冬",
            Self::MinorSnow => "小雪",
            Self::MajorSnow => "大雪",
            Self::WinterSolstice => "冬至",
        }
    }

    /// English name, e.g. `Start of Spring`.
    #[must_use]
    pub const fn name_en(self) -> &'static str {
        match self {
            Self::MinorCold => "Minor Cold",
            Self::MajorCold => "Major Cold",
            Self::StartOfSpring => "Start of Spring",
            Self::RainWater => "Rain Water",
            Self::AwakeningOfInsects => "Awakening of Insects",
            Self::SpringEquinox => "Spring Equinox",
            Self::PureBrightness => "Pure Brightness",
            Self::GrainRain => "Grain Rain",
            Self::StartOfSummer => "Start of Summer",
            Self::GrainBuds => "Grain Buds",
            Self::GrainInEar => "Grain in Ear",
            Self::SummerSolstice => "Summer Solstice",
            Self::MinorHeat => "Minor Heat",
            Self::MajorHeat => "Major Heat",
            Self::StartOfAutumn => "Start of Autumn",
            Self::EndOfHeat => "End of Heat",
            Self::WhiteDew => "White Dew",
            Self::AutumnEquinox => "Autumn Equinox",
            Self::ColdDew => "Cold Dew",
            Self::FrostsDescent => "Frost's Descent",
            Self::StartOfWinter => "Start of Winter",
            Self::MinorSnow => "Minor Snow",
            Self::MajorSnow => "Major Snow",
            Self::WinterSolstice => "Winter Solstice",
        }
    }

    /// Apparent solar longitude at this term, in degrees.
    #[must_use]
    pub fn longitude(self) -> u16 {
        (285 + 15 * self as u16) % 360
    }

    /// The two terms falling in Gregorian month `month`, earliest first.
    fn of_month(month: i8) -> Option<[Self; 2]> {
        let first = u8::try_from(month).ok()?.checked_sub(1)? * 2;
        Some([Self::from_repr(first)?, Self::from_repr(first + 1)?])
    }

    /// The civil date (China Standard Time) of this term in Gregorian `year`.
    #[must_use]
    pub fn date_in(self, year: i16) -> Option<CalendarDate> {
        astro::solar_term_date(year, self as u8)
    }

    /// The solar term falling exactly on `date`, if any.
    #[must_use]
    pub fn on(date: CalendarDate) -> Option<Self> {
        Self::of_month(date.month())?
            .into_iter()
            .find(|term| term.date_in(date.year()) == Some(date))
    }

    /// The first term of `date`'s month, which starts a new sexagenary month.
    pub(crate) fn first_in_month(date: CalendarDate) -> Option<CalendarDate> {
        let [first, _] = Self::of_month(date.month())?;
        first.date_in(date.year())
    }

    /// All terms of a Gregorian year with their dates.
    pub fn in_year(year: i16) -> impl Iterator<Item = (Self, CalendarDate)> {
        Self::iter().filter_map(move |term| term.date_in(year).map(|date| (term, date)))
    }
}

impl fmt::Display for SolarTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name_zh())
    }
}
