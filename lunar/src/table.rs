// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use jiff::civil;

use crate::date::CalendarDate;

/// The first Gregorian date with lunar data: lunar 1900, first month, first day.
pub const FIRST_SUPPORTED_DATE: CalendarDate = CalendarDate::from_date(civil::date(1900, 1, 31));

/// The last Gregorian date with lunar data.
pub const LAST_SUPPORTED_DATE: CalendarDate = CalendarDate::from_date(civil::date(2100, 12, 31));

pub(crate) const FIRST_YEAR: i16 = 1900;

/// One packed word per lunar year, 1900 to 2100.
///
/// - bits 0..4: number of the leap month, 0 when the year has none
/// - bits 4..16: one bit per month, month 1 at bit 15; set means 30 days, clear means 29
/// - bit 16: set when the leap month has 30 days
#[rustfmt::skip]
const LUNAR_INFO: [u32; 201] = [
    0x04bd8, 0x04ae0, 0x0a570, 0x054d5, 0x0d260, 0x0d950, 0x16554, 0x056a0, 0x09ad0, 0x055d2, // 1900
    0x04ae0, 0x0a5b6, 0x0a4d0, 0x0d250, 0x1d255, 0x0b540, 0x0d6a0, 0x0ada2, 0x095b0, 0x14977, // 1910
    0x04970, 0x0a4b0, 0x0b4b5, 0x06a50, 0x06d40, 0x1ab54, 0x02b60, 0x09570, 0x052f2, 0x04970, // 1920
    0x06566, 0x0d4a0, 0x0ea50, 0x16a95, 0x05ad0, 0x02b60, 0x186e3, 0x092e0, 0x1c8d7, 0x0c950, // 1930
    0x0d4a0, 0x1d8a6, 0x0b550, 0x056a0, 0x1a5b4, 0x025d0, 0x092d0, 0x0d2b2, 0x0a950, 0x0b557, // 1940
    0x06ca0, 0x0b550, 0x15355, 0x04da0, 0x0a5b0, 0x14573, 0x052b0, 0x0a9a8, 0x0e950, 0x06aa0, // 1950
    0x0aea6, 0x0ab50, 0x04b60, 0x0aae4, 0x0a570, 0x05260, 0x0f263, 0x0d950, 0x05b57, 0x056a0, // 1960
    0x096d0, 0x04dd5, 0x04ad0, 0x0a4d0, 0x0d4d4, 0x0d250, 0x0d558, 0x0b540, 0x0b6a0, 0x195a6, // 1970
    0x095b0, 0x049b0, 0x0a974, 0x0a4b0, 0x0b27a, 0x06a50, 0x06d40, 0x0af46, 0x0ab60, 0x09570, // 1980
    0x04af5, 0x04970, 0x064b0, 0x074a3, 0x0ea50, 0x06b58, 0x05ac0, 0x0ab60, 0x096d5, 0x092e0, // 1990
    0x0c960, 0x0d954, 0x0d4a0, 0x0da50, 0x07552, 0x056a0, 0x0abb7, 0x025d0, 0x092d0, 0x0cab5, // 2000
    0x0a950, 0x0b4a0, 0x0baa4, 0x0ad50, 0x055d9, 0x04ba0, 0x0a5b0, 0x15176, 0x052b0, 0x0a930, // 2010
    0x07954, 0x06aa0, 0x0ad50, 0x05b52, 0x04b60, 0x0a6e6, 0x0a4e0, 0x0d260, 0x0ea65, 0x0d530, // 2020
    0x05aa0, 0x076a3, 0x096d0, 0x04afb, 0x04ad0, 0x0a4d0, 0x1d0b6, 0x0d250, 0x0d520, 0x0dd45, // 2030
    0x0b5a0, 0x056d0, 0x055b2, 0x049b0, 0x0a577, 0x0a4b0, 0x0aa50, 0x1b255, 0x06d20, 0x0ada0, // 2040
    0x14b63, 0x09370, 0x049f8, 0x04970, 0x064b0, 0x168a6, 0x0ea50, 0x06b20, 0x1a6c4, 0x0aae0, // 2050
    0x092e0, 0x0d2e3, 0x0c960, 0x0d557, 0x0d4a0, 0x0da50, 0x05d55, 0x056a0, 0x0a6d0, 0x055d4, // 2060
    0x052d0, 0x0a9b8, 0x0a950, 0x0b4a0, 0x0b6a6, 0x0ad50, 0x055a0, 0x0aba4, 0x0a5b0, 0x052b0, // 2070
    0x0b273, 0x06930, 0x07337, 0x06aa0, 0x0ad50, 0x14b55, 0x04b60, 0x0a570, 0x054e4, 0x0d160, // 2080
    0x0e968, 0x0d520, 0x0daa0, 0x16aa6, 0x056d0, 0x04ae0, 0x0a9d4, 0x0a2d0, 0x0d150, 0x0f252, // 2090
    0x0d520, // 2100
];

/// Month layout of one lunar year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct YearInfo(u32);

impl YearInfo {
    /// Looks up a lunar year, `None` outside 1900 to 2100.
    pub fn of(year: i16) -> Option<Self> {
        let index = usize::try_from(year.checked_sub(FIRST_YEAR)?).ok()?;
        LUNAR_INFO.get(index).copied().map(Self)
    }

    /// The leap month number, if this year has one.
    pub fn leap_month(self) -> Option<u8> {
        match (self.0 & 0xf) as u8 {
            0 => None,
            m => Some(m),
        }
    }

    /// Length of the leap month, 0 when there is none.
    pub fn leap_days(self) -> u8 {
        match self.leap_month() {
            None => 0,
            Some(_) if self.0 & 0x10000 != 0 => 30,
            Some(_) => 29,
        }
    }

    /// Length of regular month `month` (1 to 12).
    pub fn month_days(self, month: u8) -> u8 {
        debug_assert!((1..=12).contains(&month));
        if self.0 & (0x10000 >> month) != 0 { 30 } else { 29 }
    }

    /// Total days in the lunar year, leap month included.
    pub fn total_days(self) -> u16 {
        let regular: u16 = (1..=12).map(|m| u16::from(self.month_days(m))).sum();
        regular + u16::from(self.leap_days())
    }

    /// Months of the year in calendar order as `(month, is_leap, days)`.
    ///
    /// A leap month directly follows the regular month of the same number.
    pub fn months(self) -> impl Iterator<Item = (u8, bool, u8)> {
        let leap = self.leap_month();
        (1..=12u8).flat_map(move |m| {
            let regular = std::iter::once((m, false, self.month_days(m)));
            let leap = (leap == Some(m)).then(|| (m, true, self.leap_days()));
            regular.chain(leap)
        })
    }
}
