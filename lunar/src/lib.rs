// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Convert Gregorian dates into the Chinese lunisolar calendar, and resolve solar terms and
//! holidays for them.
//!
//! Everything in this crate is pure: no I/O and no clock reads. The same input always yields
//! the same output.
//!
//! ```
//! use lunacal_lunar::{CalendarDate, Holiday, resolve_holiday, to_lunar};
//!
//! let date: CalendarDate = "2024-02-10".parse().unwrap();
//! let lunar = to_lunar(date).unwrap();
//! assert_eq!((lunar.month(), lunar.day()), (1, 1));
//! assert_eq!(lunar.year_ganzhi().to_string(), "甲辰");
//! assert_eq!(resolve_holiday(date), Some(Holiday::SpringFestival));
//! ```

#![warn(
    trivial_casts,
    trivial_numeric_casts,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications,
    clippy::dbg_macro,
    clippy::indexing_slicing,
    clippy::pedantic
)]
// Allow certain clippy lints that are too restrictive for this crate
#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    clippy::unreadable_literal
)]

mod astro;
mod date;
mod error;
mod ganzhi;
mod holiday;
mod lunar_date;
mod solar_term;
mod table;

pub use crate::date::CalendarDate;
pub use crate::error::{InvalidDateFormat, LunarError};
pub use crate::ganzhi::{Sexagenary, Zodiac};
pub use crate::holiday::{Holiday, HolidayKind, HolidayResolver, resolve_holiday, resolve_holiday_str};
pub use crate::lunar_date::{Converter, LunarDate, LunarSource, to_lunar};
pub use crate::solar_term::SolarTerm;
pub use crate::table::{FIRST_SUPPORTED_DATE, LAST_SUPPORTED_DATE};
