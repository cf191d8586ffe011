// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use thiserror::Error;

use crate::date::CalendarDate;

/// A date string that is not a strict `YYYY-MM-DD` Gregorian date.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid date `{input}`: {reason}")]
pub struct InvalidDateFormat {
    input: String,
    reason: String,
}

impl InvalidDateFormat {
    pub(crate) fn new(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// The rejected input.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }
}

/// Errors raised by the lunar calendar converter.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LunarError {
    /// The input is not a valid Gregorian date.
    #[error(transparent)]
    InvalidDateFormat(#[from] InvalidDateFormat),

    /// The date lies outside the range covered by the lunar table.
    #[error("date {0} is outside the supported lunar range")]
    OutOfRange(CalendarDate),
}

impl LunarError {
    /// Whether this error only means "no lunar data for this date".
    ///
    /// Display code should render nothing for such dates instead of reporting a failure.
    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::OutOfRange(_))
    }
}
