// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use lunacal_core::{ClockTime, LeadTime};
use lunacal_lunar::CalendarDate;

/// The output format for commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Json,
    #[default]
    Table,
}

/// Parses a day given on the command line.
///
/// Accepts `today`, `tomorrow`, `yesterday`, `YYYY-MM-DD`, or `MM-DD` in the current year.
pub fn parse_date(today: CalendarDate, s: &str) -> Result<CalendarDate, Box<dyn Error>> {
    let s = s.trim();
    let relative = match s {
        "today" => Some(0),
        "tomorrow" => Some(1),
        "yesterday" => Some(-1),
        _ => None,
    };
    if let Some(days) = relative {
        return today
            .checked_add_days(days)
            .ok_or_else(|| format!("Date out of range: {s}").into());
    }

    if let Ok(date) = s.parse() {
        return Ok(date);
    }

    if let Some((month, day)) = s.split_once('-')
        && let (Ok(month), Ok(day)) = (month.parse(), day.parse())
    {
        return Ok(CalendarDate::new(today.year(), month, day)?);
    }

    Err(format!("Invalid date `{s}`. Expected YYYY-MM-DD, MM-DD, today, tomorrow or yesterday").into())
}

/// Parses a `YYYY-MM` month into its first day.
pub fn parse_month(s: &str) -> Result<CalendarDate, Box<dyn Error>> {
    let invalid = || format!("Invalid month `{s}`. Expected YYYY-MM");
    let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
    let year = year.parse().map_err(|_| invalid())?;
    let month = month.parse().map_err(|_| invalid())?;
    Ok(CalendarDate::new(year, month, 1)?)
}

/// Parses a start or end time, strict `HH:MM` first, then the loose digit form.
pub fn parse_time(s: &str) -> Result<ClockTime, Box<dyn Error>> {
    match s.parse() {
        Ok(t) => Ok(t),
        Err(_) => Ok(ClockTime::parse_loose(s)?),
    }
}

/// Parses a reminder lead time: `none`, `start`, or minutes before the start.
pub fn parse_lead_time(s: &str) -> Result<LeadTime, String> {
    match s.trim() {
        "none" | "off" => Ok(LeadTime::None),
        "start" => Ok(LeadTime::AtStart),
        s => s
            .parse::<i64>()
            .map(|m| LeadTime::from_minutes(Some(m)))
            .map_err(|_| format!("Invalid reminder `{s}`. Expected minutes, `start` or `none`")),
    }
}
