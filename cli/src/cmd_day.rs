// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use clap::{ArgMatches, Command, arg};
use lunacal_core::Calendar;

use crate::arg::CommonArgs;
use crate::day_formatter::{DayFormatter, MonthFormatter};
use crate::util::{OutputFormat, parse_date, parse_month};

#[derive(Debug, Clone, Default)]
pub struct CmdDay {
    pub date: Option<String>,
    pub output_format: OutputFormat,
}

impl CmdDay {
    pub const NAME: &str = "day";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("d")
            .about("Show a day: lunar date, solar term, holiday and events")
            .arg(arg!([DATE] "The day to show (YYYY-MM-DD, MM-DD, today, tomorrow), defaults to today"))
            .arg(CommonArgs::output_format())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            date: matches.get_one("DATE").cloned(),
            output_format: CommonArgs::get_output_format(matches),
        }
    }

    pub async fn run(self, calendar: &mut Calendar) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "showing day...");
        let date = match &self.date {
            Some(date) => parse_date(calendar.today(), date)?,
            None => calendar.today(),
        };

        let info = calendar.day_info(date).await?;
        let formatter = DayFormatter::new(self.output_format);
        print!("{}", formatter.format(&info));
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdMonth {
    pub month: Option<String>,
    pub output_format: OutputFormat,
}

impl CmdMonth {
    pub const NAME: &str = "month";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("m")
            .about("Show every day of a month with its lunar date and festivals")
            .arg(arg!([MONTH] "The month to show (YYYY-MM), defaults to the current month"))
            .arg(CommonArgs::output_format())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            month: matches.get_one("MONTH").cloned(),
            output_format: CommonArgs::get_output_format(matches),
        }
    }

    pub async fn run(self, calendar: &mut Calendar) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "showing month...");
        let today = calendar.today();
        let first = match &self.month {
            Some(month) => parse_month(month)?,
            None => today.first_of_month(),
        };

        let days = calendar.month_info(first).await?;
        let formatter = MonthFormatter::new(today, self.output_format);
        print!("{}", formatter.format(&days));
        Ok(())
    }
}
