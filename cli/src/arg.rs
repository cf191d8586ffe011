// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use clap::{Arg, ArgMatches, arg, value_parser};
use lunacal_core::LeadTime;

use crate::util::{OutputFormat, parse_lead_time};

#[derive(Debug, Clone, Copy)]
pub struct CommonArgs;

impl CommonArgs {
    pub fn verbose() -> Arg {
        arg!(-v --verbose "Show more detailed information")
    }

    pub fn get_verbose(matches: &ArgMatches) -> bool {
        matches.get_flag("verbose")
    }

    pub fn output_format() -> Arg {
        arg!(--"output-format" <FORMAT> "Output format")
            .value_parser(value_parser!(OutputFormat))
            .default_value("table")
    }

    pub fn get_output_format(matches: &ArgMatches) -> OutputFormat {
        matches
            .get_one("output-format")
            .copied()
            .unwrap_or(OutputFormat::Table)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct EventArgs;

impl EventArgs {
    pub fn id() -> Arg {
        arg!(id: <ID> "The id of the event").value_parser(value_parser!(i64))
    }

    pub fn get_id(matches: &ArgMatches) -> i64 {
        matches.get_one::<i64>("id").copied().unwrap_or_default()
    }

    pub fn title(positional: bool) -> Arg {
        if positional {
            arg!(title: <TITLE> "Title of the event")
        } else {
            arg!(title: -t --title <TITLE> "Title of the event")
        }
    }

    pub fn get_title(matches: &ArgMatches) -> Option<String> {
        matches.get_one("title").cloned()
    }

    pub fn description() -> Arg {
        arg!(--description <DESCRIPTION> "Description of the event, empty to clear")
    }

    pub fn get_description(matches: &ArgMatches) -> Option<String> {
        matches.get_one("description").cloned()
    }

    pub fn date() -> Arg {
        arg!(-d --date <DATE> "Day of the event (YYYY-MM-DD, MM-DD, today, tomorrow)")
    }

    pub fn get_date(matches: &ArgMatches) -> Option<String> {
        matches.get_one("date").cloned()
    }

    pub fn start() -> Arg {
        arg!(--start <START> "Start time of the event (HH:MM)")
    }

    pub fn get_start(matches: &ArgMatches) -> Option<String> {
        matches.get_one("start").cloned()
    }

    pub fn end() -> Arg {
        arg!(--end <END> "End time of the event (HH:MM)")
    }

    pub fn get_end(matches: &ArgMatches) -> Option<String> {
        matches.get_one("end").cloned()
    }

    pub fn reminder() -> Arg {
        arg!(-r --reminder <REMINDER> "Minutes before the start to remind, `start` or `none`")
            .value_parser(parse_lead_time)
    }

    pub fn get_reminder(matches: &ArgMatches) -> Option<LeadTime> {
        matches.get_one("reminder").copied()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RangeArgs;

impl RangeArgs {
    pub fn from() -> Arg {
        arg!(--from <DATE> "First day to include, defaults to today")
    }

    pub fn get_from(matches: &ArgMatches) -> Option<String> {
        matches.get_one("from").cloned()
    }

    pub fn days() -> Arg {
        arg!(--days <DAYS> "Number of days to include")
            .value_parser(value_parser!(u16).range(1..))
            .default_value("30")
    }

    pub fn get_days(matches: &ArgMatches) -> u16 {
        matches.get_one("days").copied().unwrap_or(30)
    }
}
