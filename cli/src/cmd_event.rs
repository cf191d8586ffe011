// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use clap::{ArgMatches, Command, arg, value_parser};
use colored::Colorize;
use lunacal_core::{Calendar, ClockTime, Event, EventPatch, LeadTime, Pager, SavedEvent};

use crate::arg::{CommonArgs, EventArgs, RangeArgs};
use crate::event_formatter::{EventColumn, EventFormatter};
use crate::util::{OutputFormat, parse_date, parse_time};

#[derive(Debug, Clone)]
pub struct CmdEventNew {
    pub title: String,
    pub description: Option<String>,
    pub date: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub reminder: Option<LeadTime>,

    pub output_format: OutputFormat,
    pub verbose: bool,
}

impl CmdEventNew {
    pub const NAME: &str = "new";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("add")
            .about("Add a new event")
            .arg(EventArgs::title(true))
            .arg(EventArgs::date())
            .arg(EventArgs::start())
            .arg(EventArgs::end())
            .arg(EventArgs::reminder())
            .arg(EventArgs::description())
            .arg(CommonArgs::output_format())
            .arg(CommonArgs::verbose())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            title: EventArgs::get_title(matches).unwrap_or_default(),
            description: EventArgs::get_description(matches),
            date: EventArgs::get_date(matches),
            start: EventArgs::get_start(matches),
            end: EventArgs::get_end(matches),
            reminder: EventArgs::get_reminder(matches),

            output_format: CommonArgs::get_output_format(matches),
            verbose: CommonArgs::get_verbose(matches),
        }
    }

    pub async fn run(self, calendar: &mut Calendar) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "adding new event...");
        let mut draft = calendar.default_event_draft();
        draft.title = self.title;
        if let Some(description) = self.description {
            draft.description = description;
        }
        if let Some(date) = &self.date {
            draft.date = parse_date(calendar.today(), date)?;
        }
        if let Some(reminder) = self.reminder {
            draft.reminder = reminder;
        }

        match (&self.start, &self.end) {
            (Some(start), Some(end)) => {
                draft.start = parse_time(start)?;
                draft.end = parse_time(end)?;
            }
            (Some(start), None) => {
                draft.start = parse_time(start)?;
                draft.end = one_hour_after(draft.start);
            }
            (None, Some(end)) => draft.end = parse_time(end)?,
            (None, None) => {}
        }

        let saved = calendar.new_event(draft).await?;
        print_saved(saved, self.output_format, self.verbose);
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdEventEdit {
    pub id: i64,
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub reminder: Option<LeadTime>,

    pub output_format: OutputFormat,
    pub verbose: bool,
}

impl CmdEventEdit {
    pub const NAME: &str = "edit";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Edit an event")
            .arg(EventArgs::id())
            .arg(EventArgs::title(false))
            .arg(EventArgs::date())
            .arg(EventArgs::start())
            .arg(EventArgs::end())
            .arg(EventArgs::reminder())
            .arg(EventArgs::description())
            .arg(CommonArgs::output_format())
            .arg(CommonArgs::verbose())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            id: EventArgs::get_id(matches),
            title: EventArgs::get_title(matches),
            description: EventArgs::get_description(matches),
            date: EventArgs::get_date(matches),
            start: EventArgs::get_start(matches),
            end: EventArgs::get_end(matches),
            reminder: EventArgs::get_reminder(matches),

            output_format: CommonArgs::get_output_format(matches),
            verbose: CommonArgs::get_verbose(matches),
        }
    }

    pub async fn run(self, calendar: &mut Calendar) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "editing event...");
        let patch = EventPatch {
            title: self.title,
            description: self.description.map(|d| (!d.is_empty()).then_some(d)),
            date: self
                .date
                .map(|d| parse_date(calendar.today(), &d))
                .transpose()?,
            start: self.start.as_deref().map(parse_time).transpose()?,
            end: self.end.as_deref().map(parse_time).transpose()?,
            reminder: self.reminder,
        };
        if patch.is_empty() {
            return Err("Nothing to update, pass at least one field to change".into());
        }

        let saved = calendar.update_event(self.id, patch).await?;
        print_saved(saved, self.output_format, self.verbose);
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdEventDelete {
    pub ids: Vec<i64>,
}

impl CmdEventDelete {
    pub const NAME: &str = "delete";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("rm")
            .about("Delete events and cancel their reminders")
            .arg(
                arg!(id: <ID> "The ids of the events to delete")
                    .value_parser(value_parser!(i64))
                    .num_args(1..),
            )
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            ids: matches
                .get_many::<i64>("id")
                .map(|ids| ids.copied().collect())
                .unwrap_or_default(),
        }
    }

    pub async fn run(self, calendar: &mut Calendar) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "deleting events...");
        for id in self.ids {
            if calendar.delete_event(id).await? {
                println!("Deleted event #{id}");
            } else {
                println!("{} event #{id} not found", "Warning:".yellow());
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdEventList {
    pub from: Option<String>,
    pub days: u16,
    pub output_format: OutputFormat,
    pub verbose: bool,
}

impl CmdEventList {
    pub const NAME: &str = "list";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("ls")
            .about("List upcoming events")
            .arg(RangeArgs::from())
            .arg(RangeArgs::days())
            .arg(CommonArgs::output_format())
            .arg(CommonArgs::verbose())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            from: RangeArgs::get_from(matches),
            days: RangeArgs::get_days(matches),
            output_format: CommonArgs::get_output_format(matches),
            verbose: CommonArgs::get_verbose(matches),
        }
    }

    pub async fn run(self, calendar: &mut Calendar) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "listing events...");
        const MAX: i64 = 128;

        let today = calendar.today();
        let from = match &self.from {
            Some(from) => parse_date(today, from)?,
            None => today,
        };
        let to = from
            .checked_add_days(i64::from(self.days) - 1)
            .ok_or("Date range out of bounds")?;

        let pager: Pager = (MAX, 0).into();
        let events = calendar.list_events(from, to, &pager).await?;
        if events.len() >= (MAX as usize) {
            let total = calendar.count_events(from, to).await?;
            if total > MAX {
                let prompt = format!("Displaying the {MAX}/{total} events");
                println!("{}", prompt.italic());
            }
        } else if events.is_empty() && self.output_format == OutputFormat::Table {
            println!("{}", "No events found".italic());
            return Ok(());
        }

        print_events(&events, self.output_format, self.verbose);
        Ok(())
    }
}

fn one_hour_after(start: ClockTime) -> ClockTime {
    let minutes = (start.minutes_of_day() + 60).min(23 * 60 + 59);
    #[allow(clippy::cast_possible_truncation)]
    ClockTime::new((minutes / 60) as u8, (minutes % 60) as u8).unwrap_or(start)
}

fn print_saved(saved: SavedEvent, output_format: OutputFormat, verbose: bool) {
    print_events(&[saved.event], output_format, verbose);
    if let Some(err) = saved.reminder_error {
        println!(
            "{} the event was saved but its reminder could not be scheduled: {err}",
            "Warning:".yellow()
        );
    }
}

fn print_events(events: &[Event], output_format: OutputFormat, verbose: bool) {
    let columns = if verbose {
        vec![
            EventColumn::Id,
            EventColumn::Date,
            EventColumn::TimeRange,
            EventColumn::Reminder,
            EventColumn::Title,
            EventColumn::Description,
        ]
    } else {
        vec![
            EventColumn::Id,
            EventColumn::Date,
            EventColumn::TimeRange,
            EventColumn::Title,
        ]
    };
    let formatter = EventFormatter::new(columns).with_output_format(output_format);
    print!("{}", formatter.format(events));
}
