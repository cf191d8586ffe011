// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{borrow::Cow, fmt};

use colored::{Color, Colorize};
use jiff::civil::Weekday;
use lunacal_core::DayInfo;
use lunacal_lunar::{CalendarDate, HolidayKind};

use crate::event_formatter::{EventColumn, EventFormatter};
use crate::table::{PaddingDirection, Table, TableColumn, TableStyleBasic, TableStyleJson};
use crate::util::OutputFormat;

/// Renders a single day in detail.
#[derive(Debug)]
pub struct DayFormatter {
    format: OutputFormat,
}

impl DayFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format<'a>(&'a self, day: &'a DayInfo) -> DayDisplay<'a> {
        DayDisplay {
            day,
            format: self.format,
        }
    }
}

#[derive(Debug)]
pub struct DayDisplay<'a> {
    day: &'a DayInfo,
    format: OutputFormat,
}

impl fmt::Display for DayDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let day = self.day;
        match self.format {
            OutputFormat::Json => {
                let events: Vec<_> = day
                    .events
                    .iter()
                    .map(|e| {
                        serde_json::json!({
                            "id": e.id,
                            "title": e.title,
                            "start": e.start.to_string(),
                            "end": e.end.to_string(),
                        })
                    })
                    .collect();
                let value = serde_json::json!({
                    "date": day.date.to_string(),
                    "weekday": weekday_name(day.date),
                    "lunar": day.lunar.as_ref().map(|l| l.full_label()),
                    "solar_term": day.solar_term.map(|t| t.name_zh()),
                    "holiday": day.holiday.map(|h| h.name_zh()),
                    "events": events,
                });
                let json = serde_json::to_string_pretty(&value).map_err(|_| fmt::Error)?;
                writeln!(f, "{json}")
            }

            OutputFormat::Table => {
                writeln!(
                    f,
                    "{} {}",
                    day.date.to_string().bold(),
                    weekday_name(day.date)
                )?;
                if let Some(lunar) = &day.lunar {
                    writeln!(f, "{}", lunar.full_label())?;
                }
                if let Some(holiday) = day.holiday {
                    let label = format!("{} {}", holiday.name_zh(), holiday.name_en());
                    writeln!(f, "{}", label.color(holiday_color(holiday.kind())))?;
                }
                if let Some(term) = day.solar_term {
                    let label = format!("{} {}", term.name_zh(), term.name_en());
                    writeln!(f, "{}", label.green())?;
                }

                if day.events.is_empty() {
                    writeln!(f, "{}", "No events".italic())
                } else {
                    writeln!(f)?;
                    let formatter = EventFormatter::new(vec![
                        EventColumn::Id,
                        EventColumn::TimeRange,
                        EventColumn::Title,
                    ]);
                    write!(f, "{}", formatter.format(&day.events))
                }
            }
        }
    }
}

/// Renders every day of a month, one row per day.
#[derive(Debug)]
pub struct MonthFormatter {
    today: CalendarDate,
    format: OutputFormat,
}

impl MonthFormatter {
    pub fn new(today: CalendarDate, format: OutputFormat) -> Self {
        Self { today, format }
    }

    pub fn format<'a>(&'a self, days: &'a [DayInfo]) -> MonthDisplay<'a> {
        MonthDisplay {
            days,
            formatter: self,
        }
    }
}

#[derive(Debug)]
pub struct MonthDisplay<'a> {
    days: &'a [DayInfo],
    formatter: &'a MonthFormatter,
}

impl fmt::Display for MonthDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let today = self.formatter.today;
        let columns = [
            DayColumn::Date(today),
            DayColumn::Weekday,
            DayColumn::Lunar,
            DayColumn::Festival,
            DayColumn::Events,
        ];
        match self.formatter.format {
            OutputFormat::Json => write!(
                f,
                "{}",
                Table::new(TableStyleJson::new(), columns.as_slice(), self.days)
            ),
            OutputFormat::Table => write!(
                f,
                "{}",
                Table::new(TableStyleBasic::new().with_header(), columns.as_slice(), self.days)
            ),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum DayColumn {
    /// Highlights the given day.
    Date(CalendarDate),
    Weekday,
    Lunar,
    Festival,
    Events,
}

impl TableColumn<DayInfo> for DayColumn {
    fn name(&self) -> Cow<'_, str> {
        match self {
            DayColumn::Date(_) => "Date",
            DayColumn::Weekday => "Weekday",
            DayColumn::Lunar => "Lunar",
            DayColumn::Festival => "Festival",
            DayColumn::Events => "Events",
        }
        .into()
    }

    fn format<'a>(&self, day: &'a DayInfo) -> Cow<'a, str> {
        match self {
            DayColumn::Date(_) => day.date.to_string().into(),
            DayColumn::Weekday => weekday_name(day.date).into(),
            DayColumn::Lunar => day
                .lunar
                .as_ref()
                .map_or_else(|| "-".to_string(), |l| l.short_label())
                .into(),
            DayColumn::Festival => {
                let holiday = day.holiday.map(|h| h.name_zh());
                let term = day.solar_term.map(|t| t.name_zh());
                match (holiday, term) {
                    (Some(h), Some(t)) => format!("{h} {t}").into(),
                    (Some(a), None) | (None, Some(a)) => a.into(),
                    (None, None) => "".into(),
                }
            }
            DayColumn::Events => match day.events.len() {
                0 => "".into(),
                n => n.to_string().into(),
            },
        }
    }

    fn padding_direction(&self) -> PaddingDirection {
        match self {
            DayColumn::Events => PaddingDirection::Right,
            _ => PaddingDirection::Left,
        }
    }

    fn color(&self, day: &DayInfo) -> Option<Color> {
        match self {
            DayColumn::Date(today) if day.date == *today => Some(Color::Cyan),
            DayColumn::Festival => match (day.holiday, day.solar_term) {
                (Some(h), _) => Some(holiday_color(h.kind())),
                (None, Some(_)) => Some(Color::Green),
                (None, None) => None,
            },
            _ => None,
        }
    }
}

fn holiday_color(kind: HolidayKind) -> Color {
    match kind {
        HolidayKind::Traditional => Color::Red,
        HolidayKind::International => Color::Magenta,
    }
}

fn weekday_name(date: CalendarDate) -> &'static str {
    match date.weekday() {
        Weekday::Monday => "Mon",
        Weekday::Tuesday => "Tue",
        Weekday::Wednesday => "Wed",
        Weekday::Thursday => "Thu",
        Weekday::Friday => "Fri",
        Weekday::Saturday => "Sat",
        Weekday::Sunday => "Sun",
    }
}
