// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use jiff::Zoned;
use lunacal_lunar::CalendarDate;

use crate::datetime::ClockTime;
use crate::localdb::events::EventRecord;
use crate::notifier::ScheduleHandle;
use crate::reminder::{LeadTime, ReminderSpec};

/// A stored event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    /// Identifier assigned by the store.
    pub id: i64,

    /// The title of the event.
    pub title: String,

    /// Free-form description, empty when none.
    pub description: String,

    /// Day the event takes place.
    pub date: CalendarDate,

    /// Start time of the event.
    pub start: ClockTime,

    /// End time of the event, after the start.
    pub end: ClockTime,

    /// When to be reminded.
    pub reminder: LeadTime,

    /// Handle of the scheduled reminder, if one is pending.
    pub schedule_handle: Option<ScheduleHandle>,
}

impl Event {
    /// What the scheduler needs to know to remind about this event.
    pub fn reminder_spec(&self) -> ReminderSpec {
        ReminderSpec {
            event_id: self.id,
            title: self.title.clone(),
            date: self.date,
            start: self.start,
            lead: self.reminder,
        }
    }

    pub(crate) fn to_record(&self) -> EventRecord {
        EventRecord {
            id: self.id,
            title: self.title.clone(),
            description: self.description.clone(),
            date: self.date.to_string(),
            start_time: self.start.to_string(),
            end_time: self.end.to_string(),
            reminder: self.reminder.as_minutes(),
            schedule_handle: self.schedule_handle.as_ref().map(|h| h.as_str().to_string()),
        }
    }
}

impl TryFrom<EventRecord> for Event {
    type Error = Box<dyn Error>;

    fn try_from(record: EventRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: record.id,
            date: record
                .date
                .parse()
                .map_err(|e| format!("Corrupt date of event {}: {e}", record.id))?,
            start: record
                .start_time
                .parse()
                .map_err(|e| format!("Corrupt start of event {}: {e}", record.id))?,
            end: record
                .end_time
                .parse()
                .map_err(|e| format!("Corrupt end of event {}: {e}", record.id))?,
            reminder: LeadTime::from_minutes(Some(record.reminder)),
            schedule_handle: record.schedule_handle.map(ScheduleHandle::new),
            title: record.title,
            description: record.description,
        })
    }
}

/// Draft for an event, used for creating new events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDraft {
    /// The title of the event.
    pub title: String,

    /// The description of the event.
    pub description: String,

    /// Day of the event.
    pub date: CalendarDate,

    /// Start time.
    pub start: ClockTime,

    /// End time.
    pub end: ClockTime,

    /// Reminder lead time.
    pub reminder: LeadTime,
}

impl EventDraft {
    /// Creates an empty draft starting at the next full or half hour, lasting one hour.
    pub(crate) fn default(now: &Zoned, reminder: LeadTime) -> Self {
        const DAY: u16 = 24 * 60;
        let today = CalendarDate::from_date(now.date());
        let minutes =
            u16::from(now.hour().unsigned_abs()) * 60 + u16::from(now.minute().unsigned_abs());
        let next = (minutes / 30 + 1) * 30;

        let (date, start) = if next >= DAY {
            (today.checked_add_days(1).unwrap_or(today), 0)
        } else {
            (today, next)
        };
        let end = (start + 60).min(DAY - 1);

        Self {
            title: String::new(),
            description: String::new(),
            date,
            start: from_minutes(start),
            end: from_minutes(end),
            reminder,
        }
    }

    /// Checks the draft can be saved at `now`.
    ///
    /// # Errors
    ///
    /// Returns the first rule the draft breaks.
    pub fn validate(&self, now: &Zoned) -> Result<(), InvalidEvent> {
        if self.title.trim().is_empty() {
            return Err(InvalidEvent::EmptyTitle);
        }
        if self.end <= self.start {
            return Err(InvalidEvent::EndNotAfterStart {
                start: self.start,
                end: self.end,
            });
        }
        let starts_at = self
            .start
            .instant_on(self.date, now.time_zone())
            .map_err(|_| InvalidEvent::StartInPast {
                date: self.date,
                start: self.start,
            })?;
        if starts_at < now.timestamp() {
            return Err(InvalidEvent::StartInPast {
                date: self.date,
                start: self.start,
            });
        }
        Ok(())
    }

    pub(crate) fn into_event(self, id: i64, schedule_handle: Option<ScheduleHandle>) -> Event {
        Event {
            id,
            title: self.title.trim().to_string(),
            description: self.description,
            date: self.date,
            start: self.start,
            end: self.end,
            reminder: self.reminder,
            schedule_handle,
        }
    }
}

impl From<&Event> for EventDraft {
    fn from(event: &Event) -> Self {
        Self {
            title: event.title.clone(),
            description: event.description.clone(),
            date: event.date,
            start: event.start,
            end: event.end,
            reminder: event.reminder,
        }
    }
}

fn from_minutes(minutes: u16) -> ClockTime {
    // Callers keep `minutes` below one day.
    #[allow(clippy::cast_possible_truncation)]
    ClockTime::new((minutes / 60) as u8, (minutes % 60) as u8).unwrap_or(ClockTime::MIDNIGHT)
}

/// Patch for an event, allowing partial updates.
#[derive(Debug, Default, Clone)]
pub struct EventPatch {
    /// The title of the event, if changed.
    pub title: Option<String>,

    /// The description of the event; `Some(None)` clears it.
    pub description: Option<Option<String>>,

    /// The day of the event, if changed.
    pub date: Option<CalendarDate>,

    /// The start time, if changed.
    pub start: Option<ClockTime>,

    /// The end time, if changed.
    pub end: Option<ClockTime>,

    /// The reminder lead time, if changed.
    pub reminder: Option<LeadTime>,
}

impl EventPatch {
    /// Is this patch empty, meaning no fields are set
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.date.is_none()
            && self.start.is_none()
            && self.end.is_none()
            && self.reminder.is_none()
    }

    /// Applies the patch to a draft, modifying it in place.
    pub fn apply_to<'a>(&self, draft: &'a mut EventDraft) -> &'a mut EventDraft {
        if let Some(title) = &self.title {
            draft.title.clone_from(title);
        }
        if let Some(description) = &self.description {
            draft.description = description.clone().unwrap_or_default();
        }
        if let Some(date) = self.date {
            draft.date = date;
        }
        if let Some(start) = self.start {
            draft.start = start;
        }
        if let Some(end) = self.end {
            draft.end = end;
        }
        if let Some(reminder) = self.reminder {
            draft.reminder = reminder;
        }
        draft
    }
}

/// Why an event cannot be saved.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidEvent {
    #[error("the title must not be empty")]
    EmptyTitle,

    #[error("the end time {end} must be after the start time {start}")]
    EndNotAfterStart { start: ClockTime, end: ClockTime },

    #[error("the start {date} {start} is in the past")]
    StartInPast { date: CalendarDate, start: ClockTime },
}
