// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use jiff::{SignedDuration, Timestamp, Zoned};
use lunacal_lunar::CalendarDate;

use crate::datetime::ClockTime;

/// Screen the app opens when a reminder is tapped.
pub const REMINDER_SCREEN: &str = "ViewEvents";

/// How long before an event its reminder fires.
///
/// Stored as a single integer: negative means no reminder, `0` means at the start of the event
/// and a positive value is the number of minutes before the start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LeadTime {
    /// Do not remind.
    #[default]
    None,
    /// Remind exactly when the event starts.
    AtStart,
    /// Remind this many minutes before the event starts.
    Before(u32),
}

impl LeadTime {
    /// Interprets an optional minute count.
    #[must_use]
    pub fn from_minutes(minutes: Option<i64>) -> Self {
        match minutes {
            None => Self::None,
            Some(m) if m < 0 => Self::None,
            Some(0) => Self::AtStart,
            Some(m) => Self::Before(u32::try_from(m).unwrap_or(u32::MAX)),
        }
    }

    /// The storage form: `-1`, `0` or the minute count.
    #[must_use]
    pub fn as_minutes(self) -> i64 {
        match self {
            Self::None => -1,
            Self::AtStart => 0,
            Self::Before(m) => i64::from(m),
        }
    }

    /// Offset from the event start to the trigger, `None` when no reminder is wanted.
    #[must_use]
    pub fn offset(self) -> Option<SignedDuration> {
        match self {
            Self::None => None,
            Self::AtStart => Some(SignedDuration::ZERO),
            Self::Before(m) => Some(SignedDuration::from_mins(i64::from(m))),
        }
    }
}

impl fmt::Display for LeadTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("none"),
            Self::AtStart => f.write_str("at start"),
            Self::Before(m) => write!(f, "{m} min before"),
        }
    }
}

/// What to remind about, and when the event starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderSpec {
    /// Event the reminder belongs to.
    pub event_id: i64,
    /// Event title, shown in the notification.
    pub title: String,
    /// Day of the event.
    pub date: CalendarDate,
    /// Start time of the event.
    pub start: ClockTime,
    /// Lead time of the reminder.
    pub lead: LeadTime,
}

/// Outcome of classifying a reminder against the current time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderPlan {
    /// No reminder is wanted.
    Suppressed,
    /// The trigger instant is still ahead: deliver then.
    Deferred {
        /// When to deliver.
        at: Timestamp,
    },
    /// The trigger instant has already passed: deliver now, telling the user it is late.
    Immediate {
        /// The trigger instant that was missed.
        missed: Timestamp,
    },
}

/// Decides how a reminder is delivered.
///
/// The event start is resolved in `now`'s time zone. `now` is taken as given and never
/// re-sampled, so a caller gets one consistent decision per request.
///
/// # Errors
///
/// Returns an error if the trigger instant cannot be represented.
pub fn classify(spec: &ReminderSpec, now: &Zoned) -> Result<ReminderPlan, jiff::Error> {
    let Some(offset) = spec.lead.offset() else {
        return Ok(ReminderPlan::Suppressed);
    };

    let start = spec.start.instant_on(spec.date, now.time_zone())?;
    let trigger = start.checked_sub(offset)?;
    Ok(if trigger < now.timestamp() {
        ReminderPlan::Immediate { missed: trigger }
    } else {
        ReminderPlan::Deferred { at: trigger }
    })
}

/// When a notification is delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// As soon as possible.
    Now,
    /// At the given instant.
    At(Timestamp),
}

/// Payload attached to a notification, used to route the user when it is opened.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationData {
    /// Event the notification is about.
    pub event_id: i64,
    /// Day of the event, `YYYY-MM-DD`.
    pub date: String,
    /// Screen to open.
    pub screen: String,
}

/// A notification handed to a delivery collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Title line.
    pub title: String,
    /// Body text.
    pub body: String,
    /// When to deliver.
    pub trigger: Trigger,
    /// Routing payload.
    pub data: NotificationData,
}

impl Notification {
    /// Builds the notification for a plan, `None` when the plan is suppressed.
    #[must_use]
    pub fn for_plan(spec: &ReminderSpec, plan: ReminderPlan) -> Option<Self> {
        let (trigger, body) = match plan {
            ReminderPlan::Suppressed => return None,
            ReminderPlan::Deferred { at } => {
                let body = match spec.lead {
                    LeadTime::Before(m) => format!("{} starts in {m} min", spec.title),
                    LeadTime::AtStart | LeadTime::None => {
                        format!("{} is starting now", spec.title)
                    }
                };
                (Trigger::At(at), body)
            }
            ReminderPlan::Immediate { .. } => {
                let body = format!(
                    "Reminder time already passed: {} on {} at {}",
                    spec.title, spec.date, spec.start
                );
                (Trigger::Now, body)
            }
        };

        Some(Self {
            title: "Event reminder".to_string(),
            body,
            trigger,
            data: NotificationData {
                event_id: spec.event_id,
                date: spec.date.to_string(),
                screen: REMINDER_SCREEN.to_string(),
            },
        })
    }
}
