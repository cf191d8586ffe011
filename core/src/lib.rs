// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Core of the lunar calendar: the event store, reminder scheduling and the calendar facade.

#![warn(
    trivial_casts,
    trivial_numeric_casts,
    missing_debug_implementations,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications,
    clippy::dbg_macro,
    clippy::indexing_slicing
)]

mod calendar;
mod config;
mod datetime;
mod event;
mod localdb;
mod notifier;
mod reminder;
mod scheduler;
mod types;

pub use crate::calendar::{Calendar, DayInfo, SavedEvent};
pub use crate::config::{APP_NAME, Config, ConfigReminder};
pub use crate::datetime::{ClockTime, InvalidTimeFormat};
pub use crate::event::{Event, EventDraft, EventPatch, InvalidEvent};
pub use crate::notifier::{
    DeliveryError, Fallback, LocalOutbox, Notifier, PendingNotification, PushNotifier,
    ScheduleHandle,
};
pub use crate::reminder::{
    LeadTime, Notification, NotificationData, REMINDER_SCREEN, ReminderPlan, ReminderSpec,
    Trigger, classify,
};
pub use crate::scheduler::Scheduler;
pub use crate::types::Pager;
