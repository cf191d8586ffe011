// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;
use std::fmt;
use std::sync::Arc;

use jiff::Zoned;
use jiff::tz::TimeZone;
use lunacal_lunar::{CalendarDate, Holiday, LunarDate, SolarTerm, resolve_holiday, to_lunar};
use tokio::fs;

use crate::event::{Event, EventDraft, EventPatch};
use crate::localdb::LocalDb;
use crate::notifier::{
    DeliveryError, Fallback, LocalOutbox, Notifier, PendingNotification, PushNotifier,
    ScheduleHandle,
};
use crate::scheduler::Scheduler;
use crate::{Config, Pager};

const DB_FILE: &str = "lunacal.db";

/// Lunar calendar application core.
pub struct Calendar {
    now: Zoned,
    tz: TimeZone,
    config: Config,
    db: LocalDb,
    outbox: LocalOutbox,
    scheduler: Scheduler<Arc<dyn Notifier>>,
}

impl fmt::Debug for Calendar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Calendar")
            .field("now", &self.now)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Calendar {
    /// Creates a new calendar with the given configuration.
    ///
    /// Reminders go to the push relay when one is configured, falling back to the local outbox
    /// when the relay cannot be reached. Otherwise they stay in the local outbox.
    pub async fn new(config: Config) -> Result<Self, Box<dyn Error>> {
        Self::build(config, |config, outbox| {
            let notifier: Arc<dyn Notifier> = match &config.push {
                Some(push) => {
                    tracing::info!(base_url = %push.base_url, "delivering reminders via push relay");
                    let push = PushNotifier::new(push.clone())
                        .map_err(|e| format!("Failed to set up push relay: {e}"))?;
                    Arc::new(Fallback::new(push, outbox))
                }
                None => Arc::new(outbox),
            };
            Ok(notifier)
        })
        .await
    }

    /// Creates a new calendar that delivers reminders through `notifier`.
    pub async fn with_notifier(
        config: Config,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, Box<dyn Error>> {
        Self::build(config, |_, _| Ok(notifier)).await
    }

    async fn build<F>(mut config: Config, notifier: F) -> Result<Self, Box<dyn Error>>
    where
        F: FnOnce(&Config, LocalOutbox) -> Result<Arc<dyn Notifier>, Box<dyn Error>>,
    {
        config.normalize()?;
        let tz = config.time_zone()?;
        let now = Zoned::now().with_time_zone(tz.clone());

        prepare(&config).await?;
        let db_path = config.state_dir.as_ref().map(|a| a.join(DB_FILE));
        let db = LocalDb::open(db_path.as_deref())
            .await
            .map_err(|e| format!("Failed to initialize db: {e}"))?;

        let outbox = LocalOutbox::new(db.notifications.clone());
        let scheduler = Scheduler::new(notifier(&config, outbox.clone())?);
        Ok(Self {
            now,
            tz,
            config,
            db,
            outbox,
            scheduler,
        })
    }

    /// The current time of the calendar.
    pub fn now(&self) -> &Zoned {
        &self.now
    }

    /// Refresh the current time to now.
    pub fn refresh_now(&mut self) {
        self.now = Zoned::now().with_time_zone(self.tz.clone());
    }

    /// Pins the current time, converted to the calendar's time zone.
    pub fn set_now(&mut self, now: &Zoned) {
        self.now = now.with_time_zone(self.tz.clone());
    }

    /// The time zone events are interpreted in.
    pub fn time_zone(&self) -> &TimeZone {
        &self.tz
    }

    /// Today in the calendar's time zone.
    pub fn today(&self) -> CalendarDate {
        CalendarDate::from_date(self.now.date())
    }

    /// Create a default event draft based on the configuration.
    pub fn default_event_draft(&self) -> EventDraft {
        EventDraft::default(&self.now, self.config.default_reminder.0)
    }

    /// Add a new event from the given draft, scheduling its reminder.
    #[tracing::instrument(skip_all)]
    pub async fn new_event(&self, draft: EventDraft) -> Result<SavedEvent, Box<dyn Error>> {
        draft.validate(&self.now)?;

        let record = draft.clone().into_event(0, None).to_record();
        let id = self.db.events.insert(&record).await?;
        let mut event = draft.into_event(id, None);
        tracing::debug!(id, "event created");

        let reminder_error = self.schedule(&mut event).await?;
        Ok(SavedEvent {
            event,
            reminder_error,
        })
    }

    /// Update an event, rescheduling its reminder.
    ///
    /// The pending reminder is cancelled before the replacement is scheduled. A refused
    /// cancellation counts as done, since the relay no longer holds the reminder. If the
    /// collaborator cannot be reached, nothing is changed.
    #[tracing::instrument(skip(self, patch))]
    pub async fn update_event(
        &self,
        id: i64,
        patch: EventPatch,
    ) -> Result<SavedEvent, Box<dyn Error>> {
        let old = self.get_event(id).await?.ok_or("Event not found")?;

        let mut draft = EventDraft::from(&old);
        patch.apply_to(&mut draft);
        draft.validate(&self.now)?;

        self.cancel_reminder(old.schedule_handle.as_ref())
            .await
            .map_err(|e| format!("Failed to cancel the previous reminder: {e}"))?;

        let mut event = draft.into_event(id, None);
        self.db.events.update(&event.to_record()).await?;
        tracing::debug!(id, "event updated");

        let reminder_error = self.schedule(&mut event).await?;
        Ok(SavedEvent {
            event,
            reminder_error,
        })
    }

    /// Delete an event and cancel its reminder. Returns `false` if there was no such event.
    ///
    /// Cancellation follows the same rules as [`Self::update_event`].
    #[tracing::instrument(skip(self))]
    pub async fn delete_event(&self, id: i64) -> Result<bool, Box<dyn Error>> {
        let Some(event) = self.get_event(id).await? else {
            return Ok(false);
        };

        self.cancel_reminder(event.schedule_handle.as_ref())
            .await
            .map_err(|e| format!("Failed to cancel the reminder: {e}"))?;

        Ok(self.db.events.delete(id).await?)
    }

    /// Get an event by id.
    pub async fn get_event(&self, id: i64) -> Result<Option<Event>, Box<dyn Error>> {
        self.db
            .events
            .get(id)
            .await?
            .map(Event::try_from)
            .transpose()
    }

    /// List events between two days, both inclusive.
    pub async fn list_events(
        &self,
        from: CalendarDate,
        to: CalendarDate,
        pager: &Pager,
    ) -> Result<Vec<Event>, Box<dyn Error>> {
        self.db
            .events
            .list_by_date_range(from, to, pager)
            .await?
            .into_iter()
            .map(Event::try_from)
            .collect()
    }

    /// Count events between two days, both inclusive.
    pub async fn count_events(
        &self,
        from: CalendarDate,
        to: CalendarDate,
    ) -> Result<i64, Box<dyn Error>> {
        Ok(self.db.events.count_by_date_range(from, to).await?)
    }

    /// Everything known about a day.
    pub async fn day_info(&self, date: CalendarDate) -> Result<DayInfo, Box<dyn Error>> {
        let count = self.count_events(date, date).await?;
        let events = self
            .list_events(date, date, &Pager::from((count, 0)))
            .await?;
        Ok(DayInfo::new(date, events))
    }

    /// Everything known about each day of the month containing `date`.
    pub async fn month_info(&self, date: CalendarDate) -> Result<Vec<DayInfo>, Box<dyn Error>> {
        let first = date.first_of_month();
        let last = first
            .checked_add_days(i64::from(first.days_in_month()) - 1)
            .ok_or("Month out of range")?;

        let count = self.count_events(first, last).await?;
        let mut events = self
            .list_events(first, last, &Pager::from((count, 0)))
            .await?
            .into_iter()
            .peekable();

        let mut days = Vec::with_capacity(usize::try_from(first.days_in_month()).unwrap_or(31));
        let mut day = first;
        while day <= last {
            let mut of_day = Vec::new();
            while let Some(event) = events.next_if(|e| e.date == day) {
                of_day.push(event);
            }
            days.push(DayInfo::new(day, of_day));
            day = match day.checked_add_days(1) {
                Some(next) => next,
                None => break,
            };
        }
        Ok(days)
    }

    /// Locally queued notifications that are due now.
    pub async fn due_notifications(&self) -> Result<Vec<PendingNotification>, Box<dyn Error>> {
        Ok(self.outbox.due(self.now.timestamp()).await?)
    }

    /// Mark a locally queued notification as shown.
    pub async fn mark_delivered(&self, handle: &ScheduleHandle) -> Result<bool, Box<dyn Error>> {
        Ok(self
            .outbox
            .mark_delivered(handle, self.now.timestamp())
            .await?)
    }

    /// Close the calendar, releasing the database.
    pub async fn close(self) -> Result<(), Box<dyn Error>> {
        self.db.close().await
    }

    /// Cancels a reminder, treating a refusal as already gone.
    ///
    /// Only an unreachable collaborator is an error: the reminder may still fire then.
    async fn cancel_reminder(&self, handle: Option<&ScheduleHandle>) -> Result<(), DeliveryError> {
        match self.scheduler.cancel(handle).await {
            Err(DeliveryError::Rejected(reason)) => {
                tracing::warn!(
                    handle = ?handle.map(ScheduleHandle::as_str),
                    %reason,
                    "reminder cancellation refused, dropping handle"
                );
                Ok(())
            }
            result => result,
        }
    }

    /// Schedules the reminder of a stored event and records its handle.
    ///
    /// A delivery failure leaves the event without a handle and is handed back to the caller.
    async fn schedule(&self, event: &mut Event) -> Result<Option<DeliveryError>, Box<dyn Error>> {
        match self
            .scheduler
            .schedule_reminder(&event.reminder_spec(), &self.now)
            .await
        {
            Ok(handle) => {
                if let Some(handle) = &handle
                    && let Err(err) = self
                        .db
                        .events
                        .set_schedule_handle(event.id, Some(handle.as_str()))
                        .await
                {
                    // An unrecorded handle could never be cancelled, so withdraw it.
                    if let Err(cancel_err) = self.scheduler.cancel(Some(handle)).await {
                        tracing::warn!(
                            %handle,
                            err = %cancel_err,
                            "failed to withdraw unrecorded reminder"
                        );
                    }
                    return Err(err.into());
                }
                event.schedule_handle = handle;
                Ok(None)
            }
            Err(err) => {
                tracing::warn!(id = event.id, %err, "failed to schedule reminder");
                Ok(Some(err))
            }
        }
    }
}

/// An event that was saved, with the outcome of scheduling its reminder.
#[derive(Debug, Clone)]
pub struct SavedEvent {
    /// The stored event.
    pub event: Event,

    /// Why the reminder could not be scheduled. The event is saved regardless.
    pub reminder_error: Option<DeliveryError>,
}

/// A day with its lunar date, solar term, holiday and events.
#[derive(Debug, Clone)]
pub struct DayInfo {
    /// The Gregorian day.
    pub date: CalendarDate,

    /// The lunar date, `None` outside the supported range.
    pub lunar: Option<LunarDate>,

    /// The solar term starting on this day, if any.
    pub solar_term: Option<SolarTerm>,

    /// The holiday on this day, if any.
    pub holiday: Option<Holiday>,

    /// Events on this day, in chronological order.
    pub events: Vec<Event>,
}

impl DayInfo {
    fn new(date: CalendarDate, events: Vec<Event>) -> Self {
        let lunar = to_lunar(date)
            .inspect_err(|e| tracing::debug!(%date, err = %e, "no lunar date"))
            .ok();
        Self {
            date,
            lunar,
            solar_term: SolarTerm::on(date),
            holiday: resolve_holiday(date),
            events,
        }
    }
}

async fn prepare(config: &Config) -> Result<(), Box<dyn Error>> {
    if let Some(state_dir) = &config.state_dir {
        tracing::info!(path = %state_dir.display(), "ensuring state directory exists");
        fs::create_dir_all(state_dir)
            .await
            .map_err(|e| format!("Failed to create state directory: {e}"))?;
    }
    Ok(())
}
