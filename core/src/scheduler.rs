// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use jiff::Zoned;

use crate::notifier::{DeliveryError, Notifier, ScheduleHandle};
use crate::reminder::{Notification, ReminderPlan, ReminderSpec, classify};

/// Turns reminder requests into notifications for a delivery collaborator.
#[derive(Debug, Clone)]
pub struct Scheduler<N> {
    notifier: N,
}

impl<N: Notifier> Scheduler<N> {
    pub fn new(notifier: N) -> Self {
        Self { notifier }
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Schedules the reminder of an event.
    ///
    /// Returns `None` when the event wants no reminder; the collaborator is not contacted then.
    /// A reminder whose time has already passed is delivered at once with a late notice.
    #[tracing::instrument(skip_all, fields(event_id = spec.event_id, lead = %spec.lead))]
    pub async fn schedule_reminder(
        &self,
        spec: &ReminderSpec,
        now: &Zoned,
    ) -> Result<Option<ScheduleHandle>, DeliveryError> {
        let plan = classify(spec, now)
            .map_err(|e| DeliveryError::Rejected(format!("invalid reminder time: {e}")))?;

        let Some(notification) = Notification::for_plan(spec, plan) else {
            tracing::debug!("no reminder requested");
            return Ok(None);
        };

        match plan {
            ReminderPlan::Deferred { at } => tracing::debug!(%at, "scheduling reminder"),
            ReminderPlan::Immediate { missed } => {
                tracing::info!(%missed, "reminder time passed, notifying now");
            }
            ReminderPlan::Suppressed => {}
        }

        let handle = self.notifier.schedule(&notification).await?;
        Ok(Some(handle))
    }

    /// Cancels a scheduled reminder. Does nothing without a handle.
    pub async fn cancel(&self, handle: Option<&ScheduleHandle>) -> Result<(), DeliveryError> {
        match handle {
            Some(handle) => {
                tracing::debug!(%handle, "cancelling reminder");
                self.notifier.cancel(handle).await
            }
            None => Ok(()),
        }
    }
}
