// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::sync::Mutex;

use async_trait::async_trait;
use lunacal_core::{DeliveryError, Notification, Notifier, ScheduleHandle};

/// A notifier that records every call, in order.
#[derive(Debug, Default)]
pub struct Recorder {
    log: Mutex<Vec<String>>,
    notifications: Mutex<Vec<Notification>>,
    fail_schedule: Mutex<Option<DeliveryError>>,
    fail_cancel: Mutex<Option<DeliveryError>>,
}

#[allow(dead_code)]
impl Recorder {
    /// Calls so far, as `schedule <event id>` or `cancel <handle>`.
    pub fn log(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications.lock().unwrap().clone()
    }

    pub fn fail_schedule_with(&self, err: Option<DeliveryError>) {
        *self.fail_schedule.lock().unwrap() = err;
    }

    pub fn fail_cancel_with(&self, err: Option<DeliveryError>) {
        *self.fail_cancel.lock().unwrap() = err;
    }
}

#[async_trait]
impl Notifier for Recorder {
    async fn schedule(&self, notification: &Notification) -> Result<ScheduleHandle, DeliveryError> {
        let mut log = self.log.lock().unwrap();
        log.push(format!("schedule {}", notification.data.event_id));
        if let Some(err) = self.fail_schedule.lock().unwrap().clone() {
            return Err(err);
        }

        let mut notifications = self.notifications.lock().unwrap();
        notifications.push(notification.clone());
        Ok(ScheduleHandle::new(format!("rec:{}", notifications.len())))
    }

    async fn cancel(&self, handle: &ScheduleHandle) -> Result<(), DeliveryError> {
        self.log.lock().unwrap().push(format!("cancel {handle}"));
        match self.fail_cancel.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}
