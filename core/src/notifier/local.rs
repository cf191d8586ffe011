// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use jiff::{SignedDuration, Timestamp};
use uuid::Uuid;

use crate::localdb::notifications::{NotificationRecord, Notifications};
use crate::notifier::{DeliveryError, Notifier, ScheduleHandle};
use crate::reminder::{Notification, NotificationData, Trigger};

const PREFIX: &str = "local";

/// How long delivered notifications are kept before they are purged.
const RETENTION: SignedDuration = SignedDuration::from_hours(7 * 24);

/// Keeps notifications in the local database until a front end picks them up.
#[derive(Debug, Clone)]
pub struct LocalOutbox {
    store: Notifications,
}

impl LocalOutbox {
    pub fn new(store: Notifications) -> Self {
        Self { store }
    }

    /// Notifications that should be shown at `now`, oldest first.
    pub async fn due(&self, now: Timestamp) -> Result<Vec<PendingNotification>, DeliveryError> {
        let records = self.store.due(now.as_second()).await.map_err(unavailable)?;
        records.into_iter().map(PendingNotification::try_from).collect()
    }

    /// Marks a notification as shown, so it is not returned by [`Self::due`] again.
    ///
    /// Notifications delivered more than a week before `at` are purged on the way.
    pub async fn mark_delivered(
        &self,
        handle: &ScheduleHandle,
        at: Timestamp,
    ) -> Result<bool, DeliveryError> {
        let marked = self
            .store
            .mark_delivered(handle.as_str(), at.as_second())
            .await
            .map_err(unavailable)?;

        let cutoff = at.as_second().saturating_sub(RETENTION.as_secs());
        let purged = self.store.purge_delivered(cutoff).await.map_err(unavailable)?;
        if purged > 0 {
            tracing::debug!(purged, "purged delivered notifications");
        }
        Ok(marked)
    }
}

#[async_trait]
impl Notifier for LocalOutbox {
    async fn schedule(&self, notification: &Notification) -> Result<ScheduleHandle, DeliveryError> {
        let handle = ScheduleHandle::with_prefix(PREFIX, Uuid::new_v4());
        let data = serde_json::to_string(&notification.data)
            .map_err(|e| DeliveryError::Rejected(e.to_string()))?;
        let deliver_at = match notification.trigger {
            Trigger::Now => None,
            Trigger::At(at) => Some(at.as_second()),
        };

        let record = NotificationRecord {
            handle: handle.as_str().to_string(),
            event_id: notification.data.event_id,
            title: notification.title.clone(),
            body: notification.body.clone(),
            data,
            deliver_at,
            delivered_at: None,
        };
        self.store.insert(&record).await.map_err(unavailable)?;

        tracing::debug!(%handle, ?deliver_at, "notification queued locally");
        Ok(handle)
    }

    async fn cancel(&self, handle: &ScheduleHandle) -> Result<(), DeliveryError> {
        let removed = self.store.delete(handle.as_str()).await.map_err(unavailable)?;
        if !removed {
            tracing::debug!(%handle, "notification already gone");
        }
        Ok(())
    }

    fn owns(&self, handle: &ScheduleHandle) -> bool {
        handle.strip_prefix(PREFIX).is_some()
    }
}

/// A locally queued notification awaiting display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingNotification {
    pub handle: ScheduleHandle,
    pub title: String,
    pub body: String,
    pub data: NotificationData,
    /// `None` when it was queued for immediate delivery.
    pub deliver_at: Option<Timestamp>,
}

impl TryFrom<NotificationRecord> for PendingNotification {
    type Error = DeliveryError;

    fn try_from(record: NotificationRecord) -> Result<Self, Self::Error> {
        let data = serde_json::from_str(&record.data).map_err(|e| {
            DeliveryError::Rejected(format!("corrupt notification {}: {e}", record.handle))
        })?;
        let deliver_at = record
            .deliver_at
            .map(Timestamp::from_second)
            .transpose()
            .map_err(|e| {
                DeliveryError::Rejected(format!("corrupt notification {}: {e}", record.handle))
            })?;

        Ok(Self {
            handle: ScheduleHandle::new(record.handle),
            title: record.title,
            body: record.body,
            data,
            deliver_at,
        })
    }
}

fn unavailable(err: sqlx::Error) -> DeliveryError {
    DeliveryError::Unavailable(format!("local outbox: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::localdb::LocalDb;
    use crate::reminder::REMINDER_SCREEN;

    async fn setup_outbox() -> LocalOutbox {
        let db = LocalDb::open(None)
            .await
            .expect("Failed to create test database");
        LocalOutbox::new(db.notifications)
    }

    fn notification(trigger: Trigger) -> Notification {
        Notification {
            title: "Event reminder".to_string(),
            body: "Standup starts in 15 min".to_string(),
            trigger,
            data: NotificationData {
                event_id: 7,
                date: "2024-02-10".to_string(),
                screen: REMINDER_SCREEN.to_string(),
            },
        }
    }

    fn ts(s: &str) -> Timestamp {
        s.parse().unwrap()
    }

    #[tokio::test]
    async fn local_outbox_issues_local_handles() {
        let outbox = setup_outbox().await;

        let handle = outbox.schedule(&notification(Trigger::Now)).await.unwrap();

        assert!(handle.as_str().starts_with("local:"));
        assert!(outbox.owns(&handle));
        assert!(!outbox.owns(&ScheduleHandle::new("push:abc")));
    }

    #[tokio::test]
    async fn local_outbox_releases_deferred_notifications_on_time() {
        // Arrange
        let outbox = setup_outbox().await;
        let at = ts("2024-02-10T02:45:00Z");
        let handle = outbox.schedule(&notification(Trigger::At(at))).await.unwrap();

        // Act
        let early = outbox.due(ts("2024-02-10T02:44:59Z")).await.unwrap();
        let on_time = outbox.due(at).await.unwrap();

        // Assert
        assert!(early.is_empty());
        assert_eq!(on_time.len(), 1);
        let pending = &on_time[0];
        assert_eq!(pending.handle, handle);
        assert_eq!(pending.deliver_at, Some(at));
        assert_eq!(pending.data.event_id, 7);
        assert_eq!(pending.data.screen, "ViewEvents");
    }

    #[tokio::test]
    async fn local_outbox_immediate_notifications_are_due_at_once() {
        let outbox = setup_outbox().await;
        outbox.schedule(&notification(Trigger::Now)).await.unwrap();

        let due = outbox.due(ts("1970-01-01T00:00:00Z")).await.unwrap();
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].deliver_at, None);
    }

    #[tokio::test]
    async fn local_outbox_mark_delivered_hides_notification() {
        let outbox = setup_outbox().await;
        let handle = outbox.schedule(&notification(Trigger::Now)).await.unwrap();
        let now = ts("2024-02-10T01:00:00Z");

        assert!(outbox.mark_delivered(&handle, now).await.unwrap());
        assert!(outbox.due(now).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn local_outbox_purges_notifications_delivered_long_ago() {
        // Arrange
        let db = LocalDb::open(None)
            .await
            .expect("Failed to create test database");
        let outbox = LocalOutbox::new(db.notifications.clone());
        let old = outbox.schedule(&notification(Trigger::Now)).await.unwrap();
        let new = outbox.schedule(&notification(Trigger::Now)).await.unwrap();
        outbox.mark_delivered(&old, ts("2024-02-01T00:00:00Z")).await.unwrap();

        // Act
        outbox.mark_delivered(&new, ts("2024-02-10T00:00:00Z")).await.unwrap();

        // Assert
        assert!(db.notifications.get(old.as_str()).await.unwrap().is_none());
        let kept = db.notifications.get(new.as_str()).await.unwrap().unwrap();
        assert_eq!(kept.delivered_at, Some(ts("2024-02-10T00:00:00Z").as_second()));
    }

    #[tokio::test]
    async fn local_outbox_cancel_removes_and_tolerates_missing() {
        let outbox = setup_outbox().await;
        let handle = outbox.schedule(&notification(Trigger::Now)).await.unwrap();

        outbox.cancel(&handle).await.unwrap();
        outbox.cancel(&handle).await.unwrap();

        assert!(outbox.due(ts("2030-01-01T00:00:00Z")).await.unwrap().is_empty());
    }
}
