// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

mod local;
mod push;

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::reminder::Notification;

pub use local::{LocalOutbox, PendingNotification};
pub use push::PushNotifier;

/// Opaque identifier of a scheduled notification, issued by the notifier that accepted it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScheduleHandle(String);

impl ScheduleHandle {
    /// Wraps a stored handle.
    pub fn new(handle: impl Into<String>) -> Self {
        Self(handle.into())
    }

    /// The raw handle.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub(crate) fn with_prefix(prefix: &str, id: impl fmt::Display) -> Self {
        Self(format!("{prefix}:{id}"))
    }

    pub(crate) fn strip_prefix(&self, prefix: &str) -> Option<&str> {
        self.0.strip_prefix(prefix)?.strip_prefix(':')
    }
}

impl fmt::Display for ScheduleHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Failure of a delivery collaborator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeliveryError {
    /// The collaborator could not be reached; another delivery path may still work.
    #[error("notification delivery unavailable: {0}")]
    Unavailable(String),

    /// The collaborator refused the request.
    #[error("notification delivery rejected: {0}")]
    Rejected(String),
}

impl DeliveryError {
    /// Whether a fallback collaborator is worth trying.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}

/// A delivery collaborator: something that can show a notification now or later.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Hands a notification over for delivery, returning a handle for cancellation.
    async fn schedule(&self, notification: &Notification) -> Result<ScheduleHandle, DeliveryError>;

    /// Cancels a notification that has not been delivered yet.
    async fn cancel(&self, handle: &ScheduleHandle) -> Result<(), DeliveryError>;

    /// Whether `handle` was issued by this notifier.
    fn owns(&self, _handle: &ScheduleHandle) -> bool {
        true
    }
}

#[async_trait]
impl<N: Notifier + ?Sized> Notifier for Arc<N> {
    async fn schedule(&self, notification: &Notification) -> Result<ScheduleHandle, DeliveryError> {
        (**self).schedule(notification).await
    }

    async fn cancel(&self, handle: &ScheduleHandle) -> Result<(), DeliveryError> {
        (**self).cancel(handle).await
    }

    fn owns(&self, handle: &ScheduleHandle) -> bool {
        (**self).owns(handle)
    }
}

/// Delivers through `primary`, falling back to `secondary` when the primary is unavailable.
///
/// Cancellation goes to whichever notifier issued the handle.
#[derive(Debug, Clone)]
pub struct Fallback<P, S> {
    primary: P,
    secondary: S,
}

impl<P: Notifier, S: Notifier> Fallback<P, S> {
    /// Creates a fallback chain.
    pub fn new(primary: P, secondary: S) -> Self {
        Self { primary, secondary }
    }
}

#[async_trait]
impl<P: Notifier, S: Notifier> Notifier for Fallback<P, S> {
    async fn schedule(&self, notification: &Notification) -> Result<ScheduleHandle, DeliveryError> {
        match self.primary.schedule(notification).await {
            Err(err) if err.is_unavailable() => {
                tracing::warn!(%err, "primary notifier unavailable, falling back");
                self.secondary.schedule(notification).await
            }
            result => result,
        }
    }

    async fn cancel(&self, handle: &ScheduleHandle) -> Result<(), DeliveryError> {
        if self.primary.owns(handle) {
            self.primary.cancel(handle).await
        } else {
            self.secondary.cancel(handle).await
        }
    }

    fn owns(&self, handle: &ScheduleHandle) -> bool {
        self.primary.owns(handle) || self.secondary.owns(handle)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::reminder::{NotificationData, Trigger};

    struct Scripted {
        prefix: &'static str,
        result: Result<(), DeliveryError>,
        calls: Mutex<Vec<String>>,
    }

    impl Scripted {
        fn new(prefix: &'static str, result: Result<(), DeliveryError>) -> Self {
            Self {
                prefix,
                result,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Notifier for Scripted {
        async fn schedule(&self, _: &Notification) -> Result<ScheduleHandle, DeliveryError> {
            self.calls.lock().unwrap().push("schedule".to_string());
            self.result
                .clone()
                .map(|()| ScheduleHandle::with_prefix(self.prefix, 1))
        }

        async fn cancel(&self, handle: &ScheduleHandle) -> Result<(), DeliveryError> {
            self.calls.lock().unwrap().push(format!("cancel {handle}"));
            Ok(())
        }

        fn owns(&self, handle: &ScheduleHandle) -> bool {
            handle.strip_prefix(self.prefix).is_some()
        }
    }

    fn notification() -> Notification {
        Notification {
            title: "t".to_string(),
            body: "b".to_string(),
            trigger: Trigger::Now,
            data: NotificationData {
                event_id: 1,
                date: "2024-02-10".to_string(),
                screen: "ViewEvents".to_string(),
            },
        }
    }

    #[test]
    fn handle_prefixes() {
        let handle = ScheduleHandle::with_prefix("push", "abc");
        assert_eq!(handle.as_str(), "push:abc");
        assert_eq!(handle.strip_prefix("push"), Some("abc"));
        assert_eq!(handle.strip_prefix("pus"), None);
        assert_eq!(handle.strip_prefix("local"), None);
    }

    #[tokio::test]
    async fn fallback_uses_primary_when_available() {
        let chain = Fallback::new(
            Arc::new(Scripted::new("push", Ok(()))),
            Arc::new(Scripted::new("local", Ok(()))),
        );
        let handle = chain.schedule(&notification()).await.unwrap();
        assert_eq!(handle.as_str(), "push:1");
        assert!(chain.secondary.calls().is_empty());
    }

    #[tokio::test]
    async fn fallback_switches_on_unavailable() {
        let chain = Fallback::new(
            Arc::new(Scripted::new("push", Err(DeliveryError::Unavailable("down".into())))),
            Arc::new(Scripted::new("local", Ok(()))),
        );
        let handle = chain.schedule(&notification()).await.unwrap();
        assert_eq!(handle.as_str(), "local:1");
        assert_eq!(chain.primary.calls(), ["schedule"]);
        assert_eq!(chain.secondary.calls(), ["schedule"]);
    }

    #[tokio::test]
    async fn fallback_does_not_mask_rejection() {
        let chain = Fallback::new(
            Arc::new(Scripted::new("push", Err(DeliveryError::Rejected("no".into())))),
            Arc::new(Scripted::new("local", Ok(()))),
        );
        let err = chain.schedule(&notification()).await.unwrap_err();
        assert_eq!(err, DeliveryError::Rejected("no".into()));
        assert!(chain.secondary.calls().is_empty());
    }

    #[tokio::test]
    async fn fallback_routes_cancel_by_owner() {
        let chain = Fallback::new(
            Arc::new(Scripted::new("push", Ok(()))),
            Arc::new(Scripted::new("local", Ok(()))),
        );
        chain.cancel(&ScheduleHandle::new("local:9")).await.unwrap();
        chain.cancel(&ScheduleHandle::new("push:8")).await.unwrap();
        assert_eq!(chain.primary.calls(), ["cancel push:8"]);
        assert_eq!(chain.secondary.calls(), ["cancel local:9"]);
    }
}
