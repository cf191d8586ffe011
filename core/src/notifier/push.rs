// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use lunacal_push::{PushClient, PushConfig, PushError, PushMessage, TicketId};

use crate::notifier::{DeliveryError, Notifier, ScheduleHandle};
use crate::reminder::{Notification, Trigger};

const PREFIX: &str = "push";

/// Delivers notifications through the remote push relay.
#[derive(Debug)]
pub struct PushNotifier {
    client: PushClient,
}

impl PushNotifier {
    pub fn new(config: PushConfig) -> Result<Self, PushError> {
        Ok(Self {
            client: PushClient::new(config)?,
        })
    }
}

#[async_trait]
impl Notifier for PushNotifier {
    async fn schedule(&self, notification: &Notification) -> Result<ScheduleHandle, DeliveryError> {
        let data = serde_json::to_value(&notification.data)
            .map_err(|e| DeliveryError::Rejected(e.to_string()))?;
        let mut message =
            PushMessage::new(&notification.title, &notification.body).with_data(data);
        if let Trigger::At(at) = notification.trigger {
            message = message.scheduled_at(at);
        }

        let ticket = self.client.send(&message).await.map_err(to_delivery_error)?;
        Ok(ScheduleHandle::with_prefix(PREFIX, ticket))
    }

    async fn cancel(&self, handle: &ScheduleHandle) -> Result<(), DeliveryError> {
        let Some(id) = handle.strip_prefix(PREFIX) else {
            return Err(DeliveryError::Rejected(format!(
                "not a push handle: {handle}"
            )));
        };
        self.client
            .cancel(&[TicketId::new(id)])
            .await
            .map_err(to_delivery_error)
    }

    fn owns(&self, handle: &ScheduleHandle) -> bool {
        handle.strip_prefix(PREFIX).is_some()
    }
}

fn to_delivery_error(err: PushError) -> DeliveryError {
    if err.is_transport() {
        DeliveryError::Unavailable(err.to_string())
    } else {
        DeliveryError::Rejected(err.to_string())
    }
}
