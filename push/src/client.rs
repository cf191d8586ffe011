// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use crate::config::PushConfig;
use crate::error::PushError;
use crate::http::HttpClient;
use crate::message::{CancelRequest, Envelope, PushMessage, SendRequest, Ticket, TicketId};

/// Push relay client.
#[derive(Debug)]
pub struct PushClient {
    http: HttpClient,
    config: PushConfig,
}

impl PushClient {
    /// Creates a new client.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is unusable.
    pub fn new(config: PushConfig) -> Result<Self, PushError> {
        if config.device_token.trim().is_empty() {
            return Err(PushError::Config("device_token must not be empty".to_string()));
        }
        let http = HttpClient::new(&config)?;
        Ok(Self { http, config })
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &PushConfig {
        &self.config
    }

    /// Submits a message, returning the relay's ticket id.
    ///
    /// # Errors
    ///
    /// Returns an error if the relay is unreachable, answers with an error status, or refuses
    /// the message.
    #[tracing::instrument(skip_all, fields(scheduled_at = ?message.scheduled_at))]
    pub async fn send(&self, message: &PushMessage) -> Result<TicketId, PushError> {
        let body = SendRequest {
            to: &self.config.device_token,
            title: &message.title,
            body: &message.body,
            data: &message.data,
            priority: self.config.priority,
            scheduled_at: message.scheduled_at,
        };

        let req = self.http.post_json("send", &body);
        let resp = self.http.execute(req).await?;
        let envelope: Envelope<Ticket> = resp.json().await?;

        match envelope.data {
            Ticket::Ok { id } => {
                tracing::debug!(%id, "push message accepted");
                Ok(id)
            }
            Ticket::Error { message, details } => {
                tracing::warn!(%message, ?details, "push message rejected");
                Err(PushError::Rejected(message))
            }
        }
    }

    /// Cancels previously submitted messages that have not been delivered yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the relay is unreachable or answers with an error status.
    #[tracing::instrument(skip(self))]
    pub async fn cancel(&self, ids: &[TicketId]) -> Result<(), PushError> {
        if ids.is_empty() {
            return Ok(());
        }

        let req = self.http.post_json("cancel", &CancelRequest { ids });
        self.http.execute(req).await?;
        tracing::debug!(count = ids.len(), "push messages cancelled");
        Ok(())
    }
}
