// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::config::Priority;

/// A message to deliver to the configured device.
#[derive(Debug, Clone, PartialEq)]
pub struct PushMessage {
    /// Notification title.
    pub title: String,
    /// Notification body.
    pub body: String,
    /// Arbitrary payload handed to the app when the notification is opened.
    pub data: serde_json::Value,
    /// Delivery instant; `None` delivers immediately.
    pub scheduled_at: Option<Timestamp>,
}

impl PushMessage {
    /// Creates an immediate message without payload.
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            data: serde_json::Value::Null,
            scheduled_at: None,
        }
    }

    /// Attaches a payload.
    #[must_use]
    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = data;
        self
    }

    /// Defers delivery to `at`.
    #[must_use]
    pub fn scheduled_at(mut self, at: Timestamp) -> Self {
        self.scheduled_at = Some(at);
        self
    }
}

/// Identifier of an accepted message, used for cancellation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TicketId(String);

impl TicketId {
    /// Wraps a raw ticket id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw ticket id.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Body of `POST /send`.
#[derive(Debug, Serialize)]
pub(crate) struct SendRequest<'a> {
    pub to: &'a str,
    pub title: &'a str,
    pub body: &'a str,
    pub data: &'a serde_json::Value,
    pub priority: Priority,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_at: Option<Timestamp>,
}

/// Body of `POST /cancel`.
#[derive(Debug, Serialize)]
pub(crate) struct CancelRequest<'a> {
    pub ids: &'a [TicketId],
}

/// Response envelope of the relay.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    pub data: T,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub(crate) enum Ticket {
    Ok {
        id: TicketId,
    },
    Error {
        message: String,
        #[serde(default)]
        details: Option<serde_json::Value>,
    },
}
