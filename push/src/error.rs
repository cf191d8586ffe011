// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use thiserror::Error;

/// Push relay client errors.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum PushError {
    /// The relay could not be reached, or did not answer in time.
    #[error("push relay unreachable: {0}")]
    Transport(String),

    /// The relay answered with an error status code.
    #[error("push relay returned {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, for diagnostics.
        body: String,
    },

    /// The relay accepted the request but refused the message.
    #[error("push relay rejected the message: {0}")]
    Rejected(String),

    /// The relay answered with something that is not a ticket.
    #[error("invalid push relay response: {0}")]
    InvalidResponse(String),

    /// Configuration error.
    #[error("push configuration error: {0}")]
    Config(String),
}

impl PushError {
    /// Whether the failure happened before the relay could decide anything.
    ///
    /// Such failures may succeed through another delivery path; every other error is a
    /// definitive answer from the relay.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::Status { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

impl From<reqwest::Error> for PushError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Self::InvalidResponse(e.to_string())
        } else if e.is_builder() {
            Self::Config(e.to_string())
        } else {
            Self::Transport(e.to_string())
        }
    }
}
