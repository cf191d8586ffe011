// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Client for a remote push relay that delivers reminders to a device.
//!
//! The relay accepts JSON over HTTPS:
//!
//! - `POST {base_url}/send` with `{to, title, body, data, priority, scheduled_at?}`, answering
//!   with a ticket `{"data": {"status": "ok", "id": "..."}}`
//! - `POST {base_url}/cancel` with `{"ids": [...]}`

#![warn(
    trivial_casts,
    trivial_numeric_casts,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications,
    clippy::dbg_macro,
    clippy::indexing_slicing,
    clippy::pedantic
)]

mod client;
mod config;
mod error;
mod http;
mod message;

pub use crate::client::PushClient;
pub use crate::config::{AuthMethod, Priority, PushConfig};
pub use crate::error::PushError;
pub use crate::message::{PushMessage, TicketId};
