// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

/// Push relay authentication method.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(tag = "type")]
pub enum AuthMethod {
    /// No authentication.
    #[serde(rename = "none")]
    #[default]
    None,
    /// Bearer token authentication.
    #[serde(rename = "bearer")]
    Bearer {
        /// Bearer token.
        token: String,
    },
}

/// Delivery priority requested from the relay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Let the relay decide.
    Default,
    /// Normal priority.
    Normal,
    /// Wake the device.
    #[default]
    High,
}

/// Push relay configuration.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct PushConfig {
    /// Base URL of the relay, e.g. `https://push.example.com/api/v1`.
    pub base_url: String,
    /// Push token of the receiving device.
    pub device_token: String,
    /// Authentication method.
    #[serde(default)]
    pub auth: AuthMethod,
    /// Priority sent with every message.
    #[serde(default)]
    pub priority: Priority,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// User agent string.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

const fn default_timeout() -> u64 {
    10
}

fn default_user_agent() -> String {
    concat!("lunacal-push/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for PushConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            device_token: String::new(),
            auth: AuthMethod::default(),
            priority: Priority::default(),
            timeout_secs: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}
