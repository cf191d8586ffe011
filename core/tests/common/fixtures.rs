// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Test data factories for integration tests.

use std::path::Path;

use jiff::Zoned;
use lunacal_core::{Config, ConfigReminder, EventDraft, LeadTime};

/// A configuration keeping state under `state_dir`, with times in UTC.
#[must_use]
pub fn test_config(state_dir: &Path) -> Config {
    Config {
        state_dir: Some(state_dir.to_path_buf()),
        timezone: Some("UTC".to_string()),
        default_reminder: ConfigReminder(LeadTime::Before(10)),
        push: None,
    }
}

/// Spring Festival 2024, nine in the morning.
#[must_use]
pub fn fixed_now() -> Zoned {
    "2024-02-10T09:00:00+00:00[UTC]".parse().unwrap()
}

/// A draft on the day of [`fixed_now`].
#[must_use]
pub fn test_event_draft(title: &str, start: &str, end: &str, reminder: LeadTime) -> EventDraft {
    EventDraft {
        title: title.to_string(),
        description: String::new(),
        date: "2024-02-10".parse().unwrap(),
        start: start.parse().unwrap(),
        end: end.parse().unwrap(),
        reminder,
    }
}
