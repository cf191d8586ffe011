// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use clap::{ArgMatches, Command, arg};
use colored::Colorize;
use lunacal_core::{Calendar, PendingNotification};

use crate::arg::CommonArgs;
use crate::util::OutputFormat;

/// Shows the reminders in the local outbox that are due, then marks them as delivered.
#[derive(Debug, Clone)]
pub struct CmdRemind {
    pub peek: bool,
    pub output_format: OutputFormat,
}

impl CmdRemind {
    pub const NAME: &str = "remind";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Show due reminders from the local outbox")
            .arg(arg!(--peek "Show due reminders without marking them as delivered"))
            .arg(CommonArgs::output_format())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            peek: matches.get_flag("peek"),
            output_format: CommonArgs::get_output_format(matches),
        }
    }

    pub async fn run(self, calendar: &mut Calendar) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "collecting due reminders...");
        let due = calendar.due_notifications().await?;

        match self.output_format {
            OutputFormat::Json => println!("{}", to_json(&due)?),
            OutputFormat::Table if due.is_empty() => {
                println!("{}", "No reminders due".italic());
            }
            OutputFormat::Table => {
                for notification in &due {
                    println!("🔔 {} {}", notification.title.bold(), notification.body);
                }
            }
        }

        if !self.peek {
            for notification in &due {
                if !calendar.mark_delivered(&notification.handle).await? {
                    tracing::warn!(handle = %notification.handle, "reminder was already delivered");
                }
            }
        }
        Ok(())
    }
}

fn to_json(due: &[PendingNotification]) -> Result<String, serde_json::Error> {
    let items: Vec<_> = due
        .iter()
        .map(|n| {
            serde_json::json!({
                "handle": n.handle.as_str(),
                "title": n.title,
                "body": n.body,
                "event_id": n.data.event_id,
                "date": n.data.date,
                "deliver_at": n.deliver_at.map(|t| t.to_string()),
            })
        })
        .collect();
    serde_json::to_string_pretty(&items)
}
