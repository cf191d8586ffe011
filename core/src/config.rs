// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;
use std::fmt;
use std::path::{Path, PathBuf};

use jiff::SignedDuration;
use jiff::tz::TimeZone;
use lunacal_push::PushConfig;
use serde::de;

use crate::reminder::LeadTime;

/// The name of the application.
pub const APP_NAME: &str = "lunacal";

/// Configuration for the calendar.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct Config {
    /// Directory for storing application state. No directory keeps everything in memory.
    #[serde(default)]
    pub state_dir: Option<PathBuf>,

    /// IANA time zone name, e.g. `Asia/Shanghai`. Defaults to the system time zone.
    #[serde(default)]
    pub timezone: Option<String>,

    /// Reminder lead time for new events.
    #[serde(default)]
    pub default_reminder: ConfigReminder,

    /// Push relay settings. Without them, reminders are kept in the local outbox.
    #[serde(default)]
    pub push: Option<PushConfig>,
}

impl Config {
    /// Normalize the configuration.
    pub fn normalize(&mut self) -> Result<(), Box<dyn Error>> {
        match &self.state_dir {
            Some(a) => {
                self.state_dir = Some(
                    expand_path(a)
                        .map_err(|e| format!("Failed to expand state directory path: {e}"))?,
                );
            }

            None => match get_state_dir() {
                Ok(a) => self.state_dir = Some(a.join(APP_NAME)),
                Err(e) => tracing::warn!(err = %e, "failed to get state directory"),
            },
        }

        if let Some(push) = &self.push
            && push.device_token.trim().is_empty()
        {
            return Err("push.device_token must not be empty".into());
        }

        Ok(())
    }

    /// Resolves the configured time zone.
    pub fn time_zone(&self) -> Result<TimeZone, Box<dyn Error>> {
        match &self.timezone {
            Some(name) => {
                TimeZone::get(name).map_err(|e| format!("Unknown time zone `{name}`: {e}").into())
            }
            None => Ok(TimeZone::system()),
        }
    }
}

/// Reminder lead time as written in the config file: minutes, or a duration string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfigReminder(pub LeadTime);

impl<'de> serde::Deserialize<'de> for ConfigReminder {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct ReminderVisitor;

        impl de::Visitor<'_> for ReminderVisitor {
            type Value = ConfigReminder;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str(
                    r#"minutes before the start (negative for none), "none", or a duration like "HH:MM", "1h", "15m""#,
                )
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(ConfigReminder(LeadTime::from_minutes(Some(value))))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                let minutes = i64::try_from(value).map_err(de::Error::custom)?;
                self.visit_i64(minutes)
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                if matches!(value.trim(), "none" | "off") {
                    return Ok(ConfigReminder(LeadTime::None));
                }

                let duration = parse_duration(value).map_err(|e| de::Error::custom(e.to_string()))?;
                if duration.is_negative() {
                    return Err(de::Error::custom(format!(
                        "reminder lead time must not be negative: {value}"
                    )));
                }
                Ok(ConfigReminder(LeadTime::from_minutes(Some(
                    duration.as_mins(),
                ))))
            }
        }

        deserializer.deserialize_any(ReminderVisitor)
    }
}

/// Handle tilde (~) and environment variables in the path
fn expand_path(path: &Path) -> Result<PathBuf, Box<dyn Error>> {
    if path.is_absolute() {
        return Ok(path.to_owned());
    }

    let path = path.to_str().ok_or("Invalid path")?;

    let home_prefixes: &[&str] = if cfg!(unix) {
        &["~/", "$HOME/", "${HOME}/"]
    } else {
        &[r"~\", "~/", r"%UserProfile%\", r"%UserProfile%/"]
    };
    for prefix in home_prefixes {
        if let Some(stripped) = path.strip_prefix(prefix) {
            return Ok(get_home_dir()?.join(stripped));
        }
    }

    let state_prefixes: &[&str] = if cfg!(unix) {
        &["$XDG_STATE_HOME/", "${XDG_STATE_HOME}/"]
    } else {
        &[r"%LOCALAPPDATA%\", "%LOCALAPPDATA%/"]
    };
    for prefix in state_prefixes {
        if let Some(stripped) = path.strip_prefix(prefix) {
            return Ok(get_state_dir()?.join(stripped));
        }
    }

    Ok(path.into())
}

fn get_home_dir() -> Result<PathBuf, Box<dyn Error>> {
    dirs::home_dir().ok_or("User-specific home directory not found".into())
}

fn get_state_dir() -> Result<PathBuf, Box<dyn Error>> {
    #[cfg(unix)]
    let state_dir = xdg::BaseDirectories::new().get_state_home();
    #[cfg(windows)]
    let state_dir = dirs::data_local_dir();
    state_dir.ok_or("User-specific state directory not found".into())
}

/// Parse a duration string in the format "HH:MM" / "1d" / "24h" / "60m" / "1800s".
fn parse_duration(s: &str) -> Result<SignedDuration, Box<dyn Error>> {
    let s = s.trim();
    let seconds = if let Some((h, m)) = s.split_once(':') {
        let hours: i64 = h.trim().parse()?;
        let minutes: i64 = m.trim().parse()?;
        hours
            .checked_mul(60)
            .and_then(|a| a.checked_add(minutes))
            .and_then(|a| a.checked_mul(60))
    } else if let Some(rest) = s.strip_suffix('d') {
        rest.trim().parse::<i64>()?.checked_mul(24 * 60 * 60)
    } else if let Some(rest) = s.strip_suffix('h') {
        rest.trim().parse::<i64>()?.checked_mul(60 * 60)
    } else if let Some(rest) = s.strip_suffix('m') {
        rest.trim().parse::<i64>()?.checked_mul(60)
    } else if let Some(rest) = s.strip_suffix('s') {
        Some(rest.trim().parse::<i64>()?)
    } else {
        return Err(format!("Invalid duration format: {s}").into());
    };

    let seconds = seconds.ok_or_else(|| format!("Duration out of range: {s}"))?;
    Ok(SignedDuration::from_secs(seconds))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, serde::Deserialize)]
    struct Wrapper {
        core: Config,
    }

    fn parse(s: &str) -> Result<Config, toml::de::Error> {
        toml::from_str::<Wrapper>(s).map(|w| w.core)
    }

    #[test]
    fn test_expand_path_home_env() {
        let home = get_home_dir().unwrap();
        let home_prefixes: &[&str] = if cfg!(unix) {
            &["~", "$HOME", "${HOME}"]
        } else {
            &[r"~", r"%UserProfile%"]
        };
        for prefix in home_prefixes {
            let result = expand_path(&PathBuf::from(format!("{prefix}/lunacal"))).unwrap();
            assert_eq!(result, home.join("lunacal"));
            assert!(result.is_absolute());
        }
    }

    #[test]
    fn test_expand_path_absolute() {
        let absolute_path = PathBuf::from("/var/lib/lunacal");
        let result = expand_path(&absolute_path).unwrap();
        assert_eq!(result, absolute_path);
    }

    #[test]
    fn test_expand_path_relative() {
        let relative_path = PathBuf::from("relative/state");
        let result = expand_path(&relative_path).unwrap();
        assert_eq!(result, relative_path);
    }

    #[test]
    fn test_parse_duration_formats() {
        assert_eq!(parse_duration("01:30").unwrap(), SignedDuration::from_mins(90));
        assert_eq!(parse_duration("1d").unwrap(), SignedDuration::from_hours(24));
        assert_eq!(parse_duration("2h").unwrap(), SignedDuration::from_hours(2));
        assert_eq!(parse_duration("45m").unwrap(), SignedDuration::from_mins(45));
        assert_eq!(parse_duration("1800s").unwrap(), SignedDuration::from_mins(30));
    }

    #[test]
    fn test_parse_duration_out_of_range() {
        for s in ["999999999999999999h", "999999999999999999d", "153722867280912930:00"] {
            let err = parse_duration(s).unwrap_err();
            assert!(err.to_string().contains("out of range"), "{s}: {err}");
        }

        let config = parse("[core]\ndefault_reminder = \"999999999999999999h\"\n");
        assert!(config.is_err());
    }

    #[test]
    fn test_parse_duration_invalid_format() {
        assert!(parse_duration("abc").is_err());
        assert!(parse_duration("99x").is_err());
        assert!(parse_duration("12:xx").is_err());
        assert!(parse_duration("12").is_err());
    }

    #[test]
    fn test_config_defaults() {
        let config = parse("[core]\n").unwrap();
        assert_eq!(config.state_dir, None);
        assert_eq!(config.timezone, None);
        assert_eq!(config.default_reminder, ConfigReminder(LeadTime::None));
        assert!(config.push.is_none());
    }

    #[test]
    fn test_config_default_reminder_forms() {
        let cases = [
            ("15", LeadTime::Before(15)),
            ("0", LeadTime::AtStart),
            ("-1", LeadTime::None),
            (r#""none""#, LeadTime::None),
            (r#""1h""#, LeadTime::Before(60)),
            (r#""00:05""#, LeadTime::Before(5)),
            (r#""0m""#, LeadTime::AtStart),
        ];
        for (value, expected) in cases {
            let config = parse(&format!("[core]\ndefault_reminder = {value}\n")).unwrap();
            assert_eq!(config.default_reminder.0, expected, "{value}");
        }

        assert!(parse("[core]\ndefault_reminder = \"soon\"\n").is_err());
        assert!(parse("[core]\ndefault_reminder = \"-5m\"\n").is_err());
    }

    #[test]
    fn test_config_push_section() {
        let config = parse(
            r#"
[core]
timezone = "Asia/Shanghai"

[core.push]
base_url = "https://push.example.com/api/v1"
device_token = "device-1"
auth = { type = "bearer", token = "secret" }
"#,
        )
        .unwrap();

        let push = config.push.unwrap();
        assert_eq!(push.base_url, "https://push.example.com/api/v1");
        assert_eq!(push.timeout_secs, 10);
        assert_eq!(config.timezone.as_deref(), Some("Asia/Shanghai"));
    }

    #[test]
    fn test_config_normalize_rejects_blank_device_token() {
        let mut config = parse(
            r#"
[core]
state_dir = "/tmp/lunacal"

[core.push]
base_url = "https://push.example.com"
device_token = " "
"#,
        )
        .unwrap();
        assert!(config.normalize().is_err());
    }

    #[test]
    fn test_config_time_zone() {
        let config = Config {
            timezone: Some("Not/AZone".to_string()),
            ..Config::default()
        };
        assert!(config.time_zone().is_err());
        assert!(Config::default().time_zone().is_ok());
    }
}
