use chrono::prelude::*;
use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use std::time::SystemTime;

/// Appends the task runtime to completion lines.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimerPreset {
    /// Suffix is dropped when `false`, e.g. to keep timers configured but
    /// hidden for a subtree.
    pub condition: bool,
}

impl Default for TimerPreset {
    fn default() -> Self {
        Self { condition: true }
    }
}

impl TimerPreset {
    pub fn format(&self, duration_ms: u64) -> String {
        parse_timer(duration_ms)
    }
}

/// Prefixes every line with the time it was logged at.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TimestampPreset {
    pub format: TimestampFormat,
}

impl TimestampPreset {
    pub fn prefix(&self, at: SystemTime) -> Option<String> {
        format_timestamp(at, self.format)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[allow(clippy::upper_case_acronyms)]
pub enum TimestampFormat {
    UTC,
    Local,
    None,
    Redacted,
}

impl Default for TimestampFormat {
    fn default() -> Self {
        TimestampFormat::Local
    }
}

pub fn format_timestamp(at: SystemTime, format: TimestampFormat) -> Option<String> {
    match format {
        TimestampFormat::None => None,
        TimestampFormat::Redacted => Some(" ".to_string()), // for testing
        TimestampFormat::Local => {
            let datetime: DateTime<Local> = at.into();
            let rounded = datetime.round_subsecs(0);
            Some(rounded.format("%I:%M:%S%p").to_string())
        }
        TimestampFormat::UTC => {
            let datetime: DateTime<Utc> = at.into();
            let rounded = datetime.round_subsecs(0);
            Some(format!("{:?}", rounded))
        }
    }
}

/// Human readable duration: tenths of a second below one second, otherwise
/// minutes and whole seconds.
///
///   200    => 0.2s
///   1500   => 1s
///   65000  => 1m5s
pub fn parse_timer(duration_ms: u64) -> String {
    let seconds = duration_ms / 1000;
    let minutes = seconds / 60;

    if seconds == 0 {
        return format!("0.{}s", duration_ms / 100);
    }

    if minutes > 0 {
        format!("{}m{}s", minutes, seconds % 60)
    } else {
        format!("{}s", seconds)
    }
}

/// Time left until `resume_at` (unix ms). `None` once that point has passed.
pub fn format_countdown(resume_at: i64, now: i64) -> Option<String> {
    match resume_at.checked_sub(now) {
        Some(remaining) if remaining > 0 => Some(parse_timer(remaining as u64)),
        _ => None,
    }
}

pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}
