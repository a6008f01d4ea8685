use colored::Color;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Severity/category of a human readable log line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogLevel {
    Started,
    Completed,
    Failed,
    Skipped,
    Output,
    Title,
    Rollback,
    Retry,
    Prompt,
    Paused,
}

lazy_static::lazy_static! {
    pub static ref DEFAULT_ICONS: BTreeMap<LogLevel, &'static str> = {
        let mut icons = BTreeMap::new();
        icons.insert(LogLevel::Started, "▶");
        icons.insert(LogLevel::Completed, "✓");
        icons.insert(LogLevel::Failed, "⨯");
        icons.insert(LogLevel::Skipped, "↓");
        icons.insert(LogLevel::Output, "→");
        icons.insert(LogLevel::Title, "•");
        icons.insert(LogLevel::Rollback, "←");
        icons.insert(LogLevel::Retry, "↻");
        icons.insert(LogLevel::Prompt, "?");
        icons.insert(LogLevel::Paused, "■");
        icons
    };
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Started => "STARTED",
            LogLevel::Completed => "COMPLETED",
            LogLevel::Failed => "FAILED",
            LogLevel::Skipped => "SKIPPED",
            LogLevel::Output => "OUTPUT",
            LogLevel::Title => "TITLE",
            LogLevel::Rollback => "ROLLBACK",
            LogLevel::Retry => "RETRY",
            LogLevel::Prompt => "PROMPT",
            LogLevel::Paused => "PAUSED",
        }
    }

    /// Levels written to STDERR unless configured otherwise.
    pub fn default_stderr() -> Vec<LogLevel> {
        vec![LogLevel::Failed, LogLevel::Rollback, LogLevel::Retry]
    }

    pub fn color(&self) -> Option<Color> {
        match self {
            LogLevel::Started | LogLevel::Skipped => Some(Color::Yellow),
            LogLevel::Completed => Some(Color::Green),
            LogLevel::Failed => Some(Color::Red),
            LogLevel::Rollback => Some(Color::BrightRed),
            LogLevel::Retry | LogLevel::Paused => Some(Color::BrightYellow),
            LogLevel::Prompt => Some(Color::Cyan),
            LogLevel::Output | LogLevel::Title => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
