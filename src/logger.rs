use crate::drains::{Drain, StdioDrain, Stream};
use crate::level::{LogLevel, DEFAULT_ICONS};
use colored::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LoggerOptions {
    /// Print level icons instead of `[LEVEL]` labels.
    pub use_icons: bool,
    /// Levels routed to STDERR.
    pub to_stderr: Vec<LogLevel>,
    /// Icon overrides, merged over the default icon set.
    pub icons: BTreeMap<LogLevel, String>,
}

impl Default for LoggerOptions {
    fn default() -> Self {
        Self {
            use_icons: false,
            to_stderr: LogLevel::default_stderr(),
            icons: BTreeMap::new(),
        }
    }
}

/// A bracketed field printed before or after a log line. Only printed when
/// `condition` holds.
#[derive(Clone, Debug, PartialEq)]
pub struct LogField {
    pub text: String,
    pub condition: bool,
}

impl LogField {
    pub fn new<S: Into<String>>(text: S) -> Self {
        Self {
            text: text.into(),
            condition: true,
        }
    }

    pub fn when(mut self, condition: bool) -> Self {
        self.condition = condition;
        self
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct LogEntryOptions {
    pub prefix: Vec<LogField>,
    pub suffix: Vec<LogField>,
}

impl LogEntryOptions {
    pub fn with_prefix(mut self, field: LogField) -> Self {
        self.prefix.push(field);
        self
    }

    pub fn with_suffix(mut self, field: LogField) -> Self {
        self.suffix.push(field);
        self
    }
}

/// Formats leveled lines and hands them to a [`Drain`].
#[derive(Clone)]
pub struct Logger {
    options: LoggerOptions,
    icons: BTreeMap<LogLevel, String>,
    drain: Arc<dyn Drain>,
}

impl Logger {
    pub fn new(options: LoggerOptions, drain: Arc<dyn Drain>) -> Self {
        let mut icons: BTreeMap<LogLevel, String> = DEFAULT_ICONS
            .iter()
            .map(|(level, icon)| (*level, icon.to_string()))
            .collect();
        icons.extend(options.icons.clone());

        Self {
            options,
            icons,
            drain,
        }
    }

    pub fn stdio(options: LoggerOptions) -> Self {
        Self::new(options, Arc::new(StdioDrain::new()))
    }

    pub fn options(&self) -> &LoggerOptions {
        &self.options
    }

    pub fn log(&self, level: LogLevel, message: &str, entry: &LogEntryOptions) {
        if let Some(formatted) = self.format(level, message, entry) {
            let stream = if self.options.to_stderr.contains(&level) {
                Stream::Stderr
            } else {
                Stream::Stdout
            };
            self.drain.write_line(stream, &formatted);
        }
    }

    pub fn to_stdout(&self, line: &str) {
        self.drain.write_line(Stream::Stdout, line);
    }

    pub fn to_stderr(&self, line: &str) {
        self.drain.write_line(Stream::Stderr, line);
    }

    /// Every non blank line of `message` gets the label and the fields.
    /// `None` when there is nothing left to print.
    pub fn format(&self, level: LogLevel, message: &str, entry: &LogEntryOptions) -> Option<String> {
        let label = self.label(level);
        let prefix = render_fields(&entry.prefix);
        let suffix = render_fields(&entry.suffix);

        let lines = message
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| {
                let mut parts = vec![];
                if !prefix.is_empty() {
                    parts.push(prefix.clone());
                }
                parts.push(label.clone());
                parts.push(line.to_string());
                if !suffix.is_empty() {
                    parts.push(suffix.clone());
                }
                parts.join(" ")
            })
            .collect::<Vec<String>>();

        if lines.is_empty() {
            None
        } else {
            Some(lines.join("\n"))
        }
    }

    fn label(&self, level: LogLevel) -> String {
        let label = if self.options.use_icons {
            self.icons
                .get(&level)
                .cloned()
                .unwrap_or_else(|| format!("[{}]", level))
        } else {
            format!("[{}]", level)
        };

        match level.color() {
            Some(color) => label.color(color).to_string(),
            None => label,
        }
    }
}

fn render_fields(fields: &[LogField]) -> String {
    fields
        .iter()
        .filter(|f| f.condition && !f.text.is_empty())
        .map(|f| format!("[{}]", f.text).dimmed().to_string())
        .collect::<Vec<String>>()
        .join(" ")
}
