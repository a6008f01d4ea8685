use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Partial message payload carried by a task.
///
/// The scheduler only sets the fields that changed; a task keeps the merged
/// result of every message it emitted.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rollback: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry: Option<RetryMessage>,
    /// Unix timestamp (ms) at which a paused task resumes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paused: Option<i64>,
    /// Task runtime in ms, set right before completion.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RetryMessage {
    pub count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Name of a single message field, used by allow-lists.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageField {
    Error,
    Skip,
    Rollback,
    Retry,
    Paused,
    Duration,
}

impl MessageField {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageField::Error => "error",
            MessageField::Skip => "skip",
            MessageField::Rollback => "rollback",
            MessageField::Retry => "retry",
            MessageField::Paused => "paused",
            MessageField::Duration => "duration",
        }
    }
}

impl fmt::Display for MessageField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One present field of a [`TaskMessage`].
#[derive(Clone, Debug, PartialEq)]
pub enum MessageEntry {
    Error(String),
    Skip(String),
    Rollback(String),
    Retry(RetryMessage),
    Paused { resume_at: i64 },
    Duration { ms: u64 },
}

impl MessageEntry {
    pub fn field(&self) -> MessageField {
        match self {
            MessageEntry::Error(_) => MessageField::Error,
            MessageEntry::Skip(_) => MessageField::Skip,
            MessageEntry::Rollback(_) => MessageField::Rollback,
            MessageEntry::Retry(_) => MessageField::Retry,
            MessageEntry::Paused { .. } => MessageField::Paused,
            MessageEntry::Duration { .. } => MessageField::Duration,
        }
    }

    /// Text fields set to an empty string carry nothing to report.
    pub fn is_blank(&self) -> bool {
        match self {
            MessageEntry::Error(s) | MessageEntry::Skip(s) | MessageEntry::Rollback(s) => s.is_empty(),
            _ => false,
        }
    }
}

impl TaskMessage {
    pub fn error<S: Into<String>>(error: S) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::default()
        }
    }

    pub fn skip<S: Into<String>>(reason: S) -> Self {
        Self {
            skip: Some(reason.into()),
            ..Self::default()
        }
    }

    pub fn rollback<S: Into<String>>(reason: S) -> Self {
        Self {
            rollback: Some(reason.into()),
            ..Self::default()
        }
    }

    pub fn retry(count: u32) -> Self {
        Self {
            retry: Some(RetryMessage { count, error: None }),
            ..Self::default()
        }
    }

    pub fn paused(resume_at: i64) -> Self {
        Self {
            paused: Some(resume_at),
            ..Self::default()
        }
    }

    pub fn duration(ms: u64) -> Self {
        Self {
            duration: Some(ms),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    pub fn get(&self, field: MessageField) -> Option<MessageEntry> {
        match field {
            MessageField::Error => self.error.clone().map(MessageEntry::Error),
            MessageField::Skip => self.skip.clone().map(MessageEntry::Skip),
            MessageField::Rollback => self.rollback.clone().map(MessageEntry::Rollback),
            MessageField::Retry => self.retry.clone().map(MessageEntry::Retry),
            MessageField::Paused => self.paused.map(|resume_at| MessageEntry::Paused { resume_at }),
            MessageField::Duration => self.duration.map(|ms| MessageEntry::Duration { ms }),
        }
    }

    /// Overwrite fields with the ones present in `partial`.
    pub fn merge(&mut self, partial: &TaskMessage) {
        if partial.error.is_some() {
            self.error = partial.error.clone();
        }
        if partial.skip.is_some() {
            self.skip = partial.skip.clone();
        }
        if partial.rollback.is_some() {
            self.rollback = partial.rollback.clone();
        }
        if partial.retry.is_some() {
            self.retry = partial.retry.clone();
        }
        if partial.paused.is_some() {
            self.paused = partial.paused;
        }
        if partial.duration.is_some() {
            self.duration = partial.duration;
        }
    }

    /// Keep only the fields named in `allowed`, ordered as `allowed` lists
    /// them. Repeated names in `allowed` are kept once.
    pub fn filter(&self, allowed: &[MessageField]) -> FilteredMessage {
        let mut entries: Vec<MessageEntry> = vec![];
        for field in allowed {
            if entries.iter().any(|e| e.field() == *field) {
                continue;
            }
            if let Some(entry) = self.get(*field) {
                entries.push(entry);
            }
        }
        FilteredMessage(entries)
    }
}

/// Ordered subset of a message, serialized as a JSON object whose keys keep
/// the subset order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilteredMessage(pub Vec<MessageEntry>);

impl FilteredMessage {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains_any(&self, fields: &[MessageField]) -> bool {
        self.0.iter().any(|e| fields.contains(&e.field()))
    }

    pub fn first(&self) -> Option<&MessageEntry> {
        self.0.first()
    }
}

impl Serialize for FilteredMessage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for entry in &self.0 {
            let key = entry.field().as_str();
            match entry {
                MessageEntry::Error(s) | MessageEntry::Skip(s) | MessageEntry::Rollback(s) => {
                    map.serialize_entry(key, s)?
                }
                MessageEntry::Retry(retry) => map.serialize_entry(key, retry)?,
                MessageEntry::Paused { resume_at } => map.serialize_entry(key, resume_at)?,
                MessageEntry::Duration { ms } => map.serialize_entry(key, ms)?,
            }
        }
        map.end()
    }
}
