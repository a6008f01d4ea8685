use crate::events::TaskEventKind;
use crate::message::FilteredMessage;
use crate::state::TaskState;
use crate::task::Task;
use anyhow::Result;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// Task attributes that can appear in a serialized record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TaskField {
    HasRolledBack,
    IsRollingBack,
    IsCompleted,
    IsSkipped,
    HasFinalized,
    HasSubtasks,
    Title,
    HasReset,
    HasTitle,
    IsPrompt,
    IsPaused,
    IsPending,
    IsStarted,
    HasFailed,
    IsEnabled,
    IsRetrying,
    Path,
}

impl TaskField {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskField::HasRolledBack => "hasRolledBack",
            TaskField::IsRollingBack => "isRollingBack",
            TaskField::IsCompleted => "isCompleted",
            TaskField::IsSkipped => "isSkipped",
            TaskField::HasFinalized => "hasFinalized",
            TaskField::HasSubtasks => "hasSubtasks",
            TaskField::Title => "title",
            TaskField::HasReset => "hasReset",
            TaskField::HasTitle => "hasTitle",
            TaskField::IsPrompt => "isPrompt",
            TaskField::IsPaused => "isPaused",
            TaskField::IsPending => "isPending",
            TaskField::IsStarted => "isStarted",
            TaskField::HasFailed => "hasFailed",
            TaskField::IsEnabled => "isEnabled",
            TaskField::IsRetrying => "isRetrying",
            TaskField::Path => "path",
        }
    }

    pub fn defaults() -> Vec<TaskField> {
        vec![
            TaskField::HasRolledBack,
            TaskField::IsRollingBack,
            TaskField::IsCompleted,
            TaskField::IsSkipped,
            TaskField::HasFinalized,
            TaskField::HasSubtasks,
            TaskField::Title,
            TaskField::HasReset,
            TaskField::HasTitle,
            TaskField::IsPrompt,
            TaskField::IsPaused,
            TaskField::IsPending,
            TaskField::IsStarted,
            TaskField::HasFailed,
            TaskField::IsEnabled,
            TaskField::IsRetrying,
            TaskField::Path,
        ]
    }
}

/// Event payload as it appears under `data`.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum EventPayload<'a> {
    State(TaskState),
    Text(&'a str),
    Message(&'a FilteredMessage),
}

/// Serializes the configured fields of a task, in configured order.
struct TaskSnapshot<'a> {
    task: &'a Task,
    fields: &'a [TaskField],
}

impl<'a> Serialize for TaskSnapshot<'a> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seen: Vec<TaskField> = vec![];
        let mut map = serializer.serialize_map(None)?;
        for field in self.fields {
            if seen.contains(field) {
                continue;
            }
            seen.push(*field);

            let task = self.task;
            let key = field.as_str();
            match field {
                TaskField::Title => map.serialize_entry(key, &task.title())?,
                TaskField::Path => map.serialize_entry(key, task.path())?,
                TaskField::HasRolledBack => map.serialize_entry(key, &task.has_rolled_back())?,
                TaskField::IsRollingBack => map.serialize_entry(key, &task.is_rolling_back())?,
                TaskField::IsCompleted => map.serialize_entry(key, &task.is_completed())?,
                TaskField::IsSkipped => map.serialize_entry(key, &task.is_skipped())?,
                TaskField::HasFinalized => map.serialize_entry(key, &task.has_finalized())?,
                TaskField::HasSubtasks => map.serialize_entry(key, &task.has_subtasks())?,
                TaskField::HasReset => map.serialize_entry(key, &task.has_reset())?,
                TaskField::HasTitle => map.serialize_entry(key, &task.has_title())?,
                TaskField::IsPrompt => map.serialize_entry(key, &task.is_prompt())?,
                TaskField::IsPaused => map.serialize_entry(key, &task.is_paused())?,
                TaskField::IsPending => map.serialize_entry(key, &task.is_pending())?,
                TaskField::IsStarted => map.serialize_entry(key, &task.is_started())?,
                TaskField::HasFailed => map.serialize_entry(key, &task.has_failed())?,
                TaskField::IsEnabled => map.serialize_entry(key, &task.is_enabled())?,
                TaskField::IsRetrying => map.serialize_entry(key, &task.is_retrying())?,
            }
        }
        map.end()
    }
}

#[derive(Serialize)]
struct Record<'a> {
    event: TaskEventKind,
    data: &'a EventPayload<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    task: Option<TaskSnapshot<'a>>,
}

/// Turns an event into one compact JSON line:
///
/// `{"event":"STATE","data":"STARTED","task":{"title":"build"}}`
///
/// `task` is left out when no task fields are configured.
#[derive(Clone, Debug)]
pub struct EventSerializer {
    task_fields: Vec<TaskField>,
}

impl EventSerializer {
    pub fn new(task_fields: Vec<TaskField>) -> Self {
        Self { task_fields }
    }

    pub fn serialize(&self, kind: TaskEventKind, payload: &EventPayload, task: &Task) -> Result<String> {
        let snapshot = if self.task_fields.is_empty() {
            None
        } else {
            Some(TaskSnapshot {
                task,
                fields: &self.task_fields,
            })
        };

        let record = Record {
            event: kind,
            data: payload,
            task: snapshot,
        };
        Ok(serde_json::to_string(&record)?)
    }
}
