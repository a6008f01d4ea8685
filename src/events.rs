use crate::message::TaskMessage;
use crate::state::TaskState;
use crate::task::Task;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Discriminant of a [`TaskEvent`], used to register listeners.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskEventKind {
    Subtask,
    State,
    Output,
    Prompt,
    Title,
    Message,
}

impl TaskEventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskEventKind::Subtask => "SUBTASK",
            TaskEventKind::State => "STATE",
            TaskEventKind::Output => "OUTPUT",
            TaskEventKind::Prompt => "PROMPT",
            TaskEventKind::Title => "TITLE",
            TaskEventKind::Message => "MESSAGE",
        }
    }
}

impl fmt::Display for TaskEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Clone, Debug)]
pub enum TaskEvent {
    /// Children that became known to the task. Always raised before any
    /// event of those children.
    Subtask(Vec<Task>),
    State(TaskState),
    Output(String),
    /// Raw prompt output, may contain terminal control sequences.
    Prompt(String),
    Title(String),
    /// Only the message fields that changed.
    Message(TaskMessage),
}

impl TaskEvent {
    pub fn kind(&self) -> TaskEventKind {
        match self {
            TaskEvent::Subtask(_) => TaskEventKind::Subtask,
            TaskEvent::State(_) => TaskEventKind::State,
            TaskEvent::Output(_) => TaskEventKind::Output,
            TaskEvent::Prompt(_) => TaskEventKind::Prompt,
            TaskEvent::Title(_) => TaskEventKind::Title,
            TaskEvent::Message(_) => TaskEventKind::Message,
        }
    }
}

/// Listener callback. Receives the emitting task so that listeners never
/// need to hold a handle to it.
pub type Listener = Arc<dyn Fn(&Task, &TaskEvent) + Send + Sync>;
