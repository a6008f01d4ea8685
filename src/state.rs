use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a task as reported by the scheduler.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskState {
    Waiting,
    Started,
    Completed,
    Failed,
    Skipped,
    RollingBack,
    RolledBack,
    Retry,
    Paused,
    Prompt,
    PromptCompleted,
    PromptFailed,
}

impl TaskState {
    pub const ALL: [TaskState; 12] = [
        TaskState::Waiting,
        TaskState::Started,
        TaskState::Completed,
        TaskState::Failed,
        TaskState::Skipped,
        TaskState::RollingBack,
        TaskState::RolledBack,
        TaskState::Retry,
        TaskState::Paused,
        TaskState::Prompt,
        TaskState::PromptCompleted,
        TaskState::PromptFailed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskState::Waiting => "WAITING",
            TaskState::Started => "STARTED",
            TaskState::Completed => "COMPLETED",
            TaskState::Failed => "FAILED",
            TaskState::Skipped => "SKIPPED",
            TaskState::RollingBack => "ROLLING_BACK",
            TaskState::RolledBack => "ROLLED_BACK",
            TaskState::Retry => "RETRY",
            TaskState::Paused => "PAUSED",
            TaskState::Prompt => "PROMPT",
            TaskState::PromptCompleted => "PROMPT_COMPLETED",
            TaskState::PromptFailed => "PROMPT_FAILED",
        }
    }

    /// A task has finalized once it can no longer change its outcome.
    pub fn is_final(&self) -> bool {
        matches!(
            self,
            TaskState::Completed | TaskState::Failed | TaskState::Skipped | TaskState::RolledBack
        )
    }
}

impl Default for TaskState {
    fn default() -> Self {
        TaskState::Waiting
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
