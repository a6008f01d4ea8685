use super::subscribe::subscribe_tree;
use super::{RenderSession, Renderer, RendererCapabilities};
use crate::events::{TaskEvent, TaskEventKind};
use crate::level::LogLevel;
use crate::logger::{LogEntryOptions, LogField, Logger, LoggerOptions};
use crate::message::{MessageEntry, MessageField, TaskMessage};
use crate::options::{self_or_parent, TaskRendererOptions};
use crate::presets::{format_countdown, now_millis, TimerPreset, TimestampPreset};
use crate::state::TaskState;
use crate::task::Task;
use crate::utils::cleanse_ansi;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::SystemTime;

/// Message fields the verbose renderer reports, highest priority first.
/// Only the first one present in a message is logged.
const MESSAGE_PRIORITY: [MessageField; 5] = [
    MessageField::Error,
    MessageField::Skip,
    MessageField::Rollback,
    MessageField::Retry,
    MessageField::Paused,
];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VerboseRendererOptions {
    pub log_title_change: bool,
    /// Default timer for tasks that don't set their own.
    pub timer: Option<TimerPreset>,
    /// Default timestamp prefix for tasks that don't set their own.
    pub timestamp: Option<TimestampPreset>,
    pub logger: LoggerOptions,
}

impl Default for VerboseRendererOptions {
    fn default() -> Self {
        Self {
            log_title_change: true,
            timer: None,
            timestamp: None,
            logger: LoggerOptions::default(),
        }
    }
}

impl VerboseRendererOptions {
    /// Renderer-wide values for the options a task can override.
    pub fn task_defaults(&self) -> TaskRendererOptions {
        TaskRendererOptions {
            timer: self.timer,
            timestamp: self.timestamp,
        }
    }
}

/// Logs task lifecycle as plain lines, one per event.
pub struct VerboseRenderer {
    tasks: Vec<Task>,
    inner: Arc<Inner>,
    session: RenderSession,
}

struct Inner {
    options: VerboseRendererOptions,
    task_defaults: TaskRendererOptions,
    logger: Logger,
    session: RenderSession,
}

impl VerboseRenderer {
    pub fn new(tasks: Vec<Task>, options: VerboseRendererOptions) -> Self {
        let logger = Logger::stdio(options.logger.clone());
        Self::with_logger(tasks, options, logger)
    }

    pub fn with_logger(tasks: Vec<Task>, options: VerboseRendererOptions, logger: Logger) -> Self {
        let task_defaults = options.task_defaults();
        let session = RenderSession::default();
        Self {
            tasks,
            inner: Arc::new(Inner {
                options,
                task_defaults,
                logger,
                session: session.clone(),
            }),
            session,
        }
    }

    pub fn is_active(&self) -> bool {
        self.session.is_active()
    }
}

impl Renderer for VerboseRenderer {
    fn render(&self) {
        tracing::debug!(tasks = self.tasks.len(), "verbose renderer started");
        self.session.start();

        let inner = self.inner.clone();
        subscribe_tree(
            &self.tasks,
            true,
            Arc::new(move |task: &Task| attach(&inner, task)),
        );
    }

    fn end(&self) {
        tracing::debug!("verbose renderer ended");
        self.session.finish();
    }

    fn capabilities(&self) -> RendererCapabilities {
        RendererCapabilities { non_tty: true }
    }
}

fn attach(inner: &Arc<Inner>, task: &Task) {
    {
        let inner = inner.clone();
        task.on(TaskEventKind::State, move |task, event| {
            if let TaskEvent::State(state) = event {
                inner.on_state(task, *state);
            }
        });
    }

    {
        let inner = inner.clone();
        task.on(TaskEventKind::Output, move |task, event| {
            if let TaskEvent::Output(data) = event {
                inner.log(task, LogLevel::Output, data, inner.entry(task));
            }
        });
    }

    {
        let inner = inner.clone();
        task.on(TaskEventKind::Prompt, move |task, event| {
            if let TaskEvent::Prompt(prompt) = event {
                let cleansed = cleanse_ansi(prompt);
                if !cleansed.is_empty() {
                    inner.log(task, LogLevel::Prompt, &cleansed, inner.entry(task));
                }
            }
        });
    }

    if inner.options.log_title_change {
        let inner = inner.clone();
        task.on(TaskEventKind::Title, move |task, event| {
            if let TaskEvent::Title(title) = event {
                inner.log(task, LogLevel::Title, title, inner.entry(task));
            }
        });
    }

    let inner = inner.clone();
    task.on(TaskEventKind::Message, move |task, event| {
        if let TaskEvent::Message(message) = event {
            inner.on_message(task, message);
        }
    });
}

impl Inner {
    fn on_state(&self, task: &Task, state: TaskState) {
        // untitled tasks are grouping nodes, nothing to report
        let title = match task.title() {
            Some(title) => title,
            None => return,
        };

        match state {
            TaskState::Started => self.log(task, LogLevel::Started, &title, self.entry(task)),
            TaskState::Completed => {
                let mut entry = self.entry(task);
                let timer = self_or_parent(task, &self.task_defaults, |o| o.timer);
                let duration = task.message().duration.filter(|ms| *ms > 0);
                if let (Some(timer), Some(duration)) = (timer, duration) {
                    entry = entry.with_suffix(LogField::new(timer.format(duration)).when(timer.condition));
                }
                self.log(task, LogLevel::Completed, &title, entry);
            }
            _ => {}
        }
    }

    fn on_message(&self, task: &Task, message: &TaskMessage) {
        let filtered = message.filter(&MESSAGE_PRIORITY);
        let entry = self.entry(task);
        let title = task.title().unwrap_or_default();

        // an empty text field doesn't win over the next one
        match filtered.0.iter().find(|entry| !entry.is_blank()) {
            Some(MessageEntry::Error(error)) => self.log(task, LogLevel::Failed, error, entry),
            Some(MessageEntry::Skip(skip)) => self.log(task, LogLevel::Skipped, skip, entry),
            Some(MessageEntry::Rollback(rollback)) => {
                self.log(task, LogLevel::Rollback, rollback, entry)
            }
            Some(MessageEntry::Retry(retry)) => self.log(
                task,
                LogLevel::Retry,
                &title,
                entry.with_suffix(LogField::new(retry.count.to_string())),
            ),
            Some(MessageEntry::Paused { resume_at }) => {
                let entry = match format_countdown(*resume_at, now_millis()) {
                    Some(countdown) => entry.with_suffix(LogField::new(countdown)),
                    None => entry,
                };
                self.log(task, LogLevel::Paused, &title, entry)
            }
            Some(MessageEntry::Duration { .. }) | None => {
                tracing::trace!(task_id = %task.id(), "message has no reported fields");
            }
        }
    }

    /// Per-line fields shared by every event of `task`.
    fn entry(&self, task: &Task) -> LogEntryOptions {
        let timestamp = self_or_parent(task, &self.task_defaults, |o| o.timestamp);
        match timestamp.and_then(|t| t.prefix(SystemTime::now())) {
            Some(prefix) => LogEntryOptions::default().with_prefix(LogField::new(prefix)),
            None => LogEntryOptions::default(),
        }
    }

    fn log(&self, task: &Task, level: LogLevel, message: &str, entry: LogEntryOptions) {
        if self.session.is_active() {
            tracing::trace!(task_id = %task.id(), level = %level, "log");
        } else {
            tracing::trace!(task_id = %task.id(), level = %level, "log after renderer ended");
        }
        self.logger.log(level, message, &entry);
    }
}
