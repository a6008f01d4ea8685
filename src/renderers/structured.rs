use super::serializer::{EventPayload, EventSerializer, TaskField};
use super::subscribe::subscribe_tree;
use super::{RenderSession, Renderer, RendererCapabilities};
use crate::drains::Stream;
use crate::events::{TaskEvent, TaskEventKind};
use crate::logger::{Logger, LoggerOptions};
use crate::message::MessageField;
use crate::state::TaskState;
use crate::task::Task;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Which state changes are rendered: all/none, or an explicit list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StateFilter {
    Enabled(bool),
    Only(Vec<TaskState>),
}

impl StateFilter {
    pub fn is_enabled(&self) -> bool {
        match self {
            StateFilter::Enabled(enabled) => *enabled,
            StateFilter::Only(states) => !states.is_empty(),
        }
    }

    pub fn allows(&self, state: TaskState) -> bool {
        match self {
            StateFilter::Enabled(enabled) => *enabled,
            StateFilter::Only(states) => states.contains(&state),
        }
    }
}

impl Default for StateFilter {
    fn default() -> Self {
        StateFilter::Enabled(true)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StructuredRendererOptions {
    /// Follow subtasks.
    pub subtasks: bool,
    pub state: StateFilter,
    pub output: bool,
    pub prompt: bool,
    pub title: bool,
    /// Message fields that are rendered, in output order.
    pub messages: Vec<MessageField>,
    /// A message containing any of these fields goes to STDERR.
    pub messages_to_stderr: Vec<MessageField>,
    /// Task attributes attached to every record.
    pub task: Vec<TaskField>,
}

impl Default for StructuredRendererOptions {
    fn default() -> Self {
        Self {
            subtasks: true,
            state: StateFilter::default(),
            output: true,
            prompt: true,
            title: true,
            messages: vec![
                MessageField::Skip,
                MessageField::Error,
                MessageField::Retry,
                MessageField::Rollback,
                MessageField::Paused,
            ],
            messages_to_stderr: vec![
                MessageField::Error,
                MessageField::Rollback,
                MessageField::Retry,
            ],
            task: TaskField::defaults(),
        }
    }
}

/// Writes every observed event as a JSON line, meant to be asserted on by
/// tests of whatever runs the tasks.
pub struct StructuredRenderer {
    tasks: Vec<Task>,
    inner: Arc<Inner>,
    session: RenderSession,
}

struct Inner {
    options: StructuredRendererOptions,
    logger: Logger,
    serializer: EventSerializer,
    session: RenderSession,
}

impl StructuredRenderer {
    pub fn new(tasks: Vec<Task>, options: StructuredRendererOptions) -> Self {
        Self::with_logger(tasks, options, Logger::stdio(LoggerOptions::default()))
    }

    pub fn with_logger(tasks: Vec<Task>, options: StructuredRendererOptions, logger: Logger) -> Self {
        let serializer = EventSerializer::new(options.task.clone());
        let session = RenderSession::default();
        Self {
            tasks,
            inner: Arc::new(Inner {
                options,
                logger,
                serializer,
                session: session.clone(),
            }),
            session,
        }
    }

    pub fn is_active(&self) -> bool {
        self.session.is_active()
    }
}

impl Renderer for StructuredRenderer {
    fn render(&self) {
        tracing::debug!(tasks = self.tasks.len(), "structured renderer started");
        self.session.start();

        let inner = self.inner.clone();
        subscribe_tree(
            &self.tasks,
            self.inner.options.subtasks,
            Arc::new(move |task: &Task| attach(&inner, task)),
        );
    }

    fn end(&self) {
        tracing::debug!("structured renderer ended");
        self.session.finish();
    }

    fn capabilities(&self) -> RendererCapabilities {
        RendererCapabilities { non_tty: true }
    }
}

fn attach(inner: &Arc<Inner>, task: &Task) {
    let options = &inner.options;

    if options.state.is_enabled() {
        let inner = inner.clone();
        task.on(TaskEventKind::State, move |task, event| {
            if let TaskEvent::State(state) = event {
                if inner.options.state.allows(*state) {
                    inner.write(Stream::Stdout, TaskEventKind::State, &EventPayload::State(*state), task);
                }
            }
        });
    }

    if options.output {
        let inner = inner.clone();
        task.on(TaskEventKind::Output, move |task, event| {
            if let TaskEvent::Output(data) = event {
                inner.write(Stream::Stdout, TaskEventKind::Output, &EventPayload::Text(data), task);
            }
        });
    }

    if options.prompt {
        let inner = inner.clone();
        task.on(TaskEventKind::Prompt, move |task, event| {
            if let TaskEvent::Prompt(prompt) = event {
                inner.write(Stream::Stdout, TaskEventKind::Prompt, &EventPayload::Text(prompt), task);
            }
        });
    }

    if options.title {
        let inner = inner.clone();
        task.on(TaskEventKind::Title, move |task, event| {
            if let TaskEvent::Title(title) = event {
                inner.write(Stream::Stdout, TaskEventKind::Title, &EventPayload::Text(title), task);
            }
        });
    }

    let inner = inner.clone();
    task.on(TaskEventKind::Message, move |task, event| {
        if let TaskEvent::Message(message) = event {
            let filtered = message.filter(&inner.options.messages);
            if filtered.is_empty() {
                tracing::trace!(task_id = %task.id(), "message has no rendered fields");
                return;
            }

            let stream = if filtered.contains_any(&inner.options.messages_to_stderr) {
                Stream::Stderr
            } else {
                Stream::Stdout
            };
            inner.write(stream, TaskEventKind::Message, &EventPayload::Message(&filtered), task);
        }
    });
}

impl Inner {
    fn write(&self, stream: Stream, kind: TaskEventKind, payload: &EventPayload, task: &Task) {
        if !self.session.is_active() {
            tracing::trace!(task_id = %task.id(), event = %kind, "event after renderer ended");
        }
        match self.serializer.serialize(kind, payload, task) {
            Ok(line) => match stream {
                Stream::Stdout => self.logger.to_stdout(&line),
                Stream::Stderr => self.logger.to_stderr(&line),
            },
            Err(err) => {
                tracing::warn!(task_id = %task.id(), event = %kind, "failed to serialize event: {:?}", err);
            }
        }
    }
}
