use crate::events::{Listener, TaskEvent, TaskEventKind};
use crate::message::TaskMessage;
use crate::options::TaskRendererOptions;
use crate::state::TaskState;
use crate::uniq_id::TaskId;
use std::fmt;
use std::sync::{Arc, RwLock};

/// Handle to a node of the task tree.
///
/// Whoever runs the task drives it through the emitter methods
/// (`set_state`, `output`, `update_message`, ...). Each emitter updates the node
/// and then synchronously calls every listener registered for that event
/// kind, in registration order, on the calling thread.
#[derive(Clone)]
pub struct Task(pub(crate) Arc<TaskData>);

pub(crate) struct TaskData {
    pub(crate) id: TaskId,
    pub(crate) path: Vec<String>,
    pub(crate) title: RwLock<Option<String>>,
    pub(crate) state: RwLock<TaskState>,
    pub(crate) message: RwLock<TaskMessage>,
    pub(crate) enabled: RwLock<bool>,
    pub(crate) renderer_options: RwLock<Option<TaskRendererOptions>>,
    pub(crate) subtasks: RwLock<Vec<Task>>,
    listeners: RwLock<Vec<(TaskEventKind, Listener)>>,
}

impl Task {
    pub fn new<S: Into<String>>(title: S) -> Self {
        Self::create(Some(title.into()), &[])
    }

    /// A task without a title. Renderers that only report titled tasks
    /// ignore its lifecycle.
    pub fn untitled() -> Self {
        Self::create(None, &[])
    }

    /// Create a child of this task. The child is not announced until it is
    /// passed to [`Task::add_subtasks`].
    pub fn child<S: Into<String>>(&self, title: S) -> Self {
        Self::create(Some(title.into()), &self.0.path)
    }

    pub fn untitled_child(&self) -> Self {
        Self::create(None, &self.0.path)
    }

    fn create(title: Option<String>, parent_path: &[String]) -> Self {
        let mut path = parent_path.to_vec();
        if let Some(title) = &title {
            path.push(title.clone());
        }
        Self(Arc::new(TaskData {
            id: TaskId::new(),
            path,
            title: RwLock::new(title),
            state: RwLock::new(TaskState::default()),
            message: RwLock::new(TaskMessage::default()),
            enabled: RwLock::new(true),
            renderer_options: RwLock::new(None),
            subtasks: RwLock::new(vec![]),
            listeners: RwLock::new(vec![]),
        }))
    }

    pub fn with_renderer_options(self, options: TaskRendererOptions) -> Self {
        self.set_renderer_options(options);
        self
    }

    pub fn set_renderer_options(&self, options: TaskRendererOptions) {
        *self.0.renderer_options.write().expect("poisoned lock") = Some(options);
    }

    pub fn set_enabled(&self, enabled: bool) {
        *self.0.enabled.write().expect("poisoned lock") = enabled;
    }

    pub fn id(&self) -> TaskId {
        self.0.id
    }

    pub fn title(&self) -> Option<String> {
        self.0.title.read().expect("poisoned lock").clone()
    }

    pub fn has_title(&self) -> bool {
        self.0.title.read().expect("poisoned lock").is_some()
    }

    pub fn path(&self) -> &[String] {
        &self.0.path
    }

    pub fn state(&self) -> TaskState {
        *self.0.state.read().expect("poisoned lock")
    }

    /// All message fields emitted so far, merged.
    pub fn message(&self) -> TaskMessage {
        self.0.message.read().expect("poisoned lock").clone()
    }

    pub fn renderer_options(&self) -> Option<TaskRendererOptions> {
        self.0.renderer_options.read().expect("poisoned lock").clone()
    }

    pub fn subtasks(&self) -> Vec<Task> {
        self.0.subtasks.read().expect("poisoned lock").clone()
    }

    pub fn has_subtasks(&self) -> bool {
        !self.0.subtasks.read().expect("poisoned lock").is_empty()
    }

    pub fn is_enabled(&self) -> bool {
        *self.0.enabled.read().expect("poisoned lock")
    }

    pub fn is_started(&self) -> bool {
        self.state() == TaskState::Started
    }

    pub fn is_completed(&self) -> bool {
        self.state() == TaskState::Completed
    }

    pub fn has_failed(&self) -> bool {
        self.state() == TaskState::Failed
    }

    pub fn is_skipped(&self) -> bool {
        self.state() == TaskState::Skipped
    }

    pub fn is_rolling_back(&self) -> bool {
        self.state() == TaskState::RollingBack
    }

    pub fn has_rolled_back(&self) -> bool {
        self.state() == TaskState::RolledBack
    }

    pub fn is_retrying(&self) -> bool {
        self.state() == TaskState::Retry
    }

    pub fn is_paused(&self) -> bool {
        self.state() == TaskState::Paused
    }

    pub fn is_prompt(&self) -> bool {
        self.state() == TaskState::Prompt
    }

    pub fn is_pending(&self) -> bool {
        self.is_started() || self.is_prompt()
    }

    pub fn has_reset(&self) -> bool {
        self.state() == TaskState::Waiting
    }

    pub fn has_finalized(&self) -> bool {
        self.state().is_final()
    }

    /// Register `listener` for every future event of `kind`.
    pub fn on<F>(&self, kind: TaskEventKind, listener: F)
    where
        F: Fn(&Task, &TaskEvent) + Send + Sync + 'static,
    {
        self.0
            .listeners
            .write()
            .expect("poisoned lock")
            .push((kind, Arc::new(listener)));
    }

    pub fn listener_count(&self, kind: TaskEventKind) -> usize {
        self.0
            .listeners
            .read()
            .expect("poisoned lock")
            .iter()
            .filter(|(k, _)| *k == kind)
            .count()
    }

    pub fn add_subtasks(&self, subtasks: Vec<Task>) {
        if subtasks.is_empty() {
            return;
        }
        self.0
            .subtasks
            .write()
            .expect("poisoned lock")
            .extend(subtasks.iter().cloned());
        self.emit(TaskEvent::Subtask(subtasks));
    }

    pub fn set_state(&self, state: TaskState) {
        *self.0.state.write().expect("poisoned lock") = state;
        self.emit(TaskEvent::State(state));
    }

    pub fn output<S: Into<String>>(&self, data: S) {
        self.emit(TaskEvent::Output(data.into()));
    }

    pub fn prompt<S: Into<String>>(&self, data: S) {
        self.emit(TaskEvent::Prompt(data.into()));
    }

    pub fn set_title<S: Into<String>>(&self, title: S) {
        let title = title.into();
        *self.0.title.write().expect("poisoned lock") = Some(title.clone());
        self.emit(TaskEvent::Title(title));
    }

    /// Merge `partial` into the task message and emit it.
    pub fn update_message(&self, partial: TaskMessage) {
        self.0.message.write().expect("poisoned lock").merge(&partial);
        self.emit(TaskEvent::Message(partial));
    }

    fn emit(&self, event: TaskEvent) {
        let kind = event.kind();
        // Cloned out of the lock: listeners are free to register more
        // listeners while being called.
        let listeners: Vec<Listener> = self
            .0
            .listeners
            .read()
            .expect("poisoned lock")
            .iter()
            .filter(|(k, _)| *k == kind)
            .map(|(_, l)| l.clone())
            .collect();

        for listener in listeners {
            listener(self, &event);
        }
    }
}

impl fmt::Debug for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Task")
            .field("id", &self.0.id)
            .field("title", &self.title())
            .field("state", &self.state())
            .finish()
    }
}
