use crate::presets::{TimerPreset, TimestampPreset};
use crate::task::Task;
use serde::{Deserialize, Serialize};

/// Renderer settings a single task can override. Unset fields fall back to
/// the renderer-wide value.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskRendererOptions {
    pub timer: Option<TimerPreset>,
    pub timestamp: Option<TimestampPreset>,
}

impl TaskRendererOptions {
    pub fn with_timer(mut self, timer: TimerPreset) -> Self {
        self.timer = Some(timer);
        self
    }

    pub fn with_timestamp(mut self, timestamp: TimestampPreset) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}

/// Resolve an option for `task`: the task's own override wins, otherwise the
/// renderer-wide `global` value is used.
///
/// ```
/// use taskrender::options::{self_or_parent, TaskRendererOptions};
/// use taskrender::presets::TimerPreset;
/// use taskrender::Task;
///
/// let global = TaskRendererOptions::default().with_timer(TimerPreset::default());
/// let task = Task::new("quiet").with_renderer_options(
///     TaskRendererOptions::default().with_timer(TimerPreset { condition: false }),
/// );
///
/// let timer = self_or_parent(&task, &global, |o| o.timer);
/// assert_eq!(timer, Some(TimerPreset { condition: false }));
/// ```
pub fn self_or_parent<T, F>(task: &Task, global: &TaskRendererOptions, key: F) -> Option<T>
where
    F: Fn(&TaskRendererOptions) -> Option<T>,
{
    task.renderer_options()
        .as_ref()
        .and_then(&key)
        .or_else(|| key(global))
}
