use crate::events::{TaskEvent, TaskEventKind};
use crate::task::Task;
use std::sync::Arc;

/// Attaches a renderer's listeners to a single task.
pub type Attach = Arc<dyn Fn(&Task) + Send + Sync>;

/// Run `attach` on every task and, when `recurse` is set, on every subtask
/// those tasks announce later on, at any depth.
///
/// Listeners are attached once per task: the SUBTASK listener only walks the
/// children carried by that event, which are new by construction.
pub fn subscribe_tree(tasks: &[Task], recurse: bool, attach: Attach) {
    for task in tasks {
        tracing::trace!(task_id = %task.id(), title = ?task.title(), "subscribing");

        if recurse {
            let attach = attach.clone();
            task.on(TaskEventKind::Subtask, move |_, event| {
                if let TaskEvent::Subtask(subtasks) = event {
                    subscribe_tree(subtasks, recurse, attach.clone());
                }
            });
        }

        attach(task);
    }
}
