/*!
# taskrender - renderers for task trees

**taskrender** turns the lifecycle of a running task tree into output lines.
It doesn't run anything itself: whatever executes the tasks drives them
through the [`Task`] handle (state changes, output, prompts, title and
message updates) and renderers subscribed to those tasks write the result.

Two non-interactive renderers are provided:

 - [`VerboseRenderer`] logs one human readable line per event
   (`[STARTED] build`, `[COMPLETED] build [1s]`, ...).
 - [`StructuredRenderer`] writes one JSON record per event, intended to be
   asserted on in tests.

Subtasks can be announced at any point while rendering, renderers follow
them to any depth.

Example

```
use std::sync::Arc;
use taskrender::drains::StringDrain;
use taskrender::renderers::{Renderer, RendererConfig};
use taskrender::{Task, TaskMessage, TaskState};

let drain = StringDrain::new();
let root = Task::new("build");
let renderer = RendererConfig::from_json(r#"{"renderer":"verbose","timer":{}}"#)
    .unwrap()
    .build(vec![root.clone()], Arc::new(drain.clone()));
renderer.render();

root.set_state(TaskState::Started);
root.update_message(TaskMessage::duration(200));
root.set_state(TaskState::Completed);
renderer.end();

assert_eq!(drain.stdout(), vec!["[STARTED] build", "[COMPLETED] build [0.2s]"]);
```

 */
#![allow(clippy::new_without_default)]

pub mod drains;
pub mod events;
pub mod level;
pub mod logger;
pub mod message;
pub mod options;
pub mod presets;
pub mod renderers;
pub mod state;
pub mod task;
pub mod uniq_id;
pub mod utils;

pub use events::{TaskEvent, TaskEventKind};
pub use level::LogLevel;
pub use logger::{Logger, LoggerOptions};
pub use message::{MessageEntry, MessageField, TaskMessage};
pub use options::TaskRendererOptions;
pub use renderers::{Renderer, RendererConfig, StructuredRenderer, VerboseRenderer};
pub use state::TaskState;
pub use task::Task;
