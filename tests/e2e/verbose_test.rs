use crate::verbose;
use k9::*;
use taskrender::presets::TimerPreset;
use taskrender::renderers::{Renderer, VerboseRendererOptions};
use taskrender::{LoggerOptions, Task, TaskMessage, TaskState};

fn with_timer() -> VerboseRendererOptions {
    VerboseRendererOptions {
        timer: Some(TimerPreset::default()),
        ..VerboseRendererOptions::default()
    }
}

#[test]
fn untitled_task_state_is_never_logged() {
    let group = Task::untitled();
    let (renderer, drain) = verbose(vec![group.clone()], with_timer());
    renderer.render();

    group.update_message(TaskMessage::duration(1500));
    for state in TaskState::ALL.iter() {
        group.set_state(*state);
    }

    assert!(drain.lines().is_empty());
}

#[test]
fn timer_suffix_needs_a_duration() {
    let timed = Task::new("timed");
    let untimed = Task::new("untimed");
    let (renderer, drain) = verbose(vec![timed.clone(), untimed.clone()], with_timer());
    renderer.render();

    timed.update_message(TaskMessage::duration(1500));
    timed.set_state(TaskState::Completed);
    untimed.set_state(TaskState::Completed);

    assert_equal!(
        drain.stdout(),
        vec![
            "[COMPLETED] timed [1s]".to_string(),
            "[COMPLETED] untimed".to_string()
        ]
    );
}

#[test]
fn duration_without_timer_has_no_suffix() {
    let task = Task::new("build");
    let (renderer, drain) = verbose(vec![task.clone()], VerboseRendererOptions::default());
    renderer.render();

    task.update_message(TaskMessage::duration(1500));
    task.set_state(TaskState::Completed);

    assert_equal!(drain.stdout(), vec!["[COMPLETED] build".to_string()]);
}

#[test]
fn output_is_logged_as_is() {
    let task = Task::new("build");
    let (renderer, drain) = verbose(vec![task.clone()], VerboseRendererOptions::default());
    renderer.render();

    task.output("warning: unused variable `x`");
    task.output("line 1\nline 2");

    assert_equal!(
        drain.to_string(),
        "  [OUTPUT] warning: unused variable `x`
  [OUTPUT] line 1
[OUTPUT] line 2
"
        .to_string()
    );
}

#[test]
fn stderr_levels_are_configurable() {
    let task = Task::new("build");
    let (renderer, drain) = verbose(
        vec![task.clone()],
        VerboseRendererOptions {
            logger: LoggerOptions {
                to_stderr: vec![],
                ..LoggerOptions::default()
            },
            ..VerboseRendererOptions::default()
        },
    );
    renderer.render();

    task.update_message(TaskMessage::error("boom"));
    task.update_message(TaskMessage::rollback("undo"));

    assert!(drain.stderr().is_empty());
    assert_equal!(
        drain.stdout(),
        vec!["[FAILED] boom".to_string(), "[ROLLBACK] undo".to_string()]
    );
}

#[test]
fn icons_replace_labels() {
    let task = Task::new("build");
    let (renderer, drain) = verbose(
        vec![task.clone()],
        VerboseRendererOptions {
            logger: LoggerOptions {
                use_icons: true,
                ..LoggerOptions::default()
            },
            ..VerboseRendererOptions::default()
        },
    );
    renderer.render();

    task.set_state(TaskState::Started);
    task.update_message(TaskMessage::skip("cached"));

    assert_equal!(
        drain.stdout(),
        vec!["▶ build".to_string(), "↓ cached".to_string()]
    );
}
