use crate::{structured, verbose};
use k9::*;
use taskrender::presets::TimerPreset;
use taskrender::renderers::{Renderer, StructuredRendererOptions, TaskField, VerboseRendererOptions};
use taskrender::{MessageField, Task, TaskMessage, TaskState};

#[test]
fn verbose_started_and_completed_with_timer() {
    let build = Task::new("build");
    let (renderer, drain) = verbose(
        vec![build.clone()],
        VerboseRendererOptions {
            timer: Some(TimerPreset::default()),
            ..VerboseRendererOptions::default()
        },
    );
    renderer.render();

    build.set_state(TaskState::Started);
    build.update_message(TaskMessage::duration(200));
    build.set_state(TaskState::Completed);
    renderer.end();

    assert_equal!(
        drain.to_string(),
        "  [STARTED] build
  [COMPLETED] build [0.2s]
"
        .to_string()
    );
}

#[test]
fn structured_skip_goes_to_stdout() {
    let task = Task::new("A");
    let (renderer, drain) = structured(
        vec![task.clone()],
        StructuredRendererOptions {
            messages: vec![MessageField::Skip],
            messages_to_stderr: vec![],
            task: vec![TaskField::Title],
            ..StructuredRendererOptions::default()
        },
    );
    renderer.render();

    task.update_message(TaskMessage::skip("reason"));
    renderer.end();

    assert_equal!(
        drain.to_string(),
        r#"  {"event":"MESSAGE","data":{"skip":"reason"},"task":{"title":"A"}}
"#
        .to_string()
    );
}

#[test]
fn structured_error_routes_whole_message_to_stderr() {
    let task = Task::new("A");
    let (renderer, drain) = structured(
        vec![task.clone()],
        StructuredRendererOptions {
            messages: vec![MessageField::Error, MessageField::Skip],
            messages_to_stderr: vec![MessageField::Error],
            task: vec![TaskField::Title],
            ..StructuredRendererOptions::default()
        },
    );
    renderer.render();

    task.update_message(TaskMessage {
        error: Some("boom".into()),
        skip: Some("x".into()),
        ..TaskMessage::default()
    });
    renderer.end();

    assert!(drain.stdout().is_empty());
    assert_equal!(
        drain.stderr(),
        vec![r#"{"event":"MESSAGE","data":{"error":"boom","skip":"x"},"task":{"title":"A"}}"#.to_string()]
    );
}

#[test]
fn structured_default_record_snapshot() {
    let root = Task::new("root");
    let (renderer, drain) = structured(vec![root.clone()], StructuredRendererOptions::default());
    renderer.render();

    let child = root.child("child");
    root.add_subtasks(vec![child.clone()]);
    child.set_state(TaskState::Started);

    assert_equal!(
        drain.stdout(),
        vec![concat!(
            r#"{"event":"STATE","data":"STARTED","task":{"#,
            r#""hasRolledBack":false,"isRollingBack":false,"isCompleted":false,"isSkipped":false,"#,
            r#""hasFinalized":false,"hasSubtasks":false,"title":"child","hasReset":false,"#,
            r#""hasTitle":true,"isPrompt":false,"isPaused":false,"isPending":true,"isStarted":true,"#,
            r#""hasFailed":false,"isEnabled":true,"isRetrying":false,"path":["root","child"]}}"#
        )
        .to_string()]
    );
}
