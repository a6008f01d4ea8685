use crate::structured;
use k9::*;
use taskrender::message::RetryMessage;
use taskrender::renderers::{Renderer, StructuredRendererOptions, TaskField};
use taskrender::{MessageField, Task, TaskMessage, TaskState};

fn titles_only() -> StructuredRendererOptions {
    StructuredRendererOptions {
        task: vec![TaskField::Title],
        ..StructuredRendererOptions::default()
    }
}

fn every_message_field() -> Vec<TaskMessage> {
    vec![
        TaskMessage::error("boom"),
        TaskMessage::skip("skipped"),
        TaskMessage::rollback("undo"),
        TaskMessage::retry(1),
        TaskMessage::paused(1_600_000_000_000),
        TaskMessage::duration(10),
        TaskMessage {
            error: Some("boom".into()),
            skip: Some("skipped".into()),
            rollback: Some("undo".into()),
            retry: Some(RetryMessage {
                count: 4,
                error: None,
            }),
            paused: Some(1),
            duration: Some(1),
        },
    ]
}

#[test]
fn empty_allow_list_suppresses_every_message() {
    let task = Task::new("build");
    let (renderer, drain) = structured(
        vec![task.clone()],
        StructuredRendererOptions {
            messages: vec![],
            ..titles_only()
        },
    );
    renderer.render();

    for message in every_message_field() {
        task.update_message(message);
    }
    assert!(drain.lines().is_empty());
}

#[test]
fn any_stderr_field_routes_message_to_stderr() {
    let task = Task::new("build");
    let (renderer, drain) = structured(
        vec![task.clone()],
        StructuredRendererOptions {
            messages: vec![MessageField::Skip, MessageField::Retry, MessageField::Paused],
            messages_to_stderr: vec![MessageField::Retry],
            ..titles_only()
        },
    );
    renderer.render();

    task.update_message(TaskMessage::skip("a"));
    task.update_message(TaskMessage {
        skip: Some("b".into()),
        retry: Some(RetryMessage {
            count: 2,
            error: None,
        }),
        ..TaskMessage::default()
    });
    // error isn't rendered, so it can't route to stderr either
    task.update_message(TaskMessage {
        error: Some("hidden".into()),
        paused: Some(5),
        ..TaskMessage::default()
    });

    assert_equal!(
        drain.to_string(),
        r#"  {"event":"MESSAGE","data":{"skip":"a"},"task":{"title":"build"}}
! {"event":"MESSAGE","data":{"skip":"b","retry":{"count":2}},"task":{"title":"build"}}
  {"event":"MESSAGE","data":{"paused":5},"task":{"title":"build"}}
"#
        .to_string()
    );
}

#[test]
fn non_message_events_always_go_to_stdout() {
    let task = Task::new("build");
    let (renderer, drain) = structured(
        vec![task.clone()],
        StructuredRendererOptions {
            messages_to_stderr: vec![
                MessageField::Error,
                MessageField::Skip,
                MessageField::Rollback,
                MessageField::Retry,
                MessageField::Paused,
            ],
            ..titles_only()
        },
    );
    renderer.render();

    task.set_state(TaskState::Failed);
    task.output("compiling");
    task.prompt("\u{1b}[36m?\u{1b}[39m Sure?");
    task.set_title("build again");

    assert!(drain.stderr().is_empty());
    assert_equal!(
        drain.stdout(),
        vec![
            r#"{"event":"STATE","data":"FAILED","task":{"title":"build"}}"#.to_string(),
            r#"{"event":"OUTPUT","data":"compiling","task":{"title":"build"}}"#.to_string(),
            r#"{"event":"PROMPT","data":"\u001b[36m?\u001b[39m Sure?","task":{"title":"build"}}"#.to_string(),
            r#"{"event":"TITLE","data":"build again","task":{"title":"build again"}}"#.to_string(),
        ]
    );
}

#[test]
fn same_event_renders_identically() {
    let first = Task::new("build");
    let second = Task::new("build");
    let (renderer, drain) = structured(
        vec![first.clone(), second.clone()],
        StructuredRendererOptions::default(),
    );
    renderer.render();

    for task in &[first, second] {
        task.set_state(TaskState::Started);
        task.update_message(TaskMessage::error("boom"));
    }

    let stdout = drain.stdout();
    let stderr = drain.stderr();
    assert_equal!(stdout.len(), 2);
    assert_equal!(stderr.len(), 2);
    assert_equal!(stdout[0], stdout[1]);
    assert_equal!(stderr[0], stderr[1]);
}
