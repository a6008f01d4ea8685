use crate::{structured, verbose};
use k9::*;
use std::collections::BTreeSet;
use taskrender::renderers::{Renderer, StructuredRendererOptions, TaskField, VerboseRendererOptions};
use taskrender::{Task, TaskEventKind, TaskState};

#[test]
fn all_announced_children_are_followed() {
    let root = Task::new("root");
    let (renderer, drain) = verbose(vec![root.clone()], VerboseRendererOptions::default());
    renderer.render();

    let children = (0..5)
        .map(|i| root.child(format!("child {}", i)))
        .collect::<Vec<_>>();
    root.add_subtasks(children.clone());

    for child in children.iter().rev() {
        child.set_state(TaskState::Started);
        assert_equal!(child.listener_count(TaskEventKind::State), 1);
    }

    assert_equal!(
        drain.stdout(),
        (0..5)
            .rev()
            .map(|i| format!("[STARTED] child {}", i))
            .collect::<Vec<_>>()
    );
}

#[test]
fn children_announced_after_end_are_still_followed() {
    let root = Task::new("root");
    let (renderer, drain) = structured(
        vec![root.clone()],
        StructuredRendererOptions {
            task: vec![TaskField::Path],
            ..StructuredRendererOptions::default()
        },
    );
    renderer.render();
    renderer.end();

    let mut parent = root.clone();
    for depth in 0..20 {
        let child = parent.child(format!("{}", depth));
        parent.add_subtasks(vec![child.clone()]);
        parent = child;
    }
    parent.output("deep");

    let expected_path = (0..20)
        .map(|d| format!("\"{}\"", d))
        .collect::<Vec<_>>()
        .join(",");
    assert_equal!(
        drain.stdout(),
        vec![format!(
            r#"{{"event":"OUTPUT","data":"deep","task":{{"path":["root",{}]}}}}"#,
            expected_path
        )]
    );
}

#[test]
fn structured_without_subtasks_ignores_children() {
    let root = Task::new("root");
    let (renderer, drain) = structured(
        vec![root.clone()],
        StructuredRendererOptions {
            subtasks: false,
            task: vec![],
            ..StructuredRendererOptions::default()
        },
    );
    renderer.render();

    let child = root.child("child");
    root.add_subtasks(vec![child.clone()]);
    child.set_state(TaskState::Started);
    root.set_state(TaskState::Started);

    assert_equal!(
        drain.stdout(),
        vec![r#"{"event":"STATE","data":"STARTED"}"#.to_string()]
    );
}

#[test]
fn two_renderers_observe_the_same_tree() {
    let root = Task::new("root");
    let (a, a_drain) = verbose(vec![root.clone()], VerboseRendererOptions::default());
    let (b, b_drain) = structured(vec![root.clone()], StructuredRendererOptions::default());
    a.render();
    b.render();

    let child = root.child("child");
    root.add_subtasks(vec![child.clone()]);
    child.set_state(TaskState::Started);

    assert_equal!(a_drain.stdout(), vec!["[STARTED] child".to_string()]);
    assert_equal!(b_drain.stdout().len(), 1);
    assert_equal!(child.listener_count(TaskEventKind::State), 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_siblings_keep_their_own_order() {
    let root = Task::new("root");
    let (renderer, drain) = verbose(vec![root.clone()], VerboseRendererOptions::default());
    renderer.render();

    let children = (0..8)
        .map(|i| root.child(format!("t{}", i)))
        .collect::<Vec<_>>();
    root.add_subtasks(children.clone());

    let handles = children
        .into_iter()
        .map(|task| {
            tokio::spawn(async move {
                task.set_state(TaskState::Started);
                for step in 0..10 {
                    task.output(format!("{} {}", task.title().unwrap_or_default(), step));
                    tokio::task::yield_now().await;
                }
                task.set_state(TaskState::Completed);
            })
        })
        .collect::<Vec<_>>();
    for handle in handles {
        handle.await.unwrap();
    }
    renderer.end();

    let lines = drain.stdout();
    assert_equal!(lines.len(), 8 * 12);

    for i in 0..8 {
        let title = format!("t{}", i);
        let own = lines
            .iter()
            .filter(|line| line.ends_with(&format!(" {}", title)) || line.contains(&format!(" {} ", title)))
            .cloned()
            .collect::<Vec<_>>();

        let mut expected = vec![format!("[STARTED] {}", title)];
        expected.extend((0..10).map(|step| format!("[OUTPUT] {} {}", title, step)));
        expected.push(format!("[COMPLETED] {}", title));
        assert_equal!(own, expected);
    }

    let unique = lines.iter().collect::<BTreeSet<_>>();
    assert_equal!(unique.len(), lines.len());
}
