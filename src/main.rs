use std::time::{Duration, Instant};
use taskrender::presets::{TimerPreset, TimestampFormat, TimestampPreset};
use taskrender::renderers::{Renderer, VerboseRenderer, VerboseRendererOptions};
use taskrender::{Task, TaskMessage, TaskState};

async fn run(task: Task, millis: u64) {
    let started = Instant::now();
    task.set_state(TaskState::Started);
    tokio::time::sleep(Duration::from_millis(millis / 2)).await;
    task.output(format!("{} is halfway there", task.title().unwrap_or_default()));
    tokio::time::sleep(Duration::from_millis(millis / 2)).await;
    task.update_message(TaskMessage::duration(started.elapsed().as_millis() as u64));
    task.set_state(TaskState::Completed);
}

#[tokio::main]
async fn main() {
    let root = Task::new("release");
    let renderer = VerboseRenderer::new(
        vec![root.clone()],
        VerboseRendererOptions {
            timer: Some(TimerPreset::default()),
            timestamp: Some(TimestampPreset {
                format: TimestampFormat::Local,
            }),
            ..VerboseRendererOptions::default()
        },
    );
    renderer.render();

    let started = Instant::now();
    root.set_state(TaskState::Started);

    // children only become known once the parent is running
    let group = root.untitled_child();
    let build = group.child("build");
    let lint = group.child("lint");
    root.add_subtasks(vec![group.clone()]);
    group.add_subtasks(vec![build.clone(), lint.clone()]);

    let (a, b) = tokio::join!(
        tokio::spawn(run(build, 1200)),
        tokio::spawn(async move {
            lint.update_message(TaskMessage::retry(1));
            run(lint, 700).await;
        }),
    );
    a.ok();
    b.ok();

    let publish = root.child("publish");
    root.add_subtasks(vec![publish.clone()]);
    publish.set_state(TaskState::Started);
    publish.update_message(TaskMessage::skip("dry run, nothing to publish"));
    publish.set_state(TaskState::Skipped);

    let prompt = root.child("confirm");
    root.add_subtasks(vec![prompt.clone()]);
    prompt.set_state(TaskState::Prompt);
    prompt.prompt("\u{1b}[2K\u{1b}[G\u{1b}[36m?\u{1b}[39m Tag the release? (Y/n) ");
    prompt.set_state(TaskState::PromptCompleted);

    root.update_message(TaskMessage::duration(started.elapsed().as_millis() as u64));
    root.set_state(TaskState::Completed);
    renderer.end();
}
