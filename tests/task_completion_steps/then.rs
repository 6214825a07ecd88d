//! Then steps for task completion BDD scenarios.

use super::world::{TaskWorld, run_async};
use notelite::task::{domain::Attachment, ports::MutationOutcome};
use rstest_bdd_macros::then;

#[then("the task list has {count:usize} task")]
fn task_list_has(world: &TaskWorld, count: usize) -> Result<(), eyre::Report> {
    let tasks = world.tasks()?;
    eyre::ensure!(
        tasks.len() == count,
        "expected {count} tasks, found {}",
        tasks.len()
    );
    Ok(())
}

#[then(r#"the task "{title}" is done at "{time}""#)]
fn task_done_at(world: &TaskWorld, title: String, time: String) -> Result<(), eyre::Report> {
    let task = world.task_titled(&title)?;
    eyre::ensure!(task.is_completed(), "expected '{title}' to be done");
    eyre::ensure!(
        task.completed_at() == Some(time.as_str()),
        "expected completion time {time}, found {:?}",
        task.completed_at()
    );
    Ok(())
}

#[then(r#"the task "{title}" is pending"#)]
fn task_pending(world: &TaskWorld, title: String) -> Result<(), eyre::Report> {
    let task = world.task_titled(&title)?;
    eyre::ensure!(!task.is_completed(), "expected '{title}' to be pending");
    eyre::ensure!(
        task.completed_at().is_none(),
        "expected no completion time, found {:?}",
        task.completed_at()
    );
    Ok(())
}

#[then("progress is {percent:usize} percent")]
fn progress_is(world: &TaskWorld, percent: usize) -> Result<(), eyre::Report> {
    let summary = run_async(world.service().summary())
        .map_err(|err| eyre::eyre!("summary failed: {err}"))?;
    eyre::ensure!(
        summary.progress == percent,
        "expected progress {percent}, found {}",
        summary.progress
    );
    Ok(())
}

#[then(r#"the task titles in order are "{titles}""#)]
fn titles_in_order(world: &TaskWorld, titles: String) -> Result<(), eyre::Report> {
    let expected: Vec<&str> = titles.split(',').map(str::trim).collect();
    let tasks = world.tasks()?;
    let actual: Vec<&str> = tasks.iter().map(|task| task.title()).collect();
    eyre::ensure!(
        actual == expected,
        "expected order {expected:?}, found {actual:?}"
    );
    Ok(())
}

#[then("the delete reports no match")]
fn delete_reports_no_match(world: &TaskWorld) -> Result<(), eyre::Report> {
    eyre::ensure!(
        world.last_delete == Some(MutationOutcome::NoMatch),
        "expected NoMatch, found {:?}",
        world.last_delete
    );
    Ok(())
}

#[then(r#"the task "{title}" keeps "{image}" pending upload"#)]
fn task_keeps_pending_image(
    world: &TaskWorld,
    title: String,
    image: String,
) -> Result<(), eyre::Report> {
    let task = world.task_titled(&title)?;
    eyre::ensure!(
        task.attachment() == &Attachment::PendingUpload(image.clone()),
        "expected pending upload of {image}, found {:?}",
        task.attachment()
    );
    Ok(())
}
