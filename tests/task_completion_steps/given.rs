//! Given steps for task completion BDD scenarios.

use super::world::{TaskWorld, run_async};
use eyre::WrapErr;
use notelite::task::services::CreateTaskRequest;
use rstest_bdd_macros::given;

#[given("an empty task list")]
fn empty_task_list(world: &mut TaskWorld) -> Result<(), eyre::Report> {
    let tasks = world.tasks()?;
    eyre::ensure!(tasks.is_empty(), "expected no tasks, found {}", tasks.len());
    Ok(())
}

#[given(r#"a pending task "{title}" with priority {priority:i32}"#)]
fn pending_task(world: &mut TaskWorld, title: String, priority: i32) -> Result<(), eyre::Report> {
    run_async(
        world
            .service()
            .create_task(CreateTaskRequest::new(title).with_priority(priority)),
    )
    .wrap_err("create pending task")?;
    Ok(())
}

#[given(r#"a completed task "{title}""#)]
fn completed_task(world: &mut TaskWorld, title: String) -> Result<(), eyre::Report> {
    let service = world.service();
    let task = run_async(service.create_task(CreateTaskRequest::new(title)))
        .wrap_err("create task to complete")?;
    run_async(service.set_completion(task.id(), true)).wrap_err("complete task")?;
    Ok(())
}

#[given("the image host is unavailable")]
fn image_host_unavailable(world: &mut TaskWorld) {
    world.image_host_down = true;
}
