//! Command-line front end for the local task list.
//!
//! Usage:
//!
//! ```text
//! notelite [--config notelite.toml] <command>
//! ```
//!
//! Commands: `add`, `list`, `edit`, `done`, `undo`, `toggle`, `rm`, `stats`,
//! and `retry-upload`. Settings come from the TOML file and `NOTELITE_`
//! environment variables; `NOTELITE_LOG` sets the log filter.

use clap::{Args, Parser, Subcommand};
use mockable::DefaultClock;
use notelite::config::{DEFAULT_CONFIG_FILE, NoteliteConfig};
use notelite::task::{
    adapters::{http::HttpImageUploader, sqlite::SqliteTaskRepository},
    domain::{Attachment, PriorityBreakdown, Task, TaskId, TaskSummary},
    ports::MutationOutcome,
    services::{CreateTaskRequest, EditTaskRequest, TaskLifecycleService},
};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tracing::warn;
use tracing_subscriber::EnvFilter;

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

type CliService = TaskLifecycleService<SqliteTaskRepository, HttpImageUploader, DefaultClock>;

/// Environment variable holding the log filter.
const LOG_ENV: &str = "NOTELITE_LOG";

#[derive(Debug, Parser)]
#[command(name = "notelite", version, about = "Local to-do list with image attachments")]
struct Cli {
    /// Configuration file; missing files are ignored.
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Add a pending task.
    Add(TaskFields),
    /// List tasks, pending first and most urgent first.
    List {
        /// Print the tasks as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Replace a task's title, description, and priority.
    Edit {
        /// Task id.
        id: i64,
        #[command(flatten)]
        fields: TaskFields,
    },
    /// Mark a task done.
    Done {
        /// Task id.
        id: i64,
    },
    /// Mark a task pending.
    Undo {
        /// Task id.
        id: i64,
    },
    /// Flip a task between pending and done.
    Toggle {
        /// Task id.
        id: i64,
    },
    /// Delete a task.
    Rm {
        /// Task id.
        id: i64,
    },
    /// Show completion progress and the priority breakdown.
    Stats,
    /// Upload an image that failed to upload earlier.
    RetryUpload {
        /// Task id.
        id: i64,
    },
}

#[derive(Debug, Args)]
struct TaskFields {
    /// Task title.
    title: String,
    /// Free-form note.
    #[arg(short, long)]
    description: Option<String>,
    /// 1 = low, 2 = medium, 3 = urgent.
    #[arg(short, long)]
    priority: Option<i32>,
    /// Local file or remote URL; an empty value removes the image.
    #[arg(short, long)]
    image: Option<String>,
}

/// Errors raised while setting up the command-line environment.
#[derive(Debug, Error)]
enum CliError {
    #[error("failed to initialize tracing subscriber: {0}")]
    Tracing(String),
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let cli = Cli::parse();
    init_tracing()?;

    let config = NoteliteConfig::load_from(&cli.config)?;
    let repository = SqliteTaskRepository::connect(&config.database)?;
    let uploader = HttpImageUploader::new(&config.upload)?;
    let service = TaskLifecycleService::new(
        Arc::new(repository),
        Arc::new(uploader),
        Arc::new(DefaultClock),
    );
    let result = match service.init().await {
        Ok(()) => run(&service, cli.command, &mut io::stdout().lock()).await,
        Err(err) => Err(err.into()),
    };
    close_storage(service);
    result
}

/// Closes the database once the service has released it.
fn close_storage(service: CliService) {
    match Arc::try_unwrap(service.into_repository()) {
        Ok(repository) => repository.close(),
        Err(_) => warn!("task database still shared; leaving it open"),
    }
}

fn init_tracing() -> Result<(), CliError> {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("notelite=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|err| CliError::Tracing(err.to_string()))
}

async fn run(service: &CliService, command: Command, out: &mut impl Write) -> Result<(), BoxError> {
    match command {
        Command::Add(fields) => {
            let task = service.create_task(create_request(fields)).await?;
            writeln!(out, "added #{}", task.id())?;
            if let Attachment::PendingUpload(reference) = task.attachment() {
                writeln!(out, "image upload failed; kept {reference} for retry-upload")?;
            }
        }
        Command::List { json } => {
            let tasks = service.refresh(Vec::new()).await;
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(&tasks)?)?;
            } else {
                for task in &tasks {
                    writeln!(out, "{}", render(task))?;
                }
            }
        }
        Command::Edit { id, fields } => {
            let task_id = TaskId::new(id);
            let outcome = service.edit_task(task_id, edit_request(fields)).await?;
            report(out, "edited", task_id, outcome)?;
        }
        Command::Done { id } => {
            let task_id = TaskId::new(id);
            report(out, "done", task_id, service.set_completion(task_id, true).await?)?;
        }
        Command::Undo { id } => {
            let task_id = TaskId::new(id);
            report(out, "pending", task_id, service.set_completion(task_id, false).await?)?;
        }
        Command::Toggle { id } => {
            let task_id = TaskId::new(id);
            report(out, "toggled", task_id, service.toggle_completion(task_id).await?)?;
        }
        Command::Rm { id } => {
            let task_id = TaskId::new(id);
            report(out, "removed", task_id, service.remove_task(task_id).await?)?;
        }
        Command::Stats => {
            let tasks = service.refresh(Vec::new()).await;
            let summary = TaskSummary::from_tasks(&tasks);
            let breakdown = PriorityBreakdown::from_tasks(&tasks);
            writeln!(
                out,
                "{} of {} done, {} left ({}%)",
                summary.completed, summary.total, summary.remaining, summary.progress
            )?;
            writeln!(
                out,
                "urgent {}  medium {}  low {}",
                breakdown.urgent, breakdown.medium, breakdown.low
            )?;
        }
        Command::RetryUpload { id } => {
            match service.retry_pending_attachment(TaskId::new(id)).await? {
                None => writeln!(out, "no task #{id}")?,
                Some(Attachment::Remote(url)) => writeln!(out, "#{id} image at {url}")?,
                Some(Attachment::PendingUpload(_)) => {
                    writeln!(out, "#{id} image upload failed again")?;
                }
                Some(Attachment::None) => writeln!(out, "#{id} has no image")?,
            }
        }
    }
    Ok(())
}

fn create_request(fields: TaskFields) -> CreateTaskRequest {
    let mut request = CreateTaskRequest::new(fields.title);
    if let Some(description) = fields.description {
        request = request.with_description(description);
    }
    if let Some(priority) = fields.priority {
        request = request.with_priority(priority);
    }
    if let Some(image) = fields.image {
        request = request.with_image(image);
    }
    request
}

fn edit_request(fields: TaskFields) -> EditTaskRequest {
    let mut request = EditTaskRequest::new(fields.title);
    if let Some(description) = fields.description {
        request = request.with_description(description);
    }
    if let Some(priority) = fields.priority {
        request = request.with_priority(priority);
    }
    if let Some(image) = fields.image {
        request = request.with_image(image);
    }
    request
}

fn report(
    out: &mut impl Write,
    verb: &str,
    id: TaskId,
    outcome: MutationOutcome,
) -> io::Result<()> {
    match outcome {
        MutationOutcome::Applied => writeln!(out, "{verb} #{id}"),
        MutationOutcome::NoMatch => writeln!(out, "no task #{id}"),
    }
}

fn render(task: &Task) -> String {
    let mark = if task.is_completed() { "x" } else { " " };
    let mut line = format!(
        "[{mark}] #{} ({}) {}",
        task.id(),
        task.priority().level().as_str(),
        task.title()
    );
    if !task.description().is_empty() {
        line.push_str(" - ");
        line.push_str(task.description());
    }
    if let Some(at) = task.completed_at() {
        line.push_str(" @ ");
        line.push_str(at);
    }
    match task.attachment() {
        Attachment::None => {}
        Attachment::Remote(url) => {
            line.push_str(" [image ");
            line.push_str(url);
            line.push(']');
        }
        Attachment::PendingUpload(reference) => {
            line.push_str(" [image pending ");
            line.push_str(reference);
            line.push(']');
        }
    }
    line
}
