//! Aggregate statistics over a task collection.

use super::{PriorityLevel, Task};
use serde::{Deserialize, Serialize};

/// Completion counts and progress for a task collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSummary {
    /// Number of tasks.
    pub total: usize,
    /// Number of done tasks.
    pub completed: usize,
    /// Number of pending tasks.
    pub remaining: usize,
    /// Share of done tasks as a whole percentage, rounded half up.
    pub progress: usize,
}

impl TaskSummary {
    /// Computes the summary of `tasks`.
    #[must_use]
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let total = tasks.len();
        let completed = tasks.iter().filter(|task| task.is_completed()).count();
        Self {
            total,
            completed,
            remaining: total.saturating_sub(completed),
            progress: progress_percent(completed, total),
        }
    }
}

/// Returns `round(100 * completed / total)`, or `0` for an empty collection.
///
/// Uses `(200c + t) / 2t` so halves round up without floating point.
#[expect(
    clippy::integer_division,
    reason = "the numerator is pre-biased so truncation yields round-half-up"
)]
const fn progress_percent(completed: usize, total: usize) -> usize {
    if total == 0 {
        return 0;
    }
    (200 * completed + total) / (2 * total)
}

/// Task counts per priority level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityBreakdown {
    /// Tasks with urgent priority (`3`).
    pub urgent: usize,
    /// Tasks with medium priority (`2`).
    pub medium: usize,
    /// Tasks with low priority (`1` or any unknown value).
    pub low: usize,
}

impl PriorityBreakdown {
    /// Counts `tasks` per priority level.
    #[must_use]
    pub fn from_tasks(tasks: &[Task]) -> Self {
        tasks
            .iter()
            .fold(Self::default(), |mut counts, task| {
                match task.priority().level() {
                    PriorityLevel::Urgent => counts.urgent += 1,
                    PriorityLevel::Medium => counts.medium += 1,
                    PriorityLevel::Low => counts.low += 1,
                }
                counts
            })
    }
}
