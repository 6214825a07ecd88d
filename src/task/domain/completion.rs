//! Two-state completion lifecycle for tasks.

use mockable::Clock;
use serde::{Deserialize, Serialize};

/// `strftime` pattern for completion timestamps (local hour and minute).
pub const COMPLETED_AT_FORMAT: &str = "%H:%M";

/// Completion state of a task.
///
/// A task is either pending or done. Entering [`Completion::Done`] records
/// the local time of the transition for display; leaving it clears the
/// timestamp.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Completion {
    /// Work on the task is outstanding.
    #[default]
    Pending,
    /// The task has been completed.
    Done {
        /// Local time of completion as `HH:MM`.
        ///
        /// Always set by this crate; `None` only for rows written elsewhere
        /// with `is_completed = 1` and no timestamp.
        completed_at: Option<String>,
    },
}

impl Completion {
    /// Computes the state reached by setting the completion flag.
    ///
    /// Setting `completed = true` always stamps the current local time, even
    /// when the task was already done; the flag is caller-supplied and no
    /// prior state is consulted.
    #[must_use]
    pub fn for_flag(completed: bool, clock: &impl Clock) -> Self {
        if completed {
            Self::Done {
                completed_at: Some(clock.local().format(COMPLETED_AT_FORMAT).to_string()),
            }
        } else {
            Self::Pending
        }
    }

    /// Reconstructs the state from persisted column values.
    ///
    /// Any non-zero flag is read as done. A pending row never carries a
    /// timestamp, so one left behind by another writer is dropped.
    #[must_use]
    pub fn from_columns(is_completed: i32, completed_at: Option<String>) -> Self {
        if is_completed == 0 {
            Self::Pending
        } else {
            Self::Done { completed_at }
        }
    }

    /// Returns the state reached by flipping this one.
    #[must_use]
    pub fn toggled(&self, clock: &impl Clock) -> Self {
        Self::for_flag(!self.is_done(), clock)
    }

    /// Returns `true` when the task is done.
    #[must_use]
    pub const fn is_done(&self) -> bool {
        matches!(self, Self::Done { .. })
    }

    /// Returns the `is_completed` column value (`0` or `1`).
    #[must_use]
    pub const fn as_flag(&self) -> i32 {
        match self {
            Self::Pending => 0,
            Self::Done { .. } => 1,
        }
    }

    /// Returns the completion timestamp, if any.
    #[must_use]
    pub fn completed_at(&self) -> Option<&str> {
        match self {
            Self::Pending => None,
            Self::Done { completed_at } => completed_at.as_deref(),
        }
    }
}
