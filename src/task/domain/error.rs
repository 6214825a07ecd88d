//! Error types for task domain validation.

use thiserror::Error;

/// Errors returned while validating task input at the service boundary.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,
}
