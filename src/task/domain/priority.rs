//! Task priority value and its display levels.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Raw task priority as stored in the `priority` column.
///
/// The store accepts any integer. Readers that switch on the known levels go
/// through [`Priority::level`], which folds unknown values into
/// [`PriorityLevel::Low`]. Display ordering compares the raw value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Priority(i32);

impl Priority {
    /// Low priority (`1`), the default.
    pub const LOW: Self = Self(1);
    /// Medium priority (`2`).
    pub const MEDIUM: Self = Self(2);
    /// Urgent priority (`3`).
    pub const URGENT: Self = Self(3);

    /// Wraps a raw priority value without validation.
    #[must_use]
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    /// Returns the raw stored value.
    #[must_use]
    pub const fn value(self) -> i32 {
        self.0
    }

    /// Returns the display level, treating unknown values as low.
    #[must_use]
    pub const fn level(self) -> PriorityLevel {
        match self.0 {
            3 => PriorityLevel::Urgent,
            2 => PriorityLevel::Medium,
            _ => PriorityLevel::Low,
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::LOW
    }
}

impl From<i32> for Priority {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl From<PriorityLevel> for Priority {
    fn from(level: PriorityLevel) -> Self {
        match level {
            PriorityLevel::Low => Self::LOW,
            PriorityLevel::Medium => Self::MEDIUM,
            PriorityLevel::Urgent => Self::URGENT,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Known priority levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityLevel {
    /// Low priority.
    Low,
    /// Medium priority.
    Medium,
    /// Urgent priority.
    Urgent,
}

impl PriorityLevel {
    /// Returns the human-readable label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::Urgent => "urgent",
        }
    }
}

impl fmt::Display for PriorityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
