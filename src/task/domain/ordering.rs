//! Display ordering for task collections.

use super::Task;
use std::cmp::Ordering;

/// Compares two tasks for display.
///
/// Pending tasks sort before done tasks; within the same completion state,
/// higher raw priority sorts first. Remaining ties compare equal.
#[must_use]
pub fn compare_for_display(a: &Task, b: &Task) -> Ordering {
    a.completion()
        .as_flag()
        .cmp(&b.completion().as_flag())
        .then_with(|| b.priority().cmp(&a.priority()))
}

/// Sorts tasks into display order.
///
/// The sort is stable, so equal tasks keep the order the store returned.
pub fn sort_for_display(tasks: &mut [Task]) {
    tasks.sort_by(compare_for_display);
}
