//! Shared fixtures for task unit tests.

use crate::task::domain::{
    Attachment, Completion, PersistedTaskData, Priority, Task, TaskId,
};
use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;
use rstest::fixture;

/// Clock frozen at a fixed local wall-clock time.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    local: DateTime<Local>,
}

impl FixedClock {
    /// Freezes the clock at `hour:minute` on a fixed date.
    pub fn at(hour: u32, minute: u32) -> Self {
        let local = Local
            .with_ymd_and_hms(2026, 3, 14, hour, minute, 0)
            .single()
            .expect("unambiguous local time");
        Self { local }
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.local
    }

    fn utc(&self) -> DateTime<Utc> {
        self.local.with_timezone(&Utc)
    }
}

#[fixture]
pub fn clock() -> FixedClock {
    FixedClock::at(14, 30)
}

/// Builds a stored task with the given completion flag and priority.
pub fn stored_task(id: i64, completed: bool, priority: i32) -> Task {
    let completion = if completed {
        Completion::Done {
            completed_at: Some("09:15".to_owned()),
        }
    } else {
        Completion::Pending
    };
    Task::from_persisted(PersistedTaskData {
        id: TaskId::new(id),
        title: format!("task {id}"),
        description: String::new(),
        category_id: None,
        due_date: None,
        priority: Priority::new(priority),
        completion,
        attachment: Attachment::None,
    })
}
