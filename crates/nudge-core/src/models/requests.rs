//! Request types for creating and updating tasks.

use jiff::civil::Time;
use serde::{Deserialize, Serialize};

use super::{TaskKind, WeekSchedule};

/// Everything needed to insert a task.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewTask {
    pub title: String,
    pub kind: TaskKind,
    pub enabled: bool,
    pub reminder_time: Time,
    pub schedule: WeekSchedule,
}

/// Partial update of a task. `None` leaves the field unchanged.
///
/// The task kind is fixed at creation; `weekly_goal_minutes` is rejected for
/// complete-once tasks.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    pub enabled: Option<bool>,
    pub reminder_time: Option<Time>,
    pub schedule: Option<WeekSchedule>,
    pub weekly_goal_minutes: Option<u32>,
}

impl UpdateTaskRequest {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.enabled.is_none()
            && self.reminder_time.is_none()
            && self.schedule.is_none()
            && self.weekly_goal_minutes.is_none()
    }
}
