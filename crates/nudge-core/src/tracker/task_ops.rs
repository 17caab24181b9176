//! Task operations for the Tracker.

use jiff::civil;

use super::Tracker;
use crate::{
    db::Database,
    error::Result,
    models::{NewTask, Task, TaskKind, UpdateTaskRequest, WeekSchedule},
    params::{CreateTask, Id, UpdateTask},
};

/// Tasks seeded into an empty database.
fn default_tasks() -> [NewTask; 2] {
    [
        NewTask {
            title: "Weekly Learning (60 min)".to_string(),
            kind: TaskKind::WeeklyTimeQuota {
                weekly_goal_minutes: Some(60),
            },
            enabled: true,
            reminder_time: civil::time(11, 0, 0, 0),
            schedule: WeekSchedule::weekdays(),
        },
        NewTask {
            title: "Single weekly task example reminder".to_string(),
            kind: TaskKind::CompleteOnce,
            enabled: false,
            reminder_time: civil::time(16, 0, 0, 0),
            schedule: WeekSchedule::new([4]),
        },
    ]
}

impl Tracker {
    /// Creates a new task.
    pub async fn create_task(&self, params: &CreateTask) -> Result<Task> {
        let new_task = NewTask::try_from(params)?;
        self.with_db(move |db| db.create_task(&new_task)).await
    }

    /// Retrieves a task by its ID.
    ///
    /// # Errors
    ///
    /// Returns `NudgeError::TaskNotFound` if no task has this ID.
    pub async fn get_task(&self, params: &Id) -> Result<Task> {
        let id = params.id;
        self.with_db(move |db| db.get_task(id)).await
    }

    /// Lists all tasks ordered by ID.
    pub async fn list_tasks(&self) -> Result<Vec<Task>> {
        self.with_db(|db| db.list_tasks()).await
    }

    /// Updates the fields set in `params` and returns the updated task.
    pub async fn update_task(&self, params: &UpdateTask) -> Result<Task> {
        let id = params.id;
        let request = UpdateTaskRequest::try_from(params)?;
        self.with_db(move |db| db.update_task(id, &request)).await
    }

    /// Deletes a task together with its sessions, completions and snooze.
    pub async fn delete_task(&self, params: &Id) -> Result<Task> {
        let id = params.id;
        self.with_db(move |db| {
            let task = db.get_task(id)?;
            db.delete_task(id)?;
            Ok(task)
        })
        .await
    }

    /// Seeds the default tasks when no task exists yet.
    ///
    /// Returns the tasks that were created; empty if the database already
    /// held tasks.
    pub async fn ensure_default_tasks(&self) -> Result<Vec<Task>> {
        self.with_db(seed_default_tasks).await
    }
}

pub(crate) fn seed_default_tasks(db: &mut Database) -> Result<Vec<Task>> {
    if db.count_tasks()? > 0 {
        return Ok(Vec::new());
    }
    let mut created = Vec::new();
    for new_task in &default_tasks() {
        created.push(db.create_task(new_task)?);
    }
    log::info!("Seeded {} default tasks", created.len());
    Ok(created)
}
