//! Task CRUD operations and queries.

use log::warn;
use rusqlite::{params, OptionalExtension, Row};

use super::invalid_text;
use crate::{
    error::{DatabaseResultExt, NudgeError, Result},
    models::{NewTask, PeriodKind, Task, TaskKind, UpdateTaskRequest, WeekSchedule},
    period::{format_hhmm, parse_hhmm_or_default},
};

const TASK_COLUMNS: &str =
    "id, title, task_type, enabled, reminder_time, active_weekdays, weekly_goal_minutes, period";
const INSERT_TASK_SQL: &str = "INSERT INTO tasks (title, task_type, enabled, reminder_time, active_weekdays, weekly_goal_minutes, period) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)";
const UPDATE_TASK_SQL: &str = "UPDATE tasks SET title = ?1, enabled = ?2, reminder_time = ?3, active_weekdays = ?4, weekly_goal_minutes = ?5 WHERE id = ?6";
const DELETE_TASK_SQL: &str = "DELETE FROM tasks WHERE id = ?1";
const CHECK_TASK_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM tasks WHERE id = ?1)";
const COUNT_TASKS_SQL: &str = "SELECT COUNT(*) FROM tasks";

impl super::Database {
    /// Inserts a new task and returns it with its assigned ID.
    pub fn create_task(&mut self, new_task: &NewTask) -> Result<Task> {
        let title = validate_title(&new_task.title)?;

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        tx.execute(
            INSERT_TASK_SQL,
            params![
                title,
                new_task.kind.as_str(),
                new_task.enabled,
                format_hhmm(new_task.reminder_time),
                new_task.schedule.to_csv(),
                new_task.kind.weekly_goal_minutes(),
                PeriodKind::Workweek.as_str(),
            ],
        )
        .db_context("Failed to insert task")?;

        let id = tx.last_insert_rowid() as u64;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(Task {
            id,
            title: title.to_string(),
            kind: new_task.kind,
            enabled: new_task.enabled,
            schedule: new_task.schedule.clone(),
            reminder_time: new_task.reminder_time,
            period: PeriodKind::Workweek,
        })
    }

    /// Retrieves a task by its ID.
    ///
    /// # Errors
    ///
    /// Returns `NudgeError::TaskNotFound` if no such task exists.
    pub fn get_task(&self, id: u64) -> Result<Task> {
        let sql = format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?1");
        self.connection
            .query_row(&sql, params![id as i64], task_from_row)
            .optional()
            .db_context("Failed to query task")?
            .ok_or(NudgeError::TaskNotFound { id })
    }

    /// Lists all tasks ordered by ID.
    ///
    /// A row that cannot be decoded is logged and left out, so one corrupt
    /// task does not hide the others.
    pub fn list_tasks(&self) -> Result<Vec<Task>> {
        let sql = format!("SELECT {TASK_COLUMNS} FROM tasks ORDER BY id ASC");
        let mut stmt = self
            .connection
            .prepare(&sql)
            .db_context("Failed to prepare query")?;

        let rows = stmt
            .query_map([], task_from_row)
            .db_context("Failed to query tasks")?;

        let mut tasks = Vec::new();
        for row in rows {
            match row {
                Ok(task) => tasks.push(task),
                Err(e) => warn!("Skipping unreadable task row: {e}"),
            }
        }
        Ok(tasks)
    }

    /// Number of stored tasks.
    pub fn count_tasks(&self) -> Result<u64> {
        let count: i64 = self
            .connection
            .query_row(COUNT_TASKS_SQL, [], |row| row.get(0))
            .db_context("Failed to count tasks")?;
        Ok(count as u64)
    }

    /// Applies a partial update and returns the updated task.
    pub fn update_task(&mut self, id: u64, request: &UpdateTaskRequest) -> Result<Task> {
        let mut task = self.get_task(id)?;

        if let Some(ref title) = request.title {
            task.title = validate_title(title)?.to_string();
        }
        if let Some(enabled) = request.enabled {
            task.enabled = enabled;
        }
        if let Some(reminder_time) = request.reminder_time {
            task.reminder_time = reminder_time;
        }
        if let Some(ref schedule) = request.schedule {
            task.schedule = schedule.clone();
        }
        if let Some(goal) = request.weekly_goal_minutes {
            match task.kind {
                TaskKind::WeeklyTimeQuota { .. } => {
                    task.kind = TaskKind::WeeklyTimeQuota {
                        weekly_goal_minutes: Some(goal),
                    };
                }
                TaskKind::CompleteOnce => {
                    return Err(NudgeError::invalid_input("weekly_goal_minutes")
                        .with_reason("Only weekly time quota tasks have a goal"));
                }
            }
        }

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;
        tx.execute(
            UPDATE_TASK_SQL,
            params![
                task.title,
                task.enabled,
                format_hhmm(task.reminder_time),
                task.schedule.to_csv(),
                task.kind.weekly_goal_minutes(),
                id as i64,
            ],
        )
        .db_context("Failed to update task")?;
        tx.commit().db_context("Failed to commit transaction")?;

        Ok(task)
    }

    /// Deletes a task together with its sessions, completions and snoozes.
    pub fn delete_task(&mut self, id: u64) -> Result<()> {
        let deleted = self
            .connection
            .execute(DELETE_TASK_SQL, params![id as i64])
            .db_context("Failed to delete task")?;

        if deleted == 0 {
            return Err(NudgeError::TaskNotFound { id });
        }
        Ok(())
    }

    /// Returns `TaskNotFound` unless the task exists.
    pub(crate) fn ensure_task_exists(&self, id: u64) -> Result<()> {
        let exists: bool = self
            .connection
            .query_row(CHECK_TASK_EXISTS_SQL, params![id as i64], |row| row.get(0))
            .db_context("Failed to check task existence")?;

        if exists {
            Ok(())
        } else {
            Err(NudgeError::TaskNotFound { id })
        }
    }
}

fn validate_title(title: &str) -> Result<&str> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(NudgeError::invalid_input("title").with_reason("Title must not be empty"));
    }
    Ok(trimmed)
}

fn task_from_row(row: &Row<'_>) -> rusqlite::Result<Task> {
    let type_str: String = row.get(2)?;
    let goal: Option<u32> = row.get(6)?;
    let kind = TaskKind::from_parts(&type_str, goal).map_err(|msg| invalid_text(2, msg))?;

    let weekdays: String = row.get(5)?;
    let schedule = WeekSchedule::from_csv(&weekdays).map_err(|msg| invalid_text(5, msg))?;

    let period_str: String = row.get(7)?;
    let period = period_str
        .parse::<PeriodKind>()
        .map_err(|msg| invalid_text(7, msg))?;

    let reminder_time: String = row.get(4)?;

    Ok(Task {
        id: row.get::<_, i64>(0)? as u64,
        title: row.get(1)?,
        kind,
        enabled: row.get(3)?,
        schedule,
        reminder_time: parse_hhmm_or_default(&reminder_time),
        period,
    })
}
