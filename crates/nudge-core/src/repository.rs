//! Storage surface consumed by the state engine and the scheduler.
//!
//! The engine's only write through this trait is
//! [`Repository::observe_snooze`], which reports the live snooze state and
//! clears a snooze that has already run out. The snooze setters are for
//! interfaces acting on a user's request.

use jiff::{civil::Date, Timestamp};

use crate::{
    db::Database,
    error::Result,
    models::{AppSettings, Session, SnoozeState, Task},
};

pub trait Repository {
    /// Current settings, with defaults for missing or malformed values.
    fn get_settings(&self) -> Result<AppSettings>;

    /// All tasks, ordered by ID.
    fn list_tasks(&self) -> Result<Vec<Task>>;

    /// A single task; `TaskNotFound` when it does not exist.
    fn get_task(&self, task_id: u64) -> Result<Task>;

    /// Stored snooze/skip flags without reconciliation.
    fn get_snooze_state(&self, task_id: u64) -> Result<SnoozeState>;

    /// Stored flags with an expired snooze cleared in storage and in the
    /// returned value. Idempotent.
    fn observe_snooze(&mut self, task_id: u64, now: Timestamp) -> Result<SnoozeState>;

    /// Sets or clears the snooze instant.
    fn set_snoozed_until(&mut self, task_id: u64, until: Option<Timestamp>) -> Result<()>;

    /// Sets or clears the skipped local date.
    fn set_skipped_date(&mut self, task_id: u64, date: Option<Date>) -> Result<()>;

    fn clear_snooze_and_skip(&mut self, task_id: u64) -> Result<()>;

    /// Whether a timed session is open for the task.
    fn is_session_running(&self, task_id: u64) -> Result<bool>;

    /// Every session of the task; the engine filters by period.
    fn list_sessions(&self, task_id: u64) -> Result<Vec<Session>>;

    /// Whether a completion record exists for `(task_id, period_key)`.
    fn is_completed(&self, task_id: u64, period_key: &str) -> Result<bool>;
}

impl Repository for Database {
    fn get_settings(&self) -> Result<AppSettings> {
        Database::get_settings(self)
    }

    fn list_tasks(&self) -> Result<Vec<Task>> {
        Database::list_tasks(self)
    }

    fn get_task(&self, task_id: u64) -> Result<Task> {
        Database::get_task(self, task_id)
    }

    fn get_snooze_state(&self, task_id: u64) -> Result<SnoozeState> {
        Database::get_snooze_state(self, task_id)
    }

    fn observe_snooze(&mut self, task_id: u64, now: Timestamp) -> Result<SnoozeState> {
        Database::observe_snooze(self, task_id, now)
    }

    fn set_snoozed_until(&mut self, task_id: u64, until: Option<Timestamp>) -> Result<()> {
        Database::set_snoozed_until(self, task_id, until)
    }

    fn set_skipped_date(&mut self, task_id: u64, date: Option<Date>) -> Result<()> {
        Database::set_skipped_date(self, task_id, date)
    }

    fn clear_snooze_and_skip(&mut self, task_id: u64) -> Result<()> {
        Database::clear_snooze_and_skip(self, task_id)
    }

    fn is_session_running(&self, task_id: u64) -> Result<bool> {
        Database::is_session_running(self, task_id)
    }

    fn list_sessions(&self, task_id: u64) -> Result<Vec<Session>> {
        Database::list_sessions(self, task_id)
    }

    fn is_completed(&self, task_id: u64, period_key: &str) -> Result<bool> {
        Database::is_completed(self, task_id, period_key)
    }
}
