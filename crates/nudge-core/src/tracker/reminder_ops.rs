//! Snooze, skip, settings and task state operations for the Tracker.

use jiff::{SignedDuration, Timestamp};
use log::warn;

use super::Tracker;
use crate::{
    engine::{compute_task_state, TaskState},
    error::{NudgeError, Result},
    models::AppSettings,
    params::{Id, SnoozeTask, UpdateSettings},
    period::{now_utc, to_local, tomorrow_at},
};

impl Tracker {
    /// Snoozes a task for `params.minutes` from now and returns the instant
    /// the snooze ends.
    pub async fn snooze_for(&self, params: &SnoozeTask) -> Result<Timestamp> {
        let SnoozeTask { id, minutes } = *params;
        if minutes == 0 {
            return Err(NudgeError::invalid_input("minutes")
                .with_reason("Snooze duration must be at least 1 minute"));
        }
        self.with_db(move |db| {
            let until = now_utc().checked_add(SignedDuration::from_mins(i64::from(minutes)))?;
            db.set_snoozed_until(id, Some(until))?;
            Ok(until)
        })
        .await
    }

    /// Snoozes a task until tomorrow at the configured reminder start time.
    pub async fn snooze_until_tomorrow(&self, params: &Id) -> Result<Timestamp> {
        let id = params.id;
        self.with_db(move |db| {
            let settings = db.get_settings()?;
            let now_local = to_local(now_utc());
            let until = tomorrow_at(&now_local, settings.reminder_start_time)?.timestamp();
            db.set_snoozed_until(id, Some(until))?;
            Ok(until)
        })
        .await
    }

    /// Suppresses reminders for the rest of the local day.
    pub async fn skip_today(&self, params: &Id) -> Result<()> {
        let id = params.id;
        self.with_db(move |db| {
            let today = to_local(now_utc()).date();
            db.set_skipped_date(id, Some(today))
        })
        .await
    }

    /// Removes any snooze and skip on the task.
    pub async fn clear_snooze_and_skip(&self, params: &Id) -> Result<()> {
        let id = params.id;
        self.with_db(move |db| db.clear_snooze_and_skip(id)).await
    }

    pub async fn get_settings(&self) -> Result<AppSettings> {
        self.with_db(|db| db.get_settings()).await
    }

    /// Applies the settings changes in `params` and returns the result.
    pub async fn update_settings(&self, params: &UpdateSettings) -> Result<AppSettings> {
        if params.is_empty() {
            return Err(NudgeError::invalid_input("settings")
                .with_reason("Nothing to update; specify at least one setting"));
        }
        let (repeat, start) = params.validate()?;
        let start_at_login = params.start_at_login;

        self.with_db(move |db| {
            if let Some(minutes) = repeat {
                db.set_repeat_interval_minutes(minutes)?;
            }
            if let Some(time) = start {
                db.set_reminder_start_time(time)?;
            }
            if let Some(enabled) = start_at_login {
                db.set_start_at_login(enabled)?;
            }
            db.get_settings()
        })
        .await
    }

    /// Current state of one task.
    pub async fn task_state(&self, params: &Id) -> Result<TaskState> {
        let id = params.id;
        self.with_db(move |db| {
            let settings = db.get_settings()?;
            let task = db.get_task(id)?;
            let now = now_utc();
            compute_task_state(db, &task, now, &to_local(now), &settings)
        })
        .await
    }

    /// Current state of every task, all evaluated at the same instant.
    ///
    /// A task whose state cannot be computed is logged and left out, as the
    /// scheduler does.
    pub async fn task_states(&self) -> Result<Vec<TaskState>> {
        self.with_db(|db| {
            let settings = db.get_settings()?;
            let tasks = db.list_tasks()?;
            let now = now_utc();
            let now_local = to_local(now);

            let mut states = Vec::with_capacity(tasks.len());
            for task in &tasks {
                match compute_task_state(&mut *db, task, now, &now_local, &settings) {
                    Ok(state) => states.push(state),
                    Err(e) => warn!("Leaving task {} out of the status: {e}", task.id),
                }
            }
            Ok(states)
        })
        .await
    }
}
