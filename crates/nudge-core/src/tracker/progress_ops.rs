//! Session, manual-minute and completion operations for the Tracker.
//!
//! Operations that touch "the current period" resolve it from the wall
//! clock in the system time zone at the moment of the call.

use serde::Serialize;

use super::Tracker;
use crate::{
    error::Result,
    models::Session,
    params::{Id, LogMinutes, ResetTask},
    period::{now_utc, period_key_workweek, to_local},
};

/// Outcome of toggling a task's timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionToggle {
    Started,
    Stopped,
}

/// What a reset removed from the current period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ResetOutcome {
    pub completion_cleared: bool,
    pub sessions_deleted: usize,
}

impl Tracker {
    /// Starts a timed session. Returns `false` if one was already running.
    pub async fn start_session(&self, params: &Id) -> Result<bool> {
        let id = params.id;
        self.with_db(move |db| db.start_session(id, now_utc())).await
    }

    /// Stops the running session. Returns `false` if none was running.
    pub async fn stop_session(&self, params: &Id) -> Result<bool> {
        let id = params.id;
        self.with_db(move |db| db.stop_session(id, now_utc())).await
    }

    /// Stops the running session, or starts one if none is running.
    pub async fn toggle_session(&self, params: &Id) -> Result<SessionToggle> {
        let id = params.id;
        self.with_db(move |db| {
            let now = now_utc();
            if db.is_session_running(id)? {
                db.stop_session(id, now)?;
                Ok(SessionToggle::Stopped)
            } else {
                db.start_session(id, now)?;
                Ok(SessionToggle::Started)
            }
        })
        .await
    }

    /// Logs manual minutes against the current instant.
    pub async fn log_minutes(&self, params: &LogMinutes) -> Result<Session> {
        let LogMinutes { id, minutes } = *params;
        self.with_db(move |db| db.add_manual_minutes(id, minutes, now_utc()))
            .await
    }

    /// Marks the task complete for the current work week. Returns `false`
    /// if it already was.
    pub async fn mark_complete(&self, params: &Id) -> Result<bool> {
        let id = params.id;
        self.with_db(move |db| {
            let now = now_utc();
            let period_key = period_key_workweek(&to_local(now))?;
            db.mark_complete(id, &period_key, now)
        })
        .await
    }

    /// Removes the current work week's completion record. Returns `false`
    /// if there was none.
    pub async fn clear_completion(&self, params: &Id) -> Result<bool> {
        let id = params.id;
        self.with_db(move |db| {
            let period_key = period_key_workweek(&to_local(now_utc()))?;
            db.clear_completion(id, &period_key)
        })
        .await
    }

    /// Clears the current work week's completion and, with
    /// `params.progress`, deletes the sessions that started in it.
    pub async fn reset_task(&self, params: &ResetTask) -> Result<ResetOutcome> {
        let ResetTask { id, progress } = *params;
        self.with_db(move |db| {
            let now_local = to_local(now_utc());
            let period_key = period_key_workweek(&now_local)?;

            let sessions_deleted = if progress {
                db.delete_sessions_for_period(id, &period_key, now_local.time_zone())?
            } else {
                0
            };
            let completion_cleared = db.clear_completion(id, &period_key)?;

            Ok(ResetOutcome {
                completion_cleared,
                sessions_deleted,
            })
        })
        .await
    }
}
