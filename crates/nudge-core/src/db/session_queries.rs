//! Timed sessions and manual minute entries.

use jiff::{tz::TimeZone, Timestamp};
use rusqlite::{params, OptionalExtension, Row};

use super::conversion_error;
use crate::{
    error::{DatabaseResultExt, NudgeError, Result},
    models::Session,
    period::{period_key_workweek, to_local_in},
};

const SESSION_COLUMNS: &str = "id, task_id, start_utc, end_utc, manual_minutes";
const SELECT_OPEN_SESSION_SQL: &str =
    "SELECT id FROM sessions WHERE task_id = ?1 AND end_utc IS NULL AND manual_minutes = 0";
const INSERT_TIMED_SESSION_SQL: &str =
    "INSERT INTO sessions (task_id, start_utc, end_utc, manual_minutes) VALUES (?1, ?2, NULL, 0)";
const INSERT_MANUAL_SESSION_SQL: &str =
    "INSERT INTO sessions (task_id, start_utc, end_utc, manual_minutes) VALUES (?1, ?2, ?2, ?3)";
const STOP_SESSION_SQL: &str = "UPDATE sessions SET end_utc = ?1 WHERE id = ?2";
const DELETE_SESSION_SQL: &str = "DELETE FROM sessions WHERE id = ?1";

impl super::Database {
    /// Starts a timed session for a quota task.
    ///
    /// Returns `false` without changes when a timed session is already open.
    pub fn start_session(&mut self, task_id: u64, now: Timestamp) -> Result<bool> {
        self.ensure_quota_task(task_id)?;

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let open: Option<i64> = tx
            .query_row(SELECT_OPEN_SESSION_SQL, params![task_id as i64], |row| {
                row.get(0)
            })
            .optional()
            .db_context("Failed to query open session")?;
        if open.is_some() {
            return Ok(false);
        }

        tx.execute(
            INSERT_TIMED_SESSION_SQL,
            params![task_id as i64, now.to_string()],
        )
        .db_context("Failed to insert session")?;
        tx.commit().db_context("Failed to commit transaction")?;
        Ok(true)
    }

    /// Stops the open timed session, if any. Returns whether one was stopped.
    pub fn stop_session(&mut self, task_id: u64, now: Timestamp) -> Result<bool> {
        self.ensure_task_exists(task_id)?;

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let open: Option<i64> = tx
            .query_row(SELECT_OPEN_SESSION_SQL, params![task_id as i64], |row| {
                row.get(0)
            })
            .optional()
            .db_context("Failed to query open session")?;
        let Some(session_id) = open else {
            return Ok(false);
        };

        tx.execute(STOP_SESSION_SQL, params![now.to_string(), session_id])
            .db_context("Failed to stop session")?;
        tx.commit().db_context("Failed to commit transaction")?;
        Ok(true)
    }

    /// Whether a timed session is open for the task.
    pub fn is_session_running(&self, task_id: u64) -> Result<bool> {
        let open: Option<i64> = self
            .connection
            .query_row(SELECT_OPEN_SESSION_SQL, params![task_id as i64], |row| {
                row.get(0)
            })
            .optional()
            .db_context("Failed to query open session")?;
        Ok(open.is_some())
    }

    /// Logs `minutes` of manual effort at `now`.
    pub fn add_manual_minutes(
        &mut self,
        task_id: u64,
        minutes: u32,
        now: Timestamp,
    ) -> Result<Session> {
        if minutes == 0 {
            return Err(NudgeError::invalid_input("minutes")
                .with_reason("Logged minutes must be greater than zero"));
        }
        self.ensure_quota_task(task_id)?;

        self.connection
            .execute(
                INSERT_MANUAL_SESSION_SQL,
                params![task_id as i64, now.to_string(), minutes],
            )
            .db_context("Failed to insert manual minutes")?;

        Ok(Session::from_columns(
            self.connection.last_insert_rowid() as u64,
            task_id,
            now,
            Some(now),
            minutes,
        ))
    }

    /// All sessions of a task in insertion order.
    pub fn list_sessions(&self, task_id: u64) -> Result<Vec<Session>> {
        let sql = format!("SELECT {SESSION_COLUMNS} FROM sessions WHERE task_id = ?1 ORDER BY id");
        let mut stmt = self
            .connection
            .prepare(&sql)
            .db_context("Failed to prepare query")?;

        let sessions = stmt
            .query_map(params![task_id as i64], session_from_row)
            .db_context("Failed to query sessions")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to read session row")?;
        Ok(sessions)
    }

    /// Deletes every session whose start falls in the period `period_key`,
    /// with period keys derived in `tz`. Returns the number deleted.
    pub fn delete_sessions_for_period(
        &mut self,
        task_id: u64,
        period_key: &str,
        tz: &TimeZone,
    ) -> Result<usize> {
        self.ensure_task_exists(task_id)?;
        let sessions = self.list_sessions(task_id)?;

        let mut doomed = Vec::new();
        for session in &sessions {
            if period_key_workweek(&to_local_in(session.start, tz))? == period_key {
                doomed.push(session.id);
            }
        }

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;
        for id in &doomed {
            tx.execute(DELETE_SESSION_SQL, params![*id as i64])
                .db_context("Failed to delete session")?;
        }
        tx.commit().db_context("Failed to commit transaction")?;

        Ok(doomed.len())
    }

    /// Returns `TaskNotFound` for a missing task and `InvalidInput` for a
    /// complete-once task.
    fn ensure_quota_task(&self, task_id: u64) -> Result<()> {
        let task = self.get_task(task_id)?;
        if !task.kind.is_quota() {
            return Err(NudgeError::invalid_input("task_id")
                .with_reason(format!("Task {task_id} is not a weekly time quota task")));
        }
        Ok(())
    }
}

fn session_from_row(row: &Row<'_>) -> rusqlite::Result<Session> {
    let start = row
        .get::<_, String>(2)?
        .parse::<Timestamp>()
        .map_err(|e| conversion_error(2, e))?;
    let end = row
        .get::<_, Option<String>>(3)?
        .map(|value| value.parse::<Timestamp>())
        .transpose()
        .map_err(|e| conversion_error(3, e))?;

    Ok(Session::from_columns(
        row.get::<_, i64>(0)? as u64,
        row.get::<_, i64>(1)? as u64,
        start,
        end,
        row.get(4)?,
    ))
}
