//! Snooze and skip flags.

use jiff::{civil::Date, Timestamp};
use log::debug;
use rusqlite::{params, OptionalExtension};

use super::conversion_error;
use crate::{
    error::{DatabaseResultExt, Result},
    models::SnoozeState,
};

const SELECT_SNOOZE_SQL: &str =
    "SELECT snoozed_until_utc, skipped_date_local FROM snoozes WHERE task_id = ?1";
const UPSERT_SNOOZED_UNTIL_SQL: &str = "INSERT INTO snoozes (task_id, snoozed_until_utc, skipped_date_local) VALUES (?1, ?2, NULL) \
     ON CONFLICT(task_id) DO UPDATE SET snoozed_until_utc = excluded.snoozed_until_utc";
const UPSERT_SKIPPED_DATE_SQL: &str = "INSERT INTO snoozes (task_id, snoozed_until_utc, skipped_date_local) VALUES (?1, NULL, ?2) \
     ON CONFLICT(task_id) DO UPDATE SET skipped_date_local = excluded.skipped_date_local";
const CLEAR_SNOOZED_UNTIL_SQL: &str =
    "UPDATE snoozes SET snoozed_until_utc = NULL WHERE task_id = ?1";
const CLEAR_SNOOZE_AND_SKIP_SQL: &str = "INSERT INTO snoozes (task_id, snoozed_until_utc, skipped_date_local) VALUES (?1, NULL, NULL) \
     ON CONFLICT(task_id) DO UPDATE SET snoozed_until_utc = NULL, skipped_date_local = NULL";

impl super::Database {
    /// Reads the stored flags. A task without a row has neither flag set.
    pub fn get_snooze_state(&self, task_id: u64) -> Result<SnoozeState> {
        let row: Option<(Option<String>, Option<String>)> = self
            .connection
            .query_row(SELECT_SNOOZE_SQL, params![task_id as i64], |row| {
                Ok((row.get(0)?, row.get(1)?))
            })
            .optional()
            .db_context("Failed to query snooze state")?;

        let Some((until, skipped)) = row else {
            return Ok(SnoozeState::default());
        };

        let snoozed_until = until
            .map(|value| value.parse::<Timestamp>())
            .transpose()
            .map_err(|e| conversion_error(0, e))
            .db_context("Failed to parse snooze instant")?;
        let skipped_date = skipped
            .map(|value| value.parse::<Date>())
            .transpose()
            .map_err(|e| conversion_error(1, e))
            .db_context("Failed to parse skip date")?;

        Ok(SnoozeState {
            snoozed_until,
            skipped_date,
        })
    }

    /// Reads the flags and clears a snooze that has run out at `now`.
    ///
    /// The returned state never carries an expired snooze; the skip date is
    /// left as stored.
    pub fn observe_snooze(&mut self, task_id: u64, now: Timestamp) -> Result<SnoozeState> {
        let mut state = self.get_snooze_state(task_id)?;

        if state.is_expired_at(now) {
            debug!("Clearing expired snooze for task {task_id}");
            self.connection
                .execute(CLEAR_SNOOZED_UNTIL_SQL, params![task_id as i64])
                .db_context("Failed to clear expired snooze")?;
            state.snoozed_until = None;
        }

        Ok(state)
    }

    /// Sets or clears the snooze instant, leaving the skip date untouched.
    pub fn set_snoozed_until(&mut self, task_id: u64, until: Option<Timestamp>) -> Result<()> {
        self.ensure_task_exists(task_id)?;
        self.connection
            .execute(
                UPSERT_SNOOZED_UNTIL_SQL,
                params![task_id as i64, until.map(|ts| ts.to_string())],
            )
            .db_context("Failed to write snooze")?;
        Ok(())
    }

    /// Sets or clears the skip date, leaving the snooze instant untouched.
    pub fn set_skipped_date(&mut self, task_id: u64, date: Option<Date>) -> Result<()> {
        self.ensure_task_exists(task_id)?;
        self.connection
            .execute(
                UPSERT_SKIPPED_DATE_SQL,
                params![task_id as i64, date.map(|d| d.to_string())],
            )
            .db_context("Failed to write skip date")?;
        Ok(())
    }

    /// Clears both the snooze instant and the skip date.
    pub fn clear_snooze_and_skip(&mut self, task_id: u64) -> Result<()> {
        self.ensure_task_exists(task_id)?;
        self.connection
            .execute(CLEAR_SNOOZE_AND_SKIP_SQL, params![task_id as i64])
            .db_context("Failed to clear snooze and skip")?;
        Ok(())
    }
}
