//! Per-period completion records.

use jiff::Timestamp;
use rusqlite::params;

use crate::error::{DatabaseResultExt, Result};

const CHECK_COMPLETION_SQL: &str =
    "SELECT EXISTS(SELECT 1 FROM completions WHERE task_id = ?1 AND period_key = ?2)";
const INSERT_COMPLETION_SQL: &str =
    "INSERT OR IGNORE INTO completions (task_id, period_key, completed_utc) VALUES (?1, ?2, ?3)";
const DELETE_COMPLETION_SQL: &str =
    "DELETE FROM completions WHERE task_id = ?1 AND period_key = ?2";

impl super::Database {
    /// Whether the task was marked complete for `period_key`.
    pub fn is_completed(&self, task_id: u64, period_key: &str) -> Result<bool> {
        self.connection
            .query_row(
                CHECK_COMPLETION_SQL,
                params![task_id as i64, period_key],
                |row| row.get(0),
            )
            .db_context("Failed to query completion")
    }

    /// Marks the task complete for `period_key`. Returns `false` if it already was.
    pub fn mark_complete(&mut self, task_id: u64, period_key: &str, now: Timestamp) -> Result<bool> {
        self.ensure_task_exists(task_id)?;
        let inserted = self
            .connection
            .execute(
                INSERT_COMPLETION_SQL,
                params![task_id as i64, period_key, now.to_string()],
            )
            .db_context("Failed to insert completion")?;
        Ok(inserted > 0)
    }

    /// Removes the completion record for `period_key`. Returns whether one existed.
    pub fn clear_completion(&mut self, task_id: u64, period_key: &str) -> Result<bool> {
        self.ensure_task_exists(task_id)?;
        let deleted = self
            .connection
            .execute(DELETE_COMPLETION_SQL, params![task_id as i64, period_key])
            .db_context("Failed to delete completion")?;
        Ok(deleted > 0)
    }
}
