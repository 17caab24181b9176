//! Database schema initialization and default settings.

use rusqlite::params;

use super::settings_queries::{
    REMINDER_START_KEY, REPEAT_INTERVAL_KEY, START_AT_LOGIN_KEY,
};
use crate::error::{DatabaseResultExt, Result};

const SEED_SETTING_SQL: &str = "INSERT OR IGNORE INTO settings (key, value) VALUES (?1, ?2)";

impl super::Database {
    /// Initializes the database schema using the embedded SQL file.
    pub(super) fn initialize_schema(&self) -> Result<()> {
        // Enable foreign keys for this connection
        self.connection
            .execute("PRAGMA foreign_keys = ON", [])
            .db_context("Failed to enable foreign keys")?;

        let schema_sql = include_str!("../../assets/schema.sql");
        self.connection
            .execute_batch(schema_sql)
            .db_context("Failed to initialize database schema")?;

        self.seed_default_settings()
    }

    /// Inserts default settings that are not yet present.
    fn seed_default_settings(&self) -> Result<()> {
        for (key, value) in [
            (START_AT_LOGIN_KEY, "0"),
            (REPEAT_INTERVAL_KEY, "5"),
            (REMINDER_START_KEY, "09:00"),
        ] {
            self.connection
                .execute(SEED_SETTING_SQL, params![key, value])
                .db_context("Failed to seed default settings")?;
        }
        Ok(())
    }
}
