//! Key-value settings storage.

use jiff::civil::Time;
use log::warn;
use rusqlite::{params, OptionalExtension};

use crate::{
    error::{DatabaseResultExt, Result},
    models::{AppSettings, DEFAULT_REPEAT_INTERVAL_MINUTES},
    period::{format_hhmm, parse_hhmm_or_default, DEFAULT_START_TIME},
};

pub(crate) const START_AT_LOGIN_KEY: &str = "start_at_login";
pub(crate) const REPEAT_INTERVAL_KEY: &str = "repeat_interval_minutes";
pub(crate) const REMINDER_START_KEY: &str = "reminder_start_hhmm";

const SELECT_SETTING_SQL: &str = "SELECT value FROM settings WHERE key = ?1";
const UPSERT_SETTING_SQL: &str = "INSERT INTO settings (key, value) VALUES (?1, ?2) \
     ON CONFLICT(key) DO UPDATE SET value = excluded.value";

impl super::Database {
    /// Reads the current settings. Missing or malformed values fall back to
    /// their defaults rather than failing.
    pub fn get_settings(&self) -> Result<AppSettings> {
        let start_at_login = self
            .get_setting(START_AT_LOGIN_KEY)?
            .is_some_and(|value| value.trim() == "1");

        let repeat_interval_minutes = match self.get_setting(REPEAT_INTERVAL_KEY)? {
            Some(raw) => raw.trim().parse::<u32>().unwrap_or_else(|_| {
                warn!("Malformed repeat interval {raw:?}, using {DEFAULT_REPEAT_INTERVAL_MINUTES}");
                DEFAULT_REPEAT_INTERVAL_MINUTES
            }),
            None => DEFAULT_REPEAT_INTERVAL_MINUTES,
        };

        let reminder_start_time = self
            .get_setting(REMINDER_START_KEY)?
            .map_or(DEFAULT_START_TIME, |raw| parse_hhmm_or_default(&raw));

        Ok(AppSettings {
            start_at_login,
            repeat_interval_minutes,
            reminder_start_time,
        })
    }

    pub fn set_start_at_login(&self, enabled: bool) -> Result<()> {
        self.set_setting(START_AT_LOGIN_KEY, if enabled { "1" } else { "0" })
    }

    pub fn set_repeat_interval_minutes(&self, minutes: u32) -> Result<()> {
        self.set_setting(REPEAT_INTERVAL_KEY, &minutes.to_string())
    }

    pub fn set_reminder_start_time(&self, time: Time) -> Result<()> {
        self.set_setting(REMINDER_START_KEY, &format_hhmm(time))
    }

    fn get_setting(&self, key: &str) -> Result<Option<String>> {
        self.connection
            .query_row(SELECT_SETTING_SQL, params![key], |row| row.get(0))
            .optional()
            .db_context("Failed to read setting")
    }

    fn set_setting(&self, key: &str, value: &str) -> Result<()> {
        self.connection
            .execute(UPSERT_SETTING_SQL, params![key, value])
            .db_context("Failed to write setting")?;
        Ok(())
    }
}
