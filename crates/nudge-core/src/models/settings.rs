//! Process-wide application settings.

use jiff::civil::Time;
use serde::{Deserialize, Serialize};

use crate::period::DEFAULT_START_TIME;

/// Default reminder repeat interval in minutes.
pub const DEFAULT_REPEAT_INTERVAL_MINUTES: u32 = 5;

/// Settings read fresh from storage on every tick.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppSettings {
    /// Whether the app should launch at login
    pub start_at_login: bool,

    /// Minimum minutes between repeated reminders for one task
    pub repeat_interval_minutes: u32,

    /// Reminders never fire before this local time of day
    pub reminder_start_time: Time,
}

impl AppSettings {
    /// Repeat interval clamped to at least one minute.
    pub fn effective_repeat_minutes(&self) -> u32 {
        self.repeat_interval_minutes.max(1)
    }
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            start_at_login: false,
            repeat_interval_minutes: DEFAULT_REPEAT_INTERVAL_MINUTES,
            reminder_start_time: DEFAULT_START_TIME,
        }
    }
}
