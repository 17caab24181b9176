//! Per-task snooze and skip flags.

use jiff::{civil::Date, Timestamp};
use serde::{Deserialize, Serialize};

/// Stored snooze/skip flags for a task. The default is "neither".
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SnoozeState {
    /// Reminders are suppressed until this instant
    pub snoozed_until: Option<Timestamp>,

    /// Local calendar date on which the task was skipped
    pub skipped_date: Option<Date>,
}

impl SnoozeState {
    /// Whether the snooze is still in force at `now`.
    pub fn is_snoozed_at(&self, now: Timestamp) -> bool {
        self.snoozed_until.is_some_and(|until| now < until)
    }

    /// Whether the stored snooze has run out at `now`.
    pub fn is_expired_at(&self, now: Timestamp) -> bool {
        self.snoozed_until.is_some_and(|until| until <= now)
    }

    /// Whether the skip date is `today`.
    pub fn is_skipped_on(&self, today: Date) -> bool {
        self.skipped_date == Some(today)
    }
}
