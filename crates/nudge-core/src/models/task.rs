//! Task model and its closed set of kinds.

use std::{fmt, str::FromStr};

use jiff::civil::Time;
use serde::{Deserialize, Serialize};

/// Database and CLI name of [`TaskKind::WeeklyTimeQuota`].
pub const WEEKLY_TIME_QUOTA: &str = "weekly_time_quota";
/// Database and CLI name of [`TaskKind::CompleteOnce`].
pub const COMPLETE_ONCE: &str = "complete_once";

/// What "done for the period" means for a task.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TaskKind {
    /// Done once enough minutes are logged in the period.
    WeeklyTimeQuota {
        /// Minutes required per period; `None` means no target.
        weekly_goal_minutes: Option<u32>,
    },
    /// Done once explicitly marked complete in the period.
    CompleteOnce,
}

impl TaskKind {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskKind::WeeklyTimeQuota { .. } => WEEKLY_TIME_QUOTA,
            TaskKind::CompleteOnce => COMPLETE_ONCE,
        }
    }

    /// Builds a kind from its stored name and optional goal column.
    ///
    /// The goal is ignored for complete-once tasks.
    pub fn from_parts(name: &str, weekly_goal_minutes: Option<u32>) -> Result<Self, String> {
        match name {
            WEEKLY_TIME_QUOTA => Ok(TaskKind::WeeklyTimeQuota {
                weekly_goal_minutes,
            }),
            COMPLETE_ONCE => Ok(TaskKind::CompleteOnce),
            _ => Err(format!("Invalid task type: {name}")),
        }
    }

    /// Goal minutes, only ever set for quota tasks.
    pub fn weekly_goal_minutes(&self) -> Option<u32> {
        match self {
            TaskKind::WeeklyTimeQuota {
                weekly_goal_minutes,
            } => *weekly_goal_minutes,
            TaskKind::CompleteOnce => None,
        }
    }

    pub fn is_quota(&self) -> bool {
        matches!(self, TaskKind::WeeklyTimeQuota { .. })
    }
}

/// Kind of period a task is tracked against.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PeriodKind {
    /// Monday 00:00 to Saturday 00:00, local time
    #[default]
    Workweek,
}

impl PeriodKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PeriodKind::Workweek => "workweek",
        }
    }
}

impl FromStr for PeriodKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "workweek" => Ok(PeriodKind::Workweek),
            _ => Err(format!("Invalid period: {s}")),
        }
    }
}

/// Days of the week on which a task may remind, Monday = 0 through Sunday = 6.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "Vec<u8>", into = "Vec<u8>")]
pub struct WeekSchedule {
    active_weekdays: Vec<u8>,
}

impl WeekSchedule {
    /// Monday through Friday.
    pub fn weekdays() -> Self {
        Self::new([0, 1, 2, 3, 4])
    }

    /// Builds a schedule, sorting and de-duplicating the days and dropping
    /// values outside `0..=6`.
    pub fn new(days: impl IntoIterator<Item = u8>) -> Self {
        let mut active_weekdays: Vec<u8> = days.into_iter().filter(|d| *d <= 6).collect();
        active_weekdays.sort_unstable();
        active_weekdays.dedup();
        Self { active_weekdays }
    }

    /// Whether the Monday-zero weekday is active.
    pub fn is_active(&self, monday_zero_weekday: i8) -> bool {
        u8::try_from(monday_zero_weekday).is_ok_and(|day| self.active_weekdays.contains(&day))
    }

    pub fn days(&self) -> &[u8] {
        &self.active_weekdays
    }

    /// Stored form, e.g. `0,1,2`.
    pub fn to_csv(&self) -> String {
        self.active_weekdays
            .iter()
            .map(u8::to_string)
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Parses the stored comma-separated form. Blank means no active days.
    pub fn from_csv(value: &str) -> Result<Self, String> {
        if value.trim().is_empty() {
            return Ok(Self::default());
        }
        let days = value
            .split(',')
            .map(|part| {
                part.trim()
                    .parse::<u8>()
                    .map_err(|_| format!("Invalid weekday: {part}"))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(days))
    }
}

impl From<Vec<u8>> for WeekSchedule {
    fn from(days: Vec<u8>) -> Self {
        Self::new(days)
    }
}

impl From<WeekSchedule> for Vec<u8> {
    fn from(schedule: WeekSchedule) -> Self {
        schedule.active_weekdays
    }
}

impl fmt::Display for WeekSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NAMES: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
        if self.active_weekdays.is_empty() {
            return write!(f, "never");
        }
        let names: Vec<&str> = self
            .active_weekdays
            .iter()
            .filter_map(|d| NAMES.get(usize::from(*d)).copied())
            .collect();
        write!(f, "{}", names.join(", "))
    }
}

/// A recurring weekly task.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    /// Unique identifier for the task
    pub id: u64,

    /// Short name shown in reminders
    pub title: String,

    /// Quota or complete-once
    pub kind: TaskKind,

    /// Disabled tasks never remind
    pub enabled: bool,

    /// Weekdays on which reminders may fire
    pub schedule: WeekSchedule,

    /// Preferred reminder time of day (local)
    pub reminder_time: Time,

    /// Period the task is tracked against
    #[serde(default)]
    pub period: PeriodKind,
}
