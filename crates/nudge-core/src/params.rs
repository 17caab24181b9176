//! Parameter structures for tracker operations.
//!
//! These are interface-agnostic: the CLI converts its clap arguments into
//! them, and the tracker validates and converts them into model requests.
//! Text fields such as task types and times of day arrive unparsed so every
//! interface gets the same validation errors.

use jiff::civil::Time;
use serde::{Deserialize, Serialize};

use crate::{
    error::{NudgeError, Result},
    models::{NewTask, TaskKind, UpdateTaskRequest, WeekSchedule},
    period::parse_hhmm,
};

/// Reminder time used when a new task does not specify one.
pub const DEFAULT_TASK_REMINDER_TIME: &str = "09:00";

/// Generic parameters for operations requiring just a task ID.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Id {
    /// The ID of the task to operate on
    pub id: u64,
}

/// Parameters for creating a task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTask {
    pub title: String,
    /// `weekly_time_quota` / `quota` or `complete_once` / `once`
    pub task_type: String,
    /// Goal for quota tasks; rejected for complete-once tasks
    pub weekly_goal_minutes: Option<u32>,
    /// Active weekdays, Monday = 0; empty means Monday to Friday
    pub weekdays: Vec<u8>,
    /// `HH:MM`; defaults to [`DEFAULT_TASK_REMINDER_TIME`]
    pub reminder_time: Option<String>,
    pub enabled: bool,
}

impl TryFrom<&CreateTask> for NewTask {
    type Error = NudgeError;

    fn try_from(params: &CreateTask) -> Result<Self> {
        let kind = parse_task_type(&params.task_type, params.weekly_goal_minutes)?;
        let schedule = parse_weekdays(&params.weekdays)?.unwrap_or_else(WeekSchedule::weekdays);
        let reminder_time = parse_time_field(
            "reminder_time",
            params
                .reminder_time
                .as_deref()
                .unwrap_or(DEFAULT_TASK_REMINDER_TIME),
        )?;

        Ok(NewTask {
            title: params.title.clone(),
            kind,
            enabled: params.enabled,
            reminder_time,
            schedule,
        })
    }
}

/// Parameters for updating a task. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTask {
    pub id: u64,
    pub title: Option<String>,
    pub enabled: Option<bool>,
    pub reminder_time: Option<String>,
    pub weekdays: Option<Vec<u8>>,
    pub weekly_goal_minutes: Option<u32>,
}

impl TryFrom<&UpdateTask> for UpdateTaskRequest {
    type Error = NudgeError;

    fn try_from(params: &UpdateTask) -> Result<Self> {
        let schedule = match params.weekdays {
            Some(ref days) => Some(
                parse_weekdays(days)?.ok_or_else(|| {
                    NudgeError::invalid_input("weekdays")
                        .with_reason("At least one weekday is required")
                })?,
            ),
            None => None,
        };
        let reminder_time = params
            .reminder_time
            .as_deref()
            .map(|value| parse_time_field("reminder_time", value))
            .transpose()?;

        let request = UpdateTaskRequest {
            title: params.title.clone(),
            enabled: params.enabled,
            reminder_time,
            schedule,
            weekly_goal_minutes: params.weekly_goal_minutes,
        };
        if request.is_empty() {
            return Err(NudgeError::invalid_input("update")
                .with_reason("Nothing to update; specify at least one field"));
        }
        Ok(request)
    }
}

/// Parameters for logging manual minutes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogMinutes {
    pub id: u64,
    pub minutes: u32,
}

/// Parameters for snoozing a task for a number of minutes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SnoozeTask {
    pub id: u64,
    pub minutes: u32,
}

/// Parameters for resetting the current period of a task.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResetTask {
    pub id: u64,
    /// Also delete this period's sessions and manual entries
    pub progress: bool,
}

/// Parameters for changing application settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateSettings {
    pub repeat_interval_minutes: Option<u32>,
    /// `HH:MM`
    pub reminder_start_time: Option<String>,
    pub start_at_login: Option<bool>,
}

impl UpdateSettings {
    /// Validates the repeat interval and parses the start time.
    pub fn validate(&self) -> Result<(Option<u32>, Option<Time>)> {
        if self.repeat_interval_minutes == Some(0) {
            return Err(NudgeError::invalid_input("repeat_interval_minutes")
                .with_reason("Repeat interval must be at least 1 minute"));
        }
        let start = self
            .reminder_start_time
            .as_deref()
            .map(|value| parse_time_field("reminder_start_time", value))
            .transpose()?;
        Ok((self.repeat_interval_minutes, start))
    }

    pub fn is_empty(&self) -> bool {
        self.repeat_interval_minutes.is_none()
            && self.reminder_start_time.is_none()
            && self.start_at_login.is_none()
    }
}

/// Parses a task type name, attaching the goal to quota tasks.
pub fn parse_task_type(name: &str, weekly_goal_minutes: Option<u32>) -> Result<TaskKind> {
    match name.trim().to_lowercase().as_str() {
        "weekly_time_quota" | "quota" => Ok(TaskKind::WeeklyTimeQuota {
            weekly_goal_minutes,
        }),
        "complete_once" | "once" => {
            if weekly_goal_minutes.is_some() {
                return Err(NudgeError::invalid_input("weekly_goal_minutes")
                    .with_reason("Only weekly time quota tasks have a goal"));
            }
            Ok(TaskKind::CompleteOnce)
        }
        other => Err(NudgeError::invalid_input("task_type").with_reason(format!(
            "Unknown task type '{other}'; expected 'quota' or 'once'"
        ))),
    }
}

/// Validates weekday indices. An empty list yields `None`.
fn parse_weekdays(days: &[u8]) -> Result<Option<WeekSchedule>> {
    if let Some(bad) = days.iter().find(|d| **d > 6) {
        return Err(NudgeError::invalid_input("weekdays")
            .with_reason(format!("Weekday {bad} is out of range 0 (Mon) to 6 (Sun)")));
    }
    if days.is_empty() {
        return Ok(None);
    }
    Ok(Some(WeekSchedule::new(days.iter().copied())))
}

fn parse_time_field(field: &str, value: &str) -> Result<Time> {
    parse_hhmm(value).ok_or_else(|| {
        NudgeError::invalid_input(field).with_reason(format!("'{value}' is not a valid HH:MM time"))
    })
}
