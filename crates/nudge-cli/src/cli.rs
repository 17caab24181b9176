//! Subcommand argument definitions using clap.
//!
//! Each argument struct converts into an interface-agnostic parameter type
//! from `nudge_core::params`, so validation happens once in the core:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Tracker
//! ```

use clap::{Args, Subcommand, ValueEnum};
use nudge_core::params::{
    CreateTask, Id, LogMinutes, ResetTask, SnoozeTask, UpdateSettings, UpdateTask,
};

/// Identifies a single task.
#[derive(Args)]
pub struct TaskIdArgs {
    #[arg(help = "ID of the task")]
    pub id: u64,
}

impl From<TaskIdArgs> for Id {
    fn from(val: TaskIdArgs) -> Self {
        Id { id: val.id }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum TaskTypeArg {
    /// Reach a number of minutes each work week
    Quota,
    /// Do once each work week
    Once,
}

impl TaskTypeArg {
    fn as_str(self) -> &'static str {
        match self {
            TaskTypeArg::Quota => "quota",
            TaskTypeArg::Once => "once",
        }
    }
}

/// Create a new task
#[derive(Args)]
pub struct AddTaskArgs {
    /// Title shown in reminders
    pub title: String,
    #[arg(short = 't', long = "type", value_enum, default_value = "quota")]
    pub task_type: TaskTypeArg,
    #[arg(short, long, help = "Weekly goal in minutes (quota tasks only)")]
    pub goal: Option<u32>,
    #[arg(
        short,
        long,
        value_delimiter = ',',
        help = "Active weekdays as comma-separated numbers, Monday = 0 (default: 0,1,2,3,4)"
    )]
    pub days: Vec<u8>,
    #[arg(long = "at", help = "Preferred reminder time as HH:MM (default: 09:00)")]
    pub reminder_time: Option<String>,
    #[arg(long, help = "Create the task without enabling reminders")]
    pub disabled: bool,
}

impl From<AddTaskArgs> for CreateTask {
    fn from(val: AddTaskArgs) -> Self {
        CreateTask {
            title: val.title,
            task_type: val.task_type.as_str().to_string(),
            weekly_goal_minutes: val.goal,
            weekdays: val.days,
            reminder_time: val.reminder_time,
            enabled: !val.disabled,
        }
    }
}

/// Change a task's details
#[derive(Args)]
pub struct EditTaskArgs {
    #[arg(help = "ID of the task to edit")]
    pub id: u64,
    #[arg(long, help = "New title")]
    pub title: Option<String>,
    #[arg(long, conflicts_with = "disable", help = "Enable reminders")]
    pub enable: bool,
    #[arg(long, help = "Disable reminders")]
    pub disable: bool,
    #[arg(long = "at", help = "New reminder time as HH:MM")]
    pub reminder_time: Option<String>,
    #[arg(
        short,
        long,
        value_delimiter = ',',
        help = "New active weekdays as comma-separated numbers, Monday = 0"
    )]
    pub days: Option<Vec<u8>>,
    #[arg(short, long, help = "New weekly goal in minutes (quota tasks only)")]
    pub goal: Option<u32>,
}

impl From<EditTaskArgs> for UpdateTask {
    fn from(val: EditTaskArgs) -> Self {
        let enabled = match (val.enable, val.disable) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        };
        UpdateTask {
            id: val.id,
            title: val.title,
            enabled,
            reminder_time: val.reminder_time,
            weekdays: val.days,
            weekly_goal_minutes: val.goal,
        }
    }
}

#[derive(Subcommand)]
pub enum TaskCommands {
    /// Create a new task
    #[command(alias = "a")]
    Add(AddTaskArgs),
    /// List all tasks
    #[command(alias = "l")]
    List,
    /// Show details of a task
    Show(TaskIdArgs),
    /// Change a task's details
    #[command(alias = "e")]
    Edit(EditTaskArgs),
    /// Delete a task and all its history
    Delete(TaskIdArgs),
}

/// Log minutes spent outside a timed session
#[derive(Args)]
pub struct LogArgs {
    #[arg(help = "ID of the quota task")]
    pub id: u64,
    #[arg(help = "Minutes to add to this work week")]
    pub minutes: u32,
}

impl From<LogArgs> for LogMinutes {
    fn from(val: LogArgs) -> Self {
        LogMinutes {
            id: val.id,
            minutes: val.minutes,
        }
    }
}

#[derive(Subcommand)]
pub enum SessionCommands {
    /// Start the timer
    Start(TaskIdArgs),
    /// Stop the timer
    Stop(TaskIdArgs),
    /// Start the timer, or stop it if running
    Toggle(TaskIdArgs),
    /// Log minutes by hand
    Log(LogArgs),
}

/// Mark a task done for this work week
#[derive(Args)]
pub struct CompleteArgs {
    #[arg(help = "ID of the task")]
    pub id: u64,
    #[arg(long, help = "Remove this work week's completion instead")]
    pub undo: bool,
}

/// Clear this work week's completion
#[derive(Args)]
pub struct ResetArgs {
    #[arg(help = "ID of the task")]
    pub id: u64,
    #[arg(long, help = "Also delete this work week's sessions and logged minutes")]
    pub progress: bool,
}

impl From<ResetArgs> for ResetTask {
    fn from(val: ResetArgs) -> Self {
        ResetTask {
            id: val.id,
            progress: val.progress,
        }
    }
}

/// Silence a task's reminders for a while
#[derive(Args)]
pub struct SnoozeArgs {
    #[arg(help = "ID of the task")]
    pub id: u64,
    #[arg(
        short,
        long,
        conflicts_with = "tomorrow",
        required_unless_present = "tomorrow",
        help = "Snooze for this many minutes"
    )]
    pub minutes: Option<u32>,
    #[arg(long, help = "Snooze until tomorrow's reminder start time")]
    pub tomorrow: bool,
}

impl SnoozeArgs {
    /// The timed snooze, or `None` for "until tomorrow".
    pub fn timed(&self) -> Option<SnoozeTask> {
        self.minutes.map(|minutes| SnoozeTask {
            id: self.id,
            minutes,
        })
    }
}

/// Change settings
#[derive(Args)]
pub struct SetSettingsArgs {
    #[arg(long = "repeat", help = "Minutes between repeated reminders (at least 1)")]
    pub repeat_interval_minutes: Option<u32>,
    #[arg(long = "start", help = "No reminders before this local time, as HH:MM")]
    pub reminder_start_time: Option<String>,
    #[arg(long, help = "Launch at login (true or false)")]
    pub start_at_login: Option<bool>,
}

impl From<SetSettingsArgs> for UpdateSettings {
    fn from(val: SetSettingsArgs) -> Self {
        UpdateSettings {
            repeat_interval_minutes: val.repeat_interval_minutes,
            reminder_start_time: val.reminder_start_time,
            start_at_login: val.start_at_login,
        }
    }
}

#[derive(Subcommand)]
pub enum SettingsCommands {
    /// Show current settings
    Show,
    /// Change one or more settings
    Set(SetSettingsArgs),
}

/// Show the state of every task
#[derive(Args, Default)]
pub struct StatusArgs {
    #[arg(long, help = "Print task states as JSON")]
    pub json: bool,
}
