use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{
    CompleteArgs, ResetArgs, SessionCommands, SettingsCommands, SnoozeArgs, StatusArgs,
    TaskCommands, TaskIdArgs,
};

/// Weekly task reminders for the work week
///
/// Nudge tracks recurring weekly tasks from Monday to Friday: time quotas
/// fed by timed sessions and logged minutes, and tasks done once per week.
/// Run `nudge watch` to get reminders while due tasks are left undone.
#[derive(Parser)]
#[command(version, about, name = "nudge")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/nudge/nudge.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the Nudge CLI
///
/// Without a command, `status` is shown.
#[derive(Subcommand)]
pub enum Commands {
    /// Manage tasks
    #[command(alias = "t")]
    Task {
        #[command(subcommand)]
        command: TaskCommands,
    },
    /// Track time on weekly quota tasks
    #[command(alias = "s")]
    Session {
        #[command(subcommand)]
        command: SessionCommands,
    },
    /// Mark a task done for this work week
    Complete(CompleteArgs),
    /// Clear this work week's completion, optionally with its progress
    Reset(ResetArgs),
    /// Silence a task's reminders for a while
    Snooze(SnoozeArgs),
    /// Silence a task's reminders for the rest of today
    Skip(TaskIdArgs),
    /// Remove a task's snooze and skip
    Clear(TaskIdArgs),
    /// Show or change settings
    Settings {
        #[command(subcommand)]
        command: SettingsCommands,
    },
    /// Show the state of every task
    Status(StatusArgs),
    /// Run the reminder loop until interrupted
    Watch,
}
