//! Command handlers: call the tracker and render the outcome.

use std::future::Future;

use anyhow::{Context, Result};
use log::info;
use nudge_core::{
    display::{LocalDateTime, OperationStatus, TaskList, TaskStates},
    params::{Id, UpdateSettings},
    ReminderEvent, Scheduler, SessionToggle, Tracker,
};
use tokio::sync::mpsc;

use crate::{
    cli::{
        CompleteArgs, ResetArgs, SessionCommands, SettingsCommands, SnoozeArgs, StatusArgs,
        TaskCommands, TaskIdArgs,
    },
    renderer::TerminalRenderer,
};

pub struct Cli {
    tracker: Tracker,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(tracker: Tracker, renderer: TerminalRenderer) -> Self {
        Self { tracker, renderer }
    }

    fn status(&self, status: OperationStatus) -> Result<()> {
        self.renderer.render(&status.to_string())
    }

    pub async fn handle_task_command(&self, command: TaskCommands) -> Result<()> {
        match command {
            TaskCommands::Add(args) => {
                let task = self
                    .tracker
                    .create_task(&args.into())
                    .await
                    .context("Failed to create task")?;
                self.status(OperationStatus::success(format!(
                    "Created task with ID: {}",
                    task.id
                )))?;
                self.renderer.render(&format!("\n{task}"))
            }
            TaskCommands::List => {
                let tasks = self
                    .tracker
                    .list_tasks()
                    .await
                    .context("Failed to list tasks")?;
                self.renderer.render(&TaskList(tasks).to_string())
            }
            TaskCommands::Show(args) => {
                let task = self
                    .tracker
                    .get_task(&args.into())
                    .await
                    .context("Failed to get task")?;
                self.renderer.render(&task.to_string())
            }
            TaskCommands::Edit(args) => {
                let task = self
                    .tracker
                    .update_task(&args.into())
                    .await
                    .context("Failed to update task")?;
                self.status(OperationStatus::success(format!(
                    "Updated task {}",
                    task.id
                )))?;
                self.renderer.render(&format!("\n{task}"))
            }
            TaskCommands::Delete(args) => {
                let task = self
                    .tracker
                    .delete_task(&args.into())
                    .await
                    .context("Failed to delete task")?;
                self.status(OperationStatus::success(format!(
                    "Deleted task {}: {}",
                    task.id, task.title
                )))
            }
        }
    }

    pub async fn handle_session_command(&self, command: SessionCommands) -> Result<()> {
        match command {
            SessionCommands::Start(TaskIdArgs { id }) => {
                let started = self
                    .tracker
                    .start_session(&Id { id })
                    .await
                    .context("Failed to start session")?;
                self.status(if started {
                    OperationStatus::success(format!("Timer started for task {id}"))
                } else {
                    OperationStatus::unchanged(format!("Timer already running for task {id}"))
                })
            }
            SessionCommands::Stop(TaskIdArgs { id }) => {
                let stopped = self
                    .tracker
                    .stop_session(&Id { id })
                    .await
                    .context("Failed to stop session")?;
                self.status(if stopped {
                    OperationStatus::success(format!("Timer stopped for task {id}"))
                } else {
                    OperationStatus::unchanged(format!("No timer running for task {id}"))
                })
            }
            SessionCommands::Toggle(TaskIdArgs { id }) => {
                let toggle = self
                    .tracker
                    .toggle_session(&Id { id })
                    .await
                    .context("Failed to toggle session")?;
                let verb = match toggle {
                    SessionToggle::Started => "started",
                    SessionToggle::Stopped => "stopped",
                };
                self.status(OperationStatus::success(format!(
                    "Timer {verb} for task {id}"
                )))
            }
            SessionCommands::Log(args) => {
                let session = self
                    .tracker
                    .log_minutes(&args.into())
                    .await
                    .context("Failed to log minutes")?;
                self.status(OperationStatus::success(format!(
                    "Logged minutes for task {}",
                    session.task_id
                )))
            }
        }
    }

    pub async fn complete(&self, args: CompleteArgs) -> Result<()> {
        let id = Id { id: args.id };
        let status = if args.undo {
            let cleared = self
                .tracker
                .clear_completion(&id)
                .await
                .context("Failed to clear completion")?;
            if cleared {
                OperationStatus::success(format!("Task {} is open again this work week", id.id))
            } else {
                OperationStatus::unchanged(format!("Task {} was not marked complete", id.id))
            }
        } else {
            let marked = self
                .tracker
                .mark_complete(&id)
                .await
                .context("Failed to mark task complete")?;
            if marked {
                OperationStatus::success(format!("Task {} done for this work week", id.id))
            } else {
                OperationStatus::unchanged(format!("Task {} was already complete", id.id))
            }
        };
        self.status(status)
    }

    pub async fn reset(&self, args: ResetArgs) -> Result<()> {
        let id = args.id;
        let outcome = self
            .tracker
            .reset_task(&args.into())
            .await
            .context("Failed to reset task")?;
        self.status(OperationStatus::success(format!(
            "Reset task {id}: completion {}, {} session(s) deleted",
            if outcome.completion_cleared {
                "cleared"
            } else {
                "not set"
            },
            outcome.sessions_deleted
        )))
    }

    pub async fn snooze(&self, args: SnoozeArgs) -> Result<()> {
        let until = match args.timed() {
            Some(params) => self.tracker.snooze_for(&params).await,
            None => self.tracker.snooze_until_tomorrow(&Id { id: args.id }).await,
        }
        .context("Failed to snooze task")?;
        self.status(OperationStatus::success(format!(
            "Task {} snoozed until {}",
            args.id,
            LocalDateTime(&until)
        )))
    }

    pub async fn skip(&self, args: TaskIdArgs) -> Result<()> {
        let id = args.id;
        self.tracker
            .skip_today(&args.into())
            .await
            .context("Failed to skip task")?;
        self.status(OperationStatus::success(format!(
            "Task {id} skipped for today"
        )))
    }

    pub async fn clear(&self, args: TaskIdArgs) -> Result<()> {
        let id = args.id;
        self.tracker
            .clear_snooze_and_skip(&args.into())
            .await
            .context("Failed to clear snooze")?;
        self.status(OperationStatus::success(format!(
            "Cleared snooze and skip for task {id}"
        )))
    }

    pub async fn handle_settings_command(&self, command: SettingsCommands) -> Result<()> {
        let settings = match command {
            SettingsCommands::Show => self
                .tracker
                .get_settings()
                .await
                .context("Failed to read settings")?,
            SettingsCommands::Set(args) => {
                let params: UpdateSettings = args.into();
                self.tracker
                    .update_settings(&params)
                    .await
                    .context("Failed to update settings")?
            }
        };
        self.renderer.render(&settings.to_string())
    }

    pub async fn show_status(&self, args: StatusArgs) -> Result<()> {
        let states = self
            .tracker
            .task_states()
            .await
            .context("Failed to compute task states")?;

        if args.json {
            println!("{}", serde_json::to_string_pretty(&states)?);
            Ok(())
        } else {
            self.renderer.render(&TaskStates(states).to_string())
        }
    }

    /// Runs the scheduler and prints reminders until Ctrl-C.
    pub async fn watch(&self) -> Result<()> {
        let (sender, mut receiver) = mpsc::unbounded_channel::<ReminderEvent>();
        let db_path = self.tracker.db_path().to_path_buf();

        let scheduler = tokio::spawn(Scheduler::new().run(
            db_path,
            sender,
            shutdown_on(tokio::signal::ctrl_c()),
        ));

        info!("Watching for due tasks, press Ctrl-C to stop");
        while let Some(event) = receiver.recv().await {
            self.renderer.render(&format!(
                "**🔔 {}** ({}): {}\n",
                event.title, event.task_id, event.message
            ))?;
        }

        scheduler
            .await
            .context("Scheduler task panicked")?
            .context("Scheduler failed")
    }
}

/// Resolves once `signal` fires. If the signal cannot be installed the
/// watch keeps running and has to be stopped externally.
async fn shutdown_on<F>(signal: F)
where
    F: Future<Output = std::io::Result<()>>,
{
    if let Err(e) = signal.await {
        log::error!("Failed to listen for Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }
}
