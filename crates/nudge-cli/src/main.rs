//! Nudge CLI Application
//!
//! Command-line interface for the nudge weekly task reminder.

mod args;
mod cli;
mod handlers;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::StatusArgs;
use handlers::Cli;
use nudge_core::TrackerBuilder;
use renderer::TerminalRenderer;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        no_color,
        command,
    } = Args::parse();

    let tracker = TrackerBuilder::new()
        .with_database_path(database_file)
        .with_default_tasks(true)
        .build()
        .await
        .context("Failed to initialize tracker")?;

    let cli = Cli::new(tracker, TerminalRenderer::new(!no_color));

    match command {
        Some(Task { command }) => cli.handle_task_command(command).await,
        Some(Session { command }) => cli.handle_session_command(command).await,
        Some(Complete(args)) => cli.complete(args).await,
        Some(Reset(args)) => cli.reset(args).await,
        Some(Snooze(args)) => cli.snooze(args).await,
        Some(Skip(args)) => cli.skip(args).await,
        Some(Clear(args)) => cli.clear(args).await,
        Some(Settings { command }) => cli.handle_settings_command(command).await,
        Some(Status(args)) => cli.show_status(args).await,
        Some(Watch) => cli.watch().await,
        None => cli.show_status(StatusArgs::default()).await,
    }
}
