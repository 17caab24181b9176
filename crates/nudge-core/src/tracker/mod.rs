//! High-level async API for managing tasks and reading their state.
//!
//! [`Tracker`] is the entry point for interfaces. Each call opens the
//! database on tokio's blocking pool, performs one operation and returns, so
//! every call observes fresh state and nothing is cached between calls.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   Interfaces    │    │     Tracker     │    │    Database     │
//! │  (CLI, watch)   │───▶│ (task_ops,      │───▶│   (via db/)     │
//! │                 │    │  progress_ops,  │    │                 │
//! │                 │    │  reminder_ops)  │    │                 │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ## Submodules
//!
//! - [`builder`]: Factory for creating [`Tracker`] instances
//! - [`task_ops`]: Task create/list/show/update/delete
//! - [`progress_ops`]: Sessions, manual minutes, completion and reset
//! - [`reminder_ops`]: Snooze, skip, settings and derived task state
//!
//! # Example
//!
//! ```rust,no_run
//! use nudge_core::{params::LogMinutes, TrackerBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let tracker = TrackerBuilder::new()
//!     .with_database_path(Some("/tmp/nudge.db"))
//!     .build()
//!     .await?;
//!
//! tracker.log_minutes(&LogMinutes { id: 1, minutes: 25 }).await?;
//! for state in &tracker.task_states().await? {
//!     println!("{}: {}", state.title, state.status_text);
//! }
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};

use tokio::task;

use crate::{
    db::Database,
    error::{NudgeError, Result},
};

pub mod builder;
pub mod progress_ops;
pub mod reminder_ops;
pub mod task_ops;


pub use builder::TrackerBuilder;
pub use progress_ops::SessionToggle;

/// Main interface for managing reminder tasks.
#[derive(Debug, Clone)]
pub struct Tracker {
    pub(crate) db_path: PathBuf,
}

impl Tracker {
    /// Creates a new tracker with the specified database path.
    pub(crate) fn new(db_path: PathBuf) -> Self {
        Self { db_path }
    }

    /// Path of the backing database file.
    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Runs `op` against a freshly opened database on the blocking pool.
    pub(crate) async fn with_db<T, F>(&self, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Database) -> Result<T> + Send + 'static,
    {
        let db_path = self.db_path.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            op(&mut db)
        })
        .await
        .map_err(NudgeError::join)?
    }
}
