//! Core library for the Nudge weekly task reminder.
//!
//! Tasks are tracked per workweek (Monday 00:00 to Saturday 00:00, local
//! time). A task is either a weekly time quota, fed by timed sessions and
//! manual minutes, or a task completed once per week. The crate provides:
//!
//! - [`period`]: workweek windows, period keys and interval splitting
//! - [`engine`]: the derived [`TaskState`] of a task at one instant
//! - [`scheduler`]: the periodic reminder sweep with repeat throttling
//! - [`db`]: SQLite persistence behind the [`Repository`] trait
//! - [`tracker`]: the async facade used by interfaces
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use nudge_core::{params::CreateTask, TrackerBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let tracker = TrackerBuilder::new()
//!     .with_database_path(Some("nudge.db"))
//!     .build()
//!     .await?;
//!
//! let task = tracker
//!     .create_task(&CreateTask {
//!         title: "Reading".to_string(),
//!         task_type: "quota".to_string(),
//!         weekly_goal_minutes: Some(90),
//!         weekdays: vec![],
//!         reminder_time: None,
//!         enabled: true,
//!     })
//!     .await?;
//! println!("{task}");
//!
//! for state in tracker.task_states().await? {
//!     println!("{}: {}", state.title, state.status_text);
//! }
//! # Ok(())
//! # }
//! ```

pub mod db;
pub mod display;
pub mod engine;
pub mod error;
pub mod models;
pub mod params;
pub mod period;
pub mod repository;
pub mod scheduler;
pub mod tracker;

// Re-export commonly used types
pub use db::Database;
pub use display::{LocalDateTime, OperationStatus, TaskList, TaskStates};
pub use engine::{compute_task_state, TaskState};
pub use error::{NudgeError, Result};
pub use models::{AppSettings, Session, SessionKind, SnoozeState, Task, TaskKind, WeekSchedule};
pub use repository::Repository;
pub use scheduler::{ReminderEvent, ReminderSink, Scheduler};
pub use tracker::{progress_ops::ResetOutcome, SessionToggle, Tracker, TrackerBuilder};
