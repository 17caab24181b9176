//! Data models for tasks, sessions and reminder flags.
//!
//! These are plain snapshots owned by the repository. The state engine reads
//! them once per tick and never holds on to them between ticks.

pub mod requests;
pub mod session;
pub mod settings;
pub mod snooze;
pub mod task;


pub use requests::{NewTask, UpdateTaskRequest};
pub use session::{Session, SessionKind};
pub use settings::{AppSettings, DEFAULT_REPEAT_INTERVAL_MINUTES};
pub use snooze::SnoozeState;
pub use task::{PeriodKind, Task, TaskKind, WeekSchedule};
