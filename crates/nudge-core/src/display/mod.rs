//! Display wrapper types for terminal output.
//!
//! Domain models and derived states implement `Display` as markdown, which
//! the CLI renders through termimad. Collections go through newtype
//! wrappers so empty lists get a readable message.
//!
//! - [`TaskList`]: Formats a collection of tasks
//! - [`TaskStates`]: Formats the status board of all tasks
//! - [`LocalDateTime`]: Formats an instant in the system time zone
//! - [`OperationStatus`]: Formats success/failure messages

mod collections;
mod datetime;
mod models;
mod states;
mod status;

pub use collections::TaskList;
pub use datetime::LocalDateTime;
pub use states::TaskStates;
pub use status::OperationStatus;
