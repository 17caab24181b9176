//! Timed sessions and manual minute logs.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Whether a session was timed or logged by hand.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SessionKind {
    /// Started and stopped on the clock; `end` is `None` while running.
    Timed { end: Option<Timestamp> },
    /// A fixed number of minutes logged at `start`.
    Manual { minutes: u32 },
}

/// One row of logged effort for a task.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Session {
    pub id: u64,
    pub task_id: u64,
    /// When the session started, or when the manual entry was logged
    pub start: Timestamp,
    pub kind: SessionKind,
}

impl Session {
    /// Builds a session from its stored columns.
    ///
    /// A positive `manual_minutes` marks a manual entry regardless of `end`.
    pub fn from_columns(
        id: u64,
        task_id: u64,
        start: Timestamp,
        end: Option<Timestamp>,
        manual_minutes: u32,
    ) -> Self {
        let kind = if manual_minutes > 0 {
            SessionKind::Manual {
                minutes: manual_minutes,
            }
        } else {
            SessionKind::Timed { end }
        };
        Self {
            id,
            task_id,
            start,
            kind,
        }
    }

    /// True for a timed session that has not been stopped.
    pub fn is_running(&self) -> bool {
        matches!(self.kind, SessionKind::Timed { end: None })
    }
}
