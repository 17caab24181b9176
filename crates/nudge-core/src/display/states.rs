//! Status board formatting for derived task states.

use std::fmt;

use super::datetime::LocalDateTime;
use crate::engine::TaskState;

impl TaskState {
    /// Single icon summarising the state, most significant first.
    pub fn icon(&self) -> &'static str {
        if !self.enabled {
            "⏸"
        } else if self.done {
            "✅"
        } else if self.running {
            "⏱"
        } else if self.snoozed {
            "💤"
        } else if self.skipped_today {
            "⏭"
        } else if self.can_remind_now {
            "🔔"
        } else {
            "•"
        }
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "## {} {}. {}",
            self.icon(),
            self.task_id,
            self.title
        )?;
        writeln!(f)?;
        writeln!(f, "- Status: {}", self.status_text)?;

        if !self.enabled {
            writeln!(f, "- Disabled")?;
        }
        if let Some(until) = &self.snoozed_until {
            writeln!(f, "- Snoozed until: {}", LocalDateTime(until))?;
        }
        if self.skipped_today {
            writeln!(f, "- Skipped today")?;
        }
        if self.can_remind_now {
            writeln!(f, "- {}", self.reminder_message)?;
        }
        writeln!(f)?;
        Ok(())
    }
}

/// Newtype wrapper for the status board of all tasks.
pub struct TaskStates(pub Vec<TaskState>);

impl TaskStates {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for TaskStates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(first) = self.0.first() else {
            return writeln!(f, "No tasks found.");
        };

        writeln!(f, "# This work week ({})", first.period_key)?;
        writeln!(f)?;
        if !first.in_workweek {
            writeln!(f, "*Weekend: reminders are paused until Monday.*")?;
            writeln!(f)?;
        }
        for state in &self.0 {
            write!(f, "{state}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TaskKind;

    fn state() -> TaskState {
        TaskState {
            task_id: 1,
            title: "Weekly Learning".to_string(),
            kind: TaskKind::WeeklyTimeQuota {
                weekly_goal_minutes: Some(60),
            },
            enabled: true,
            in_workweek: true,
            active_today: true,
            after_start_time: true,
            skipped_today: false,
            snoozed: false,
            snoozed_until: None,
            running: false,
            completed_override: false,
            done_by_minutes: false,
            done: false,
            goal_minutes: Some(60),
            done_minutes: Some(20),
            period_key: "workweek:2026-02-16".to_string(),
            can_remind_now: true,
            reminder_message: "Progress: 20/60 min this work week.".to_string(),
            status_text: "20/60 min".to_string(),
        }
    }

    #[test]
    fn test_empty_states() {
        assert_eq!(format!("{}", TaskStates(Vec::new())), "No tasks found.\n");
    }

    #[test]
    fn test_states_board() {
        let done = TaskState {
            task_id: 2,
            title: "Report".to_string(),
            done: true,
            can_remind_now: false,
            status_text: "DONE".to_string(),
            ..state()
        };
        let output = format!("{}", TaskStates(vec![state(), done]));

        assert!(output.starts_with("# This work week (workweek:2026-02-16)"));
        assert!(output.contains("## 🔔 1. Weekly Learning"));
        assert!(output.contains("- Status: 20/60 min"));
        assert!(output.contains("- Progress: 20/60 min this work week."));
        assert!(output.contains("## ✅ 2. Report"));
        assert!(!output.contains("Weekend"));
    }

    #[test]
    fn test_weekend_notice() {
        let weekend = TaskState {
            in_workweek: false,
            can_remind_now: false,
            ..state()
        };
        let output = format!("{}", TaskStates(vec![weekend]));
        assert!(output.contains("Weekend"));
        assert!(output.contains("## • 1. Weekly Learning"));
    }
}
