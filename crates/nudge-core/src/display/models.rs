//! Display implementations for domain models.
//!
//! Output is markdown, rendered by the CLI through termimad.

use std::fmt;

use crate::{
    models::{AppSettings, PeriodKind, Task, TaskKind},
    period::format_hhmm,
};

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskKind::WeeklyTimeQuota {
                weekly_goal_minutes: Some(goal),
            } => write!(f, "weekly time quota ({goal} min)"),
            TaskKind::WeeklyTimeQuota {
                weekly_goal_minutes: None,
            } => write!(f, "weekly time quota (no goal)"),
            TaskKind::CompleteOnce => write!(f, "complete once"),
        }
    }
}

impl fmt::Display for PeriodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Task {
    /// One-line summary used in task lists.
    pub(crate) fn fmt_summary(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let disabled = if self.enabled { "" } else { " *(disabled)*" };
        writeln!(
            f,
            "- **{}. {}**{disabled}: {}, {} at {}",
            self.id,
            self.title,
            self.kind,
            self.schedule,
            format_hhmm(self.reminder_time)
        )
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}. {}", self.id, self.title)?;
        writeln!(f)?;
        writeln!(f, "- Type: {}", self.kind)?;
        writeln!(f, "- Enabled: {}", if self.enabled { "yes" } else { "no" })?;
        writeln!(f, "- Days: {}", self.schedule)?;
        writeln!(f, "- Reminder time: {}", format_hhmm(self.reminder_time))?;
        writeln!(f, "- Period: {}", self.period)?;
        Ok(())
    }
}

impl fmt::Display for AppSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Settings")?;
        writeln!(f)?;
        writeln!(
            f,
            "- Reminders start at: {}",
            format_hhmm(self.reminder_start_time)
        )?;
        writeln!(
            f,
            "- Repeat interval: {} min",
            self.repeat_interval_minutes
        )?;
        writeln!(
            f,
            "- Start at login: {}",
            if self.start_at_login { "yes" } else { "no" }
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil;

    use super::*;
    use crate::models::WeekSchedule;

    fn sample_task() -> Task {
        Task {
            id: 3,
            title: "Weekly Learning".to_string(),
            kind: TaskKind::WeeklyTimeQuota {
                weekly_goal_minutes: Some(60),
            },
            enabled: true,
            schedule: WeekSchedule::weekdays(),
            reminder_time: civil::time(11, 0, 0, 0),
            period: PeriodKind::Workweek,
        }
    }

    #[test]
    fn test_task_display() {
        let output = format!("{}", sample_task());
        assert!(output.starts_with("# 3. Weekly Learning\n"));
        assert!(output.contains("- Type: weekly time quota (60 min)"));
        assert!(output.contains("- Days: Mon, Tue, Wed, Thu, Fri"));
        assert!(output.contains("- Reminder time: 11:00"));
        assert!(output.contains("- Period: workweek"));
    }

    #[test]
    fn test_settings_display() {
        let output = format!("{}", AppSettings::default());
        assert!(output.contains("- Reminders start at: 09:00"));
        assert!(output.contains("- Repeat interval: 5 min"));
        assert!(output.contains("- Start at login: no"));
    }
}
