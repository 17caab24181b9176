//! Collection wrapper types for displaying groups of tasks.

use std::fmt;

use crate::models::Task;

/// Newtype wrapper for displaying a list of tasks, one line each.
pub struct TaskList(pub Vec<Task>);

impl TaskList {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.0.iter()
    }
}

impl fmt::Display for TaskList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No tasks found.");
        }
        for task in &self.0 {
            task.fmt_summary(f)?;
        }
        Ok(())
    }
}
