use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::{Priority, TaskStatus};

/// Label recorded in `pushed_by` when no producer identifies itself.
pub const SYSTEM_PUSHER: &str = "system";

/// A unit of work on the board, with status, priority, and ownership metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub priority: Priority,
    pub due_date: Option<DateTime<Utc>>,
    pub assigned_to: Option<String>,
    pub status: TaskStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub pushed_by: String,
}

impl Task {
    /// Whether the task is past its due date and not yet completed.
    #[must_use]
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.status != TaskStatus::Completed && self.due_date.is_some_and(|due| due < now)
    }
}
