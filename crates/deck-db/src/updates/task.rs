//! Task patch builder.

use chrono::{DateTime, Utc};
use deck_core::enums::{Priority, TaskStatus};

/// Partial update of a task. `None` leaves the field untouched; for nullable
/// columns, `Some(None)` clears the stored value.
#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub priority: Option<Priority>,
    pub due_date: Option<Option<DateTime<Utc>>>,
    pub assigned_to: Option<Option<String>>,
    pub status: Option<TaskStatus>,
    pub pushed_by: Option<String>,
}

impl TaskPatch {
    /// Whether the patch changes anything. An empty patch is a no-op that
    /// does not advance `updated_at`.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.priority.is_none()
            && self.due_date.is_none()
            && self.assigned_to.is_none()
            && self.status.is_none()
            && self.pushed_by.is_none()
    }
}

pub struct TaskPatchBuilder(TaskPatch);

impl TaskPatchBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(TaskPatch::default())
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.0.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: Option<String>) -> Self {
        self.0.description = Some(description);
        self
    }

    #[must_use]
    pub fn priority(mut self, priority: Priority) -> Self {
        self.0.priority = Some(priority);
        self
    }

    #[must_use]
    pub fn due_date(mut self, due_date: Option<DateTime<Utc>>) -> Self {
        self.0.due_date = Some(due_date);
        self
    }

    #[must_use]
    pub fn assigned_to(mut self, assigned_to: Option<String>) -> Self {
        self.0.assigned_to = Some(assigned_to);
        self
    }

    #[must_use]
    pub fn status(mut self, status: TaskStatus) -> Self {
        self.0.status = Some(status);
        self
    }

    #[must_use]
    pub fn pushed_by(mut self, pushed_by: impl Into<String>) -> Self {
        self.0.pushed_by = Some(pushed_by.into());
        self
    }

    #[must_use]
    pub fn build(self) -> TaskPatch {
        self.0
    }
}

impl Default for TaskPatchBuilder {
    fn default() -> Self {
        Self::new()
    }
}
