//! Task repository — CRUD + aggregate stats.

use chrono::{DateTime, Utc};

use deck_core::entities::{SYSTEM_PUSHER, Task};
use deck_core::enums::{Priority, TaskStatus};
use deck_core::ids::PREFIX_TASK;
use deck_core::stats::TaskStats;

use crate::DeckDb;
use crate::error::{DatabaseError, is_unique_violation};
use crate::helpers::{get_count, get_opt_string, parse_datetime, parse_enum, parse_optional_datetime};
use crate::updates::task::TaskPatch;

const SELECT_COLS: &str =
    "id, title, description, priority, due_date, assigned_to, status, created_at, updated_at, pushed_by";

fn row_to_task(row: &libsql::Row) -> Result<Task, DatabaseError> {
    Ok(Task {
        id: row.get(0)?,
        title: row.get(1)?,
        description: get_opt_string(row, 2)?,
        priority: parse_enum(&row.get::<String>(3)?)?,
        due_date: parse_optional_datetime(get_opt_string(row, 4)?.as_deref())?,
        assigned_to: get_opt_string(row, 5)?,
        status: parse_enum(&row.get::<String>(6)?)?,
        created_at: parse_datetime(&row.get::<String>(7)?)?,
        updated_at: parse_datetime(&row.get::<String>(8)?)?,
        pushed_by: row.get(9)?,
    })
}

/// Input for task creation. The store assigns both timestamps and, when `id`
/// is absent, a generated id.
#[derive(Debug, Clone, Default)]
pub struct NewTask {
    pub id: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub priority: Priority,
    pub due_date: Option<DateTime<Utc>>,
    pub assigned_to: Option<String>,
    pub status: TaskStatus,
    pub pushed_by: Option<String>,
}

impl DeckDb {
    /// Store a new task with `created_at == updated_at == now`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Validation` for an empty title,
    /// `DatabaseError::Conflict` when the id already exists.
    pub async fn create_task(&self, new: NewTask) -> Result<Task, DatabaseError> {
        let title = new.title.trim();
        if title.is_empty() {
            return Err(DatabaseError::Validation("title must not be empty".into()));
        }

        let id = match new.id {
            Some(id) if !id.trim().is_empty() => id,
            _ => self.generate_id(PREFIX_TASK).await?,
        };
        let pushed_by = new
            .pushed_by
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| SYSTEM_PUSHER.to_string());
        let now = Utc::now();

        let conn = self.conn()?;
        conn.execute(
            &format!(
                "INSERT INTO tasks ({SELECT_COLS})
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)"
            ),
            libsql::params![
                id.as_str(),
                title,
                new.description.as_deref(),
                new.priority.as_str(),
                new.due_date.map(|d| d.to_rfc3339()),
                new.assigned_to.as_deref(),
                new.status.as_str(),
                now.to_rfc3339(),
                now.to_rfc3339(),
                pushed_by.as_str()
            ],
        )
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                DatabaseError::Conflict(format!("task '{id}' already exists"))
            } else {
                self.classify(e)
            }
        })?;

        tracing::debug!(task_id = %id, "task created");
        Ok(Task {
            id,
            title: title.to_string(),
            description: new.description,
            priority: new.priority,
            due_date: new.due_date,
            assigned_to: new.assigned_to,
            status: new.status,
            created_at: now,
            updated_at: now,
            pushed_by,
        })
    }

    /// Fetch a task by id. Absence is `None`, not an error.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` only for query or connection failures.
    pub async fn get_task(&self, id: &str) -> Result<Option<Task>, DatabaseError> {
        let conn = self.conn()?;
        let mut rows = conn
            .query(&format!("SELECT {SELECT_COLS} FROM tasks WHERE id = ?1"), [id])
            .await
            .map_err(|e| self.classify(e))?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_task(&row)?)),
            None => Ok(None),
        }
    }

    /// Apply a partial update. Only `Some` fields change; `updated_at`
    /// advances on every non-empty patch. An empty patch returns the current
    /// row unchanged without a timestamp bump.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` for an unknown id,
    /// `DatabaseError::Validation` when the patch blanks the title.
    pub async fn update_task(&self, id: &str, patch: TaskPatch) -> Result<Task, DatabaseError> {
        if patch.is_empty() {
            return self
                .get_task(id)
                .await?
                .ok_or_else(|| DatabaseError::NotFound(id.to_string()));
        }

        if let Some(ref title) = patch.title {
            if title.trim().is_empty() {
                return Err(DatabaseError::Validation("title must not be empty".into()));
            }
        }

        let mut sets = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();
        let mut idx = 1usize;

        if let Some(ref title) = patch.title {
            sets.push(format!("title = ?{idx}"));
            params.push(title.trim().into());
            idx += 1;
        }
        if let Some(ref description) = patch.description {
            sets.push(format!("description = ?{idx}"));
            params.push(description.clone().map_or(libsql::Value::Null, Into::into));
            idx += 1;
        }
        if let Some(priority) = patch.priority {
            sets.push(format!("priority = ?{idx}"));
            params.push(priority.as_str().into());
            idx += 1;
        }
        if let Some(due_date) = patch.due_date {
            sets.push(format!("due_date = ?{idx}"));
            params.push(due_date.map_or(libsql::Value::Null, |d| d.to_rfc3339().into()));
            idx += 1;
        }
        if let Some(ref assigned_to) = patch.assigned_to {
            sets.push(format!("assigned_to = ?{idx}"));
            params.push(assigned_to.clone().map_or(libsql::Value::Null, Into::into));
            idx += 1;
        }
        if let Some(status) = patch.status {
            sets.push(format!("status = ?{idx}"));
            params.push(status.as_str().into());
            idx += 1;
        }
        if let Some(ref pushed_by) = patch.pushed_by {
            sets.push(format!("pushed_by = ?{idx}"));
            params.push(pushed_by.clone().into());
            idx += 1;
        }

        let now = Utc::now();
        sets.push(format!("updated_at = ?{idx}"));
        params.push(now.to_rfc3339().into());
        idx += 1;

        params.push(id.into());
        let sql = format!("UPDATE tasks SET {} WHERE id = ?{idx}", sets.join(", "));

        let conn = self.conn()?;
        let affected = conn
            .execute(&sql, libsql::params_from_iter(params))
            .await
            .map_err(|e| self.classify(e))?;
        if affected == 0 {
            return Err(DatabaseError::NotFound(id.to_string()));
        }

        tracing::debug!(task_id = %id, "task updated");
        self.get_task(id)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(id.to_string()))
    }

    /// Remove a task. Returns whether a row was actually deleted; an absent
    /// id is not an error.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` only for query or connection failures.
    pub async fn delete_task(&self, id: &str) -> Result<bool, DatabaseError> {
        let conn = self.conn()?;
        let affected = conn
            .execute("DELETE FROM tasks WHERE id = ?1", [id])
            .await
            .map_err(|e| self.classify(e))?;
        if affected > 0 {
            tracing::debug!(task_id = %id, "task deleted");
        }
        Ok(affected > 0)
    }

    /// List tasks, newest `created_at` first, optionally restricted to an
    /// exact status. An empty board yields an empty vec.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` only for query or connection failures.
    pub async fn list_tasks(
        &self,
        status: Option<TaskStatus>,
    ) -> Result<Vec<Task>, DatabaseError> {
        let conn = self.conn()?;
        let mut rows = if let Some(status) = status {
            conn.query(
                &format!(
                    "SELECT {SELECT_COLS} FROM tasks WHERE status = ?1 ORDER BY created_at DESC"
                ),
                [status.as_str()],
            )
            .await
        } else {
            conn.query(
                &format!("SELECT {SELECT_COLS} FROM tasks ORDER BY created_at DESC"),
                (),
            )
            .await
        }
        .map_err(|e| self.classify(e))?;

        let mut tasks = Vec::new();
        while let Some(row) = rows.next().await? {
            tasks.push(row_to_task(&row)?);
        }
        Ok(tasks)
    }

    /// Count tasks in total, per status, and overdue (past due date and not
    /// completed). All counts are zero on an empty board.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` only for query or connection failures.
    pub async fn task_stats(&self) -> Result<TaskStats, DatabaseError> {
        let now = Utc::now().to_rfc3339();
        let conn = self.conn()?;
        let mut rows = conn
            .query(
                "SELECT COUNT(*),
                        COUNT(*) FILTER (WHERE status = 'todo'),
                        COUNT(*) FILTER (WHERE status = 'in_progress'),
                        COUNT(*) FILTER (WHERE status = 'completed'),
                        COUNT(*) FILTER (WHERE due_date IS NOT NULL
                                           AND due_date < ?1
                                           AND status != 'completed')
                 FROM tasks",
                [now.as_str()],
            )
            .await
            .map_err(|e| self.classify(e))?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::Query("stats query returned no rows".into()))?;

        Ok(TaskStats {
            total: get_count(&row, 0)?,
            todo: get_count(&row, 1)?,
            in_progress: get_count(&row, 2)?,
            completed: get_count(&row, 3)?,
            overdue: get_count(&row, 4)?,
        })
    }
}
