//! Route handlers: request/response shapes and the thin translation onto
//! the task store.

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use deck_core::entities::Task;
use deck_core::enums::{Priority, TaskStatus};
use deck_core::stats::TaskStats;
use deck_db::repos::NewTask;
use deck_db::updates::task::TaskPatch;

use crate::AppState;
use crate::auth;
use crate::error::ApiError;

// ---------------------------------------------------------------------------
// Request shapes
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub status: Option<TaskStatus>,
}

#[derive(Debug, Deserialize)]
pub struct IdQuery {
    pub id: String,
}

/// Body of `POST /tasks`. Only `title` is required; `priority` and `status`
/// fall back to their defaults, `id` and `pushed_by` to server-side values.
#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    pub id: Option<String>,
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub priority: Priority,
    pub due_date: Option<DateTime<Utc>>,
    pub assigned_to: Option<String>,
    #[serde(default)]
    pub status: TaskStatus,
    pub pushed_by: Option<String>,
}

/// Body of `PUT /tasks?id=`. Fields absent from the request are left
/// untouched (PATCH semantics, not PUT-replace).
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<Priority>,
    pub due_date: Option<DateTime<Utc>>,
    pub assigned_to: Option<String>,
    pub status: Option<TaskStatus>,
    pub pushed_by: Option<String>,
}

impl UpdateTaskRequest {
    fn into_patch(self) -> TaskPatch {
        TaskPatch {
            title: self.title,
            description: self.description.map(Some),
            priority: self.priority,
            due_date: self.due_date.map(Some),
            assigned_to: self.assigned_to.map(Some),
            status: self.status,
            pushed_by: self.pushed_by,
        }
    }
}

// ---------------------------------------------------------------------------
// Response shapes
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct TaskListResponse {
    pub success: bool,
    pub tasks: Vec<Task>,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct TaskCreateResponse {
    pub success: bool,
    pub task: Task,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct TaskUpdateResponse {
    pub success: bool,
    pub task: Task,
}

#[derive(Debug, Serialize)]
pub struct TaskDeleteResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub success: bool,
    pub stats: TaskStats,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// `GET /tasks?status=` — always permitted without credentials.
pub async fn list_tasks(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<TaskListResponse>, ApiError> {
    let Query(query) = query?;
    let tasks = state.db.list_tasks(query.status).await?;
    Ok(Json(TaskListResponse {
        success: true,
        count: tasks.len(),
        tasks,
    }))
}

/// `POST /tasks` — requires the shared secret.
pub async fn create_task(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<CreateTaskRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    auth::authorize(&headers, &state.auth)?;
    let Json(req) = body?;

    let task = state
        .db
        .create_task(NewTask {
            id: req.id,
            title: req.title,
            description: req.description,
            priority: req.priority,
            due_date: req.due_date,
            assigned_to: req.assigned_to,
            status: req.status,
            pushed_by: req.pushed_by,
        })
        .await?;

    let message = format!("task '{}' created", task.id);
    Ok((
        StatusCode::CREATED,
        Json(TaskCreateResponse {
            success: true,
            task,
            message,
        }),
    ))
}

/// `PUT /tasks?id=` — no authorization check: any team member may update
/// any task's status or fields.
pub async fn update_task(
    State(state): State<AppState>,
    query: Result<Query<IdQuery>, QueryRejection>,
    body: Result<Json<UpdateTaskRequest>, JsonRejection>,
) -> Result<Json<TaskUpdateResponse>, ApiError> {
    let Query(IdQuery { id }) = query?;
    let Json(req) = body?;

    let task = state.db.update_task(&id, req.into_patch()).await?;
    Ok(Json(TaskUpdateResponse {
        success: true,
        task,
    }))
}

/// `DELETE /tasks?id=` — requires the shared secret.
pub async fn delete_task(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<IdQuery>, QueryRejection>,
) -> Result<Json<TaskDeleteResponse>, ApiError> {
    auth::authorize(&headers, &state.auth)?;
    let Query(IdQuery { id }) = query?;

    if state.db.delete_task(&id).await? {
        Ok(Json(TaskDeleteResponse {
            success: true,
            message: format!("task '{id}' deleted"),
        }))
    } else {
        Err(ApiError::NotFound(id))
    }
}

/// `GET /tasks/stats` — aggregate counts for the board header.
pub async fn stats(State(state): State<AppState>) -> Result<Json<StatsResponse>, ApiError> {
    let stats = state.db.task_stats().await?;
    Ok(Json(StatsResponse {
        success: true,
        stats,
    }))
}
