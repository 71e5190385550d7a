//! Database error types for deck-db.

use thiserror::Error;

/// Errors from task store operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Input failed validation before reaching storage.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The referenced task does not exist.
    #[error("Task not found: {0}")]
    NotFound(String),

    /// A create collided with an existing task id.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The backing connection failed; it will be rebuilt on the next call.
    #[error("Storage unavailable: {0}")]
    Connection(String),

    /// A SQL query failed.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Detect a unique-constraint violation on the primary key.
///
/// libSQL surfaces constraint failures as `SqliteFailure` with the message
/// SQLite produces; the predicate is intentionally narrow so genuine SQL
/// errors are not misreported as conflicts.
#[must_use]
pub fn is_unique_violation(e: &libsql::Error) -> bool {
    e.to_string().contains("UNIQUE constraint failed")
}

/// Detect a fatal connection failure (as opposed to a statement error).
///
/// A poisoned connection must not be reused; the store discards it and
/// lazily reconnects on the next call.
#[must_use]
pub fn is_connection_failure(e: &libsql::Error) -> bool {
    let msg = e.to_string();
    msg.contains("Failed to connect") || msg.contains("connection failed")
}
