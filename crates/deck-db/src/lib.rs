//! # deck-db
//!
//! libSQL task store for the taskdeck board.
//!
//! Owns the persisted task collection: schema migrations, CRUD, and the
//! aggregate stats query. The database handle is constructed once at process
//! start and injected into the API layer; there is no module-level global
//! connection state.
//!
//! Uses the `libsql` crate (C `SQLite` fork) — stable API, CHECK constraints
//! and triggers out of the box.

pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;
pub mod updates;

#[cfg(test)]
mod test_support;

use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};

use error::DatabaseError;
use libsql::Builder;

/// Central database handle for the task store.
///
/// Wraps a libSQL database and its active connection. The connection is
/// treated as disposable: when an operation reports a fatal connection
/// failure, the handle is flagged and the next call reconnects from the
/// database handle instead of reusing a wedged connection.
pub struct DeckDb {
    db: libsql::Database,
    conn: RwLock<libsql::Connection>,
    reconnect: AtomicBool,
}

impl DeckDb {
    /// Open a local database at the given path (`":memory:"` for tests).
    ///
    /// Runs migrations automatically on open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        let deck_db = Self {
            db,
            conn: RwLock::new(conn),
            reconnect: AtomicBool::new(false),
        };
        deck_db.run_migrations().await?;
        Ok(deck_db)
    }

    /// Current connection, reconnecting first if the previous one was
    /// flagged as failed.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Connection` if reconnecting fails; the flag
    /// stays set so the call after that retries the rebuild.
    pub(crate) fn conn(&self) -> Result<libsql::Connection, DatabaseError> {
        if self.reconnect.swap(false, Ordering::SeqCst) {
            tracing::warn!("rebuilding database connection after fatal error");
            if let Err(e) = self.rebuild_connection() {
                self.reconnect.store(true, Ordering::SeqCst);
                return Err(e);
            }
        }
        Ok(self.raw_conn())
    }

    /// Current connection without the reconnect check (migrations only).
    pub(crate) fn raw_conn(&self) -> libsql::Connection {
        self.conn
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    /// Classify a libSQL error, flagging the handle for reconnect when the
    /// connection itself is at fault.
    pub(crate) fn classify(&self, e: libsql::Error) -> DatabaseError {
        if error::is_connection_failure(&e) {
            self.reconnect.store(true, Ordering::SeqCst);
            DatabaseError::Connection(e.to_string())
        } else {
            DatabaseError::LibSql(e)
        }
    }

    fn rebuild_connection(&self) -> Result<(), DatabaseError> {
        let fresh = self
            .db
            .connect()
            .map_err(|e| DatabaseError::Connection(e.to_string()))?;
        *self
            .conn
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = fresh;
        Ok(())
    }

    /// Generate a prefixed ID via libSQL. Returns e.g., `"tsk-a3f8b2c1"`.
    ///
    /// Uses `randomblob(4)` in SQL to produce 8-char hex, then prepends the prefix.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or returns no rows.
    pub async fn generate_id(&self, prefix: &str) -> Result<String, DatabaseError> {
        let conn = self.conn()?;
        let mut rows = conn
            .query(
                &format!("SELECT '{prefix}-' || lower(hex(randomblob(4)))"),
                (),
            )
            .await
            .map_err(|e| self.classify(e))?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::Query("id query returned no rows".into()))?;
        Ok(row.get::<String>(0)?)
    }
}
