//! Shared application state.

use crate::error::AppError;
use log::warn;
use rusqlite::Connection;
use std::sync::{Arc, Mutex};
use todo_core::{RepoResult, SqliteTodoService};

/// Handle to the single database connection shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    conn: Arc<Mutex<Connection>>,
}

impl AppState {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// Runs one use-case against the connection on the blocking pool.
    ///
    /// The connection stays locked for the whole closure, so each use-case
    /// sees a consistent view of the tables. A poisoned lock is recovered:
    /// a panicking use-case fails its own request only.
    pub async fn with_service<T, F>(&self, run: F) -> Result<T, AppError>
    where
        T: Send + 'static,
        F: FnOnce(&SqliteTodoService<'_>) -> RepoResult<T> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let guard = conn.lock().unwrap_or_else(|poisoned| {
                warn!("event=db_lock module=web status=recovered reason=poisoned");
                poisoned.into_inner()
            });
            let service = SqliteTodoService::sqlite(&guard);
            run(&service).map_err(AppError::from)
        })
        .await
        .map_err(|err| AppError::Internal(format!("database task failed: {err}")))?
    }
}
