//! API handlers.

pub mod app;
pub mod auth;
pub mod files;
pub mod users;

pub use app::*;
pub use auth::*;
pub use files::*;
pub use users::*;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::auth::{MemorySessionStore, SessionStore};
use crate::db::{Database, SqliteFileStore};
use crate::file::{ContentStore, FileService};
use crate::queue::{JobQueue, SqliteJobQueue};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database holding accounts, metadata and jobs.
    pub db: Database,
    /// File hierarchy operations.
    pub files: FileService,
    /// Token sessions.
    pub sessions: Arc<dyn SessionStore>,
    /// Background job dispatch.
    pub queue: Arc<dyn JobQueue>,
}

impl AppState {
    /// Create a new application state from explicit collaborators.
    pub fn new(
        db: Database,
        files: FileService,
        sessions: Arc<dyn SessionStore>,
        queue: Arc<dyn JobQueue>,
    ) -> Self {
        Self {
            db,
            files,
            sessions,
            queue,
        }
    }

    /// Wire the production collaborators around `db`.
    pub fn with_database(db: Database, storage_root: impl Into<PathBuf>, session_ttl: Duration) -> Self {
        let queue: Arc<dyn JobQueue> = Arc::new(SqliteJobQueue::new(db.pool().clone()));
        let files = FileService::new(
            Arc::new(SqliteFileStore::new(db.pool().clone())),
            ContentStore::new(storage_root),
            queue.clone(),
        );
        let sessions: Arc<dyn SessionStore> = Arc::new(MemorySessionStore::new(session_ttl));

        Self::new(db, files, sessions, queue)
    }
}
