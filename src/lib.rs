//! files-manager - hierarchical file storage over a REST API.
//!
//! Authenticated users upload files and folders into a tree, list a
//! folder's children page by page, publish or unpublish entries, and fetch
//! their bytes, including size variants rendered by a background worker.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod file;
pub mod logging;
pub mod queue;
pub mod web;

pub use auth::{
    authenticate, hash_password, register, verify_password, MemorySessionStore, PasswordError,
    RegistrationRequest, SessionStore,
};
pub use config::Config;
pub use db::{Database, NewUser, SqliteFileStore, User, UserRepository};
pub use error::{FilesError, Result};
pub use file::{
    is_valid_id, ContentStore, FileContent, FileRecord, FileService, FileStore, FileType,
    MemoryFileStore, NewFile, ObjectId, ParentId, UploadRequest, MAX_FILES_PER_PAGE,
};
pub use queue::{Job, JobQueue, MemoryJobQueue, SqliteJobQueue};
pub use web::{create_router, AppState, WebServer};
