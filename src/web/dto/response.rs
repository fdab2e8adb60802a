//! Response DTOs for Web API.

use serde::Serialize;

use crate::db::User;
use crate::file::{FileRecord, FileType, ObjectId, ParentId};

/// File or folder metadata as sent to clients.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileResponse {
    /// Entry id.
    pub id: ObjectId,
    /// Owner id.
    pub user_id: ObjectId,
    /// Display name.
    pub name: String,
    /// Entry kind.
    #[serde(rename = "type")]
    pub file_type: FileType,
    /// Visibility.
    pub is_public: bool,
    /// `0` for the root, otherwise the folder id.
    pub parent_id: ParentId,
}

impl From<FileRecord> for FileResponse {
    fn from(record: FileRecord) -> Self {
        Self {
            id: record.id,
            user_id: record.user_id,
            name: record.name,
            file_type: record.file_type,
            is_public: record.is_public,
            parent_id: record.parent_id,
        }
    }
}

/// Account as sent to clients.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    /// User id.
    pub id: ObjectId,
    /// Login email.
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.object_id(),
            email: user.email,
        }
    }
}

/// Login response.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    /// Session token.
    pub token: String,
}

/// Collaborator liveness.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    /// Database answers queries.
    pub db: bool,
    /// Session store is reachable.
    pub sessions: bool,
}

/// Object counts.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    /// Number of accounts.
    pub users: i64,
    /// Number of files and folders.
    pub files: i64,
}
