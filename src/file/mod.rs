//! File hierarchy module.
//!
//! This module provides the folder/file hierarchy including:
//! - Identifier validation with fail-closed sanitization
//! - Upload with parent checks
//! - Owner-scoped paginated listing
//! - Public/private visibility
//! - Content retrieval with size variants

mod id;
mod service;
mod storage;
mod store;
mod types;

pub use id::{is_valid_id, ObjectId, ID_LENGTH};
pub use service::{content_type_for, FileContent, FileService, UploadRequest, DEFAULT_CONTENT_TYPE};
pub use storage::ContentStore;
pub use store::{FileStore, MemoryFileStore};
pub use types::{FileRecord, FileType, NewFile, ParentId, ROOT_PARENT};

/// Maximum number of entries returned by one listing page.
pub const MAX_FILES_PER_PAGE: usize = 20;
