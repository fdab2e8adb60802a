//! File service.
//!
//! This module provides the hierarchy operations behind the HTTP layer:
//! - Upload of folders, files and images with parent checks
//! - Paginated listing of a folder's children
//! - Publish / unpublish
//! - Content retrieval, including size variants of images
//!
//! Every client-supplied id is sanitized here before it reaches the store.

use std::sync::Arc;

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use tracing::{debug, info, warn};

use crate::queue::{Job, JobQueue};
use crate::{FilesError, Result};

use super::id::ObjectId;
use super::storage::ContentStore;
use super::store::FileStore;
use super::types::{FileRecord, FileType, NewFile, ParentId};
use super::MAX_FILES_PER_PAGE;

/// Content type used when the name has no recognizable extension.
pub const DEFAULT_CONTENT_TYPE: &str = "text/plain";

/// Standard alphabet, padding optional, loose trailing bits accepted.
const UPLOAD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Request data for an upload.
///
/// Fields stay optional so that missing input is reported in a fixed order.
#[derive(Debug, Clone, Default)]
pub struct UploadRequest {
    /// Display name.
    pub name: Option<String>,
    /// One of `folder`, `file`, `image`.
    pub file_type: Option<String>,
    /// Containing folder.
    pub parent_id: ParentId,
    /// Initial visibility.
    pub is_public: bool,
    /// Base64-encoded content. Required unless the entry is a folder.
    pub data: Option<String>,
}

impl UploadRequest {
    /// Create a request for a private entry under the root.
    pub fn new(name: impl Into<String>, file_type: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            file_type: Some(file_type.into()),
            ..Self::default()
        }
    }

    /// Set the parent.
    pub fn with_parent(mut self, parent_id: ParentId) -> Self {
        self.parent_id = parent_id;
        self
    }

    /// Set the visibility.
    pub fn with_public(mut self, is_public: bool) -> Self {
        self.is_public = is_public;
        self
    }

    /// Set the base64 content.
    pub fn with_data(mut self, data: impl Into<String>) -> Self {
        self.data = Some(data.into());
        self
    }
}

/// Bytes of a file together with the type to serve them as.
#[derive(Debug, Clone)]
pub struct FileContent {
    /// Raw bytes.
    pub data: Vec<u8>,
    /// MIME type inferred from the entry name.
    pub content_type: String,
}

/// Service for the file hierarchy.
#[derive(Clone)]
pub struct FileService {
    store: Arc<dyn FileStore>,
    content: ContentStore,
    queue: Arc<dyn JobQueue>,
}

impl FileService {
    /// Create a new FileService.
    pub fn new(store: Arc<dyn FileStore>, content: ContentStore, queue: Arc<dyn JobQueue>) -> Self {
        Self {
            store,
            content,
            queue,
        }
    }

    /// Metadata store.
    pub fn store(&self) -> &Arc<dyn FileStore> {
        &self.store
    }

    /// Create a folder, file or image owned by `owner`.
    ///
    /// # Validation
    /// Checked in this order, first failure wins:
    /// 1. `name` present and non-empty
    /// 2. `type` one of `folder`, `file`, `image`
    /// 3. `data` present for non-folders
    /// 4. a non-root parent exists and is a folder
    /// 5. `data` is valid base64
    ///
    /// Nothing touches the disk or the store before all checks pass. Bytes
    /// are written before the metadata row, so a crash in between leaves an
    /// unreferenced file rather than a record without content.
    pub async fn upload(&self, owner: &ObjectId, request: UploadRequest) -> Result<FileRecord> {
        let name = match request.name {
            Some(name) if !name.is_empty() => name,
            _ => return Err(FilesError::validation("Missing name")),
        };

        let file_type: FileType = request
            .file_type
            .as_deref()
            .and_then(|t| t.parse().ok())
            .ok_or_else(|| FilesError::validation("Missing type"))?;

        let data = match request.data {
            Some(data) if !data.is_empty() => Some(data),
            _ if file_type.has_content() => return Err(FilesError::validation("Missing data")),
            _ => None,
        };

        if let ParentId::Id(parent_id) = &request.parent_id {
            let parent = self
                .store
                .find_by_id(parent_id)
                .await?
                .ok_or_else(|| FilesError::validation("Parent not found"))?;
            if parent.file_type != FileType::Folder {
                return Err(FilesError::validation("Parent is not a folder"));
            }
        }

        let bytes = match (file_type.has_content(), data) {
            (true, Some(data)) => Some(decode_data(&data)?),
            _ => None,
        };

        self.content.ensure_root().await?;

        let mut new_file = NewFile::new(owner.clone(), name, file_type)
            .with_parent(request.parent_id)
            .with_public(request.is_public);

        if let Some(bytes) = bytes {
            let path = self.content.write(&bytes).await?;
            debug!(path = %path.display(), size = bytes.len(), "Content written");
            new_file = new_file.with_local_path(path);
        }

        let record = self.store.insert(new_file).await?;
        info!(
            file_id = %record.id,
            user_id = %owner,
            file_type = %record.file_type,
            "Entry created"
        );

        if record.file_type == FileType::Image {
            let job = Job::thumbnail(owner, &record.id, &record.name);
            if let Err(e) = self.queue.enqueue(job).await {
                warn!(file_id = %record.id, error = %e, "Failed to queue thumbnail job");
            }
        }

        Ok(record)
    }

    /// Fetch an entry owned by `owner`.
    pub async fn show(&self, owner: &ObjectId, id: &str) -> Result<FileRecord> {
        let id = ObjectId::sanitize(id);
        self.store
            .find_owned(&id, owner)
            .await?
            .ok_or(FilesError::NotFound)
    }

    /// One page of `owner`'s entries under `parent_id`, newest first.
    ///
    /// A missing parent means the root. A missing or non-numeric page means
    /// page 0. Unknown parents and pages past the end yield an empty list.
    pub async fn list(
        &self,
        owner: &ObjectId,
        parent_id: Option<&str>,
        page: Option<&str>,
    ) -> Result<Vec<FileRecord>> {
        let parent = parent_id.map(ParentId::from_client).unwrap_or_default();
        let page = page.and_then(|p| p.parse::<u32>().ok()).unwrap_or(0);
        let skip = (page as usize).saturating_mul(MAX_FILES_PER_PAGE);

        debug!(user_id = %owner, parent = parent.as_stored(), page, "Listing entries");
        self.store
            .list_children(owner, &parent, skip, MAX_FILES_PER_PAGE)
            .await
    }

    /// Set the public flag on an entry owned by `owner`.
    pub async fn set_public(
        &self,
        owner: &ObjectId,
        id: &str,
        is_public: bool,
    ) -> Result<FileRecord> {
        let id = ObjectId::sanitize(id);
        let record = self
            .store
            .set_public(&id, owner, is_public)
            .await?
            .ok_or(FilesError::NotFound)?;

        info!(file_id = %record.id, is_public, "Visibility changed");
        Ok(record)
    }

    /// Read the bytes of an entry, or of one of its size variants.
    ///
    /// Readable when the entry is public or `principal` owns it. A denied
    /// read is reported exactly like an unknown id.
    pub async fn get_content(
        &self,
        principal: Option<&ObjectId>,
        id: &str,
        size: Option<&str>,
    ) -> Result<FileContent> {
        let id = ObjectId::sanitize(id);
        let record = self
            .store
            .find_by_id(&id)
            .await?
            .ok_or(FilesError::NotFound)?;

        if !record.is_public && principal != Some(&record.user_id) {
            return Err(FilesError::NotFound);
        }

        if record.file_type == FileType::Folder {
            return Err(FilesError::InvalidOperation(
                "A folder doesn't have content".to_string(),
            ));
        }

        let local_path = record.local_path.as_deref().ok_or(FilesError::NotFound)?;
        let path = match size.filter(|s| !s.is_empty()) {
            Some(size) => ContentStore::variant_path(local_path, size).ok_or(FilesError::NotFound)?,
            None => local_path.to_path_buf(),
        };

        let data = ContentStore::read(&path)
            .await?
            .ok_or(FilesError::NotFound)?;

        Ok(FileContent {
            data,
            content_type: content_type_for(&record.name),
        })
    }
}

/// Decode an upload payload. Line breaks and other whitespace are ignored.
fn decode_data(data: &str) -> Result<Vec<u8>> {
    let compact: String = data.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    UPLOAD_ENGINE
        .decode(compact)
        .map_err(|_| FilesError::validation("Invalid data"))
}

/// MIME type for a file name, by extension.
pub fn content_type_for(name: &str) -> String {
    mime_guess::from_path(name)
        .first_raw()
        .unwrap_or(DEFAULT_CONTENT_TYPE)
        .to_string()
}
