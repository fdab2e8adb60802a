//! File entity types.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use super::id::ObjectId;

/// Stored representation of the root parent.
pub const ROOT_PARENT: &str = "0";

/// Kind of entry in the hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    /// Container for other entries. Has no content.
    Folder,
    /// Plain file.
    File,
    /// Image file. Uploading one schedules thumbnail generation.
    Image,
}

impl FileType {
    /// Convert to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            FileType::Folder => "folder",
            FileType::File => "file",
            FileType::Image => "image",
        }
    }

    /// Whether this entry carries bytes on disk.
    pub fn has_content(&self) -> bool {
        !matches!(self, FileType::Folder)
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FileType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "folder" => Ok(FileType::Folder),
            "file" => Ok(FileType::File),
            "image" => Ok(FileType::Image),
            _ => Err(format!("unknown file type: {s}")),
        }
    }
}

impl TryFrom<String> for FileType {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Parent of an entry: the virtual root or a stored folder.
///
/// Serializes as the integer `0` for the root and as the id string otherwise.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum ParentId {
    /// Top level of the hierarchy.
    #[default]
    Root,
    /// A stored folder.
    Id(ObjectId),
}

impl ParentId {
    /// Interpret a client-supplied parent id.
    ///
    /// `"0"` and the empty string mean root. Anything else is sanitized, so
    /// garbage turns into an id that matches nothing.
    pub fn from_client(raw: &str) -> Self {
        if raw.is_empty() || raw == ROOT_PARENT {
            ParentId::Root
        } else {
            ParentId::Id(ObjectId::sanitize(raw))
        }
    }

    /// Read the stored column value.
    pub fn from_stored(raw: &str) -> Self {
        Self::from_client(raw)
    }

    /// Value written to storage.
    pub fn as_stored(&self) -> &str {
        match self {
            ParentId::Root => ROOT_PARENT,
            ParentId::Id(id) => id.as_str(),
        }
    }
}

impl Serialize for ParentId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ParentId::Root => serializer.serialize_u8(0),
            ParentId::Id(id) => serializer.serialize_str(id.as_str()),
        }
    }
}

/// A stored file or folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    /// Unique id.
    pub id: ObjectId,
    /// Owner.
    pub user_id: ObjectId,
    /// Display name.
    pub name: String,
    /// Entry kind.
    pub file_type: FileType,
    /// Readable by anyone when true.
    pub is_public: bool,
    /// Containing folder.
    pub parent_id: ParentId,
    /// Location of the bytes. `None` for folders.
    pub local_path: Option<PathBuf>,
}

/// Data for creating a new entry.
#[derive(Debug, Clone)]
pub struct NewFile {
    /// Owner.
    pub user_id: ObjectId,
    /// Display name.
    pub name: String,
    /// Entry kind.
    pub file_type: FileType,
    /// Initial visibility.
    pub is_public: bool,
    /// Containing folder.
    pub parent_id: ParentId,
    /// Location of the bytes. `None` for folders.
    pub local_path: Option<PathBuf>,
}

impl NewFile {
    /// Create a new private entry under the root.
    pub fn new(user_id: ObjectId, name: impl Into<String>, file_type: FileType) -> Self {
        Self {
            user_id,
            name: name.into(),
            file_type,
            is_public: false,
            parent_id: ParentId::Root,
            local_path: None,
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

    /// Set the location of the bytes.
    pub fn with_local_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.local_path = Some(path.into());
        self
    }

    /// Turn into a stored record with the assigned id.
    pub fn into_record(self, id: ObjectId) -> FileRecord {
        FileRecord {
            id,
            user_id: self.user_id,
            name: self.name,
            file_type: self.file_type,
            is_public: self.is_public,
            parent_id: self.parent_id,
            local_path: self.local_path,
        }
    }
}
