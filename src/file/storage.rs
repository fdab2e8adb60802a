//! Physical storage for uploaded bytes.
//!
//! Every non-folder entry gets one file directly under the storage root,
//! named by a fresh UUID rather than the client-supplied name:
//! ```text
//! {root}/
//! ├── 3b0e5f0c-7c9f-4d9e-9a43-2f1b6f0c1d2e
//! ├── 3b0e5f0c-7c9f-4d9e-9a43-2f1b6f0c1d2e_500   (written by the thumbnail worker)
//! └── ...
//! ```

use std::io;
use std::path::{Path, PathBuf};

use tokio::fs;
use uuid::Uuid;

use crate::Result;

/// Storage for the bytes behind non-folder entries.
#[derive(Debug, Clone)]
pub struct ContentStore {
    root: PathBuf,
}

impl ContentStore {
    /// Create a store rooted at `root`. Nothing is touched on disk yet.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the root directory if it does not exist.
    pub async fn ensure_root(&self) -> Result<()> {
        fs::create_dir_all(&self.root).await?;
        Ok(())
    }

    /// Write `content` to a freshly named file and return its absolute path.
    pub async fn write(&self, content: &[u8]) -> Result<PathBuf> {
        let path = self.absolute_root()?.join(Self::generate_name());
        fs::write(&path, content).await?;
        Ok(path)
    }

    /// Path of a size variant written next to the original.
    ///
    /// Returns `None` when `size` could escape the original's directory.
    pub fn variant_path(local_path: &Path, size: &str) -> Option<PathBuf> {
        if size.contains(['/', '\\']) || size.contains('\0') {
            return None;
        }
        let mut raw = local_path.as_os_str().to_owned();
        raw.push("_");
        raw.push(size);
        Some(PathBuf::from(raw))
    }

    /// Read the file at `path`, or `None` when it is not a regular file.
    pub async fn read(path: &Path) -> Result<Option<Vec<u8>>> {
        match fs::metadata(path).await {
            Ok(meta) if meta.is_file() => {}
            Ok(_) => return Ok(None),
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        }

        match fs::read(path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn absolute_root(&self) -> Result<PathBuf> {
        if self.root.is_absolute() {
            Ok(self.root.clone())
        } else {
            Ok(std::env::current_dir()?.join(&self.root))
        }
    }

    fn generate_name() -> String {
        Uuid::new_v4().to_string()
    }
}
