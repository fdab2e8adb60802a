//! Persistence interface for file metadata.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::id::ObjectId;
use super::types::{FileRecord, NewFile, ParentId};
use crate::Result;

/// Document-store style access to file metadata.
///
/// Implementations assign ids that increase with insertion order and apply
/// each update atomically per record.
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Fetch a record by id regardless of owner.
    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<FileRecord>>;

    /// Fetch a record by id, only if `owner` owns it.
    async fn find_owned(&self, id: &ObjectId, owner: &ObjectId) -> Result<Option<FileRecord>>;

    /// Insert a record and return it with its assigned id.
    async fn insert(&self, new_file: NewFile) -> Result<FileRecord>;

    /// Set the public flag on a record owned by `owner`.
    ///
    /// Returns the updated record, or `None` if no such record exists.
    async fn set_public(
        &self,
        id: &ObjectId,
        owner: &ObjectId,
        is_public: bool,
    ) -> Result<Option<FileRecord>>;

    /// Children of `parent` owned by `owner`, newest first.
    async fn list_children(
        &self,
        owner: &ObjectId,
        parent: &ParentId,
        skip: usize,
        limit: usize,
    ) -> Result<Vec<FileRecord>>;

    /// Total number of records.
    async fn count(&self) -> Result<i64>;
}

/// In-memory [`FileStore`] for tests and embedding.
#[derive(Debug)]
pub struct MemoryFileStore {
    records: RwLock<BTreeMap<ObjectId, FileRecord>>,
    next_seq: AtomicI64,
}

impl Default for MemoryFileStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryFileStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            records: RwLock::new(BTreeMap::new()),
            next_seq: AtomicI64::new(1),
        }
    }
}

#[async_trait]
impl FileStore for MemoryFileStore {
    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<FileRecord>> {
        Ok(self.records.read().await.get(id).cloned())
    }

    async fn find_owned(&self, id: &ObjectId, owner: &ObjectId) -> Result<Option<FileRecord>> {
        Ok(self
            .records
            .read()
            .await
            .get(id)
            .filter(|r| &r.user_id == owner)
            .cloned())
    }

    async fn insert(&self, new_file: NewFile) -> Result<FileRecord> {
        let id = ObjectId::from_sequence(self.next_seq.fetch_add(1, Ordering::SeqCst));
        let record = new_file.into_record(id.clone());
        self.records.write().await.insert(id, record.clone());
        Ok(record)
    }

    async fn set_public(
        &self,
        id: &ObjectId,
        owner: &ObjectId,
        is_public: bool,
    ) -> Result<Option<FileRecord>> {
        let mut records = self.records.write().await;
        match records.get_mut(id) {
            Some(record) if &record.user_id == owner => {
                record.is_public = is_public;
                Ok(Some(record.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn list_children(
        &self,
        owner: &ObjectId,
        parent: &ParentId,
        skip: usize,
        limit: usize,
    ) -> Result<Vec<FileRecord>> {
        Ok(self
            .records
            .read()
            .await
            .values()
            .rev()
            .filter(|r| &r.user_id == owner && &r.parent_id == parent)
            .skip(skip)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn count(&self) -> Result<i64> {
        Ok(self.records.read().await.len() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file::FileType;

    fn owner() -> ObjectId {
        ObjectId::from_sequence(100)
    }

    #[tokio::test]
    async fn test_insert_assigns_increasing_ids() {
        let store = MemoryFileStore::new();

        let a = store
            .insert(NewFile::new(owner(), "a", FileType::Folder))
            .await
            .unwrap();
        let b = store
            .insert(NewFile::new(owner(), "b", FileType::Folder))
            .await
            .unwrap();

        assert!(a.id < b.id);
        assert_eq!(store.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_find_owned_checks_owner() {
        let store = MemoryFileStore::new();
        let record = store
            .insert(NewFile::new(owner(), "a", FileType::Folder))
            .await
            .unwrap();

        assert!(store.find_owned(&record.id, &owner()).await.unwrap().is_some());
        let stranger = ObjectId::from_sequence(200);
        assert!(store.find_owned(&record.id, &stranger).await.unwrap().is_none());
        assert!(store.find_by_id(&record.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_set_public_requires_owner() {
        let store = MemoryFileStore::new();
        let record = store
            .insert(NewFile::new(owner(), "a", FileType::Folder))
            .await
            .unwrap();

        let stranger = ObjectId::from_sequence(200);
        assert!(store
            .set_public(&record.id, &stranger, true)
            .await
            .unwrap()
            .is_none());

        let updated = store
            .set_public(&record.id, &owner(), true)
            .await
            .unwrap()
            .unwrap();
        assert!(updated.is_public);
    }

    #[tokio::test]
    async fn test_list_children_newest_first() {
        let store = MemoryFileStore::new();
        for name in ["a", "b", "c"] {
            store
                .insert(NewFile::new(owner(), name, FileType::Folder))
                .await
                .unwrap();
        }

        let names: Vec<String> = store
            .list_children(&owner(), &ParentId::Root, 0, 20)
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["c", "b", "a"]);

        let second_page = store
            .list_children(&owner(), &ParentId::Root, 2, 2)
            .await
            .unwrap();
        assert_eq!(second_page.len(), 1);
        assert_eq!(second_page[0].name, "a");
    }
}
