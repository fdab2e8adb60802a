//! SQLite-backed file metadata store.

use std::path::PathBuf;

use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::file::{FileRecord, FileStore, FileType, NewFile, ObjectId, ParentId};
use crate::{FilesError, Result};

const SELECT_COLUMNS: &str =
    "SELECT id, user_id, name, type AS file_type, is_public, parent_id, local_path FROM files";

#[derive(Debug, sqlx::FromRow)]
struct FileRow {
    id: i64,
    user_id: String,
    name: String,
    file_type: String,
    is_public: bool,
    parent_id: String,
    local_path: Option<String>,
}

impl TryFrom<FileRow> for FileRecord {
    type Error = FilesError;

    fn try_from(row: FileRow) -> Result<Self> {
        let file_type: FileType = row.file_type.parse().map_err(FilesError::Database)?;
        Ok(FileRecord {
            id: ObjectId::from_sequence(row.id),
            user_id: ObjectId::sanitize(&row.user_id),
            name: row.name,
            file_type,
            is_public: row.is_public,
            parent_id: ParentId::from_stored(&row.parent_id),
            local_path: row.local_path.map(PathBuf::from),
        })
    }
}

/// [`FileStore`] over the `files` table.
///
/// Row ids double as the client-facing ids, so ordering by `id` is
/// ordering by creation.
#[derive(Debug, Clone)]
pub struct SqliteFileStore {
    pool: SqlitePool,
}

impl SqliteFileStore {
    /// Create a store over the given pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn fetch_one(&self, row_id: i64, owner: Option<&ObjectId>) -> Result<Option<FileRecord>> {
        let row = match owner {
            Some(owner) => {
                sqlx::query_as::<_, FileRow>(&format!("{SELECT_COLUMNS} WHERE id = ? AND user_id = ?"))
                    .bind(row_id)
                    .bind(owner.as_str())
                    .fetch_optional(&self.pool)
                    .await?
            }
            None => {
                sqlx::query_as::<_, FileRow>(&format!("{SELECT_COLUMNS} WHERE id = ?"))
                    .bind(row_id)
                    .fetch_optional(&self.pool)
                    .await?
            }
        };

        row.map(FileRecord::try_from).transpose()
    }
}

#[async_trait]
impl FileStore for SqliteFileStore {
    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<FileRecord>> {
        match id.sequence() {
            Some(row_id) => self.fetch_one(row_id, None).await,
            None => Ok(None),
        }
    }

    async fn find_owned(&self, id: &ObjectId, owner: &ObjectId) -> Result<Option<FileRecord>> {
        match id.sequence() {
            Some(row_id) => self.fetch_one(row_id, Some(owner)).await,
            None => Ok(None),
        }
    }

    async fn insert(&self, new_file: NewFile) -> Result<FileRecord> {
        let local_path = new_file
            .local_path
            .as_ref()
            .map(|p| p.to_string_lossy().into_owned());

        let result = sqlx::query(
            "INSERT INTO files (user_id, name, type, is_public, parent_id, local_path)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(new_file.user_id.as_str())
        .bind(&new_file.name)
        .bind(new_file.file_type.as_str())
        .bind(new_file.is_public)
        .bind(new_file.parent_id.as_stored())
        .bind(local_path)
        .execute(&self.pool)
        .await?;

        let id = ObjectId::from_sequence(result.last_insert_rowid());
        Ok(new_file.into_record(id))
    }

    async fn set_public(
        &self,
        id: &ObjectId,
        owner: &ObjectId,
        is_public: bool,
    ) -> Result<Option<FileRecord>> {
        let Some(row_id) = id.sequence() else {
            return Ok(None);
        };

        let result = sqlx::query("UPDATE files SET is_public = ? WHERE id = ? AND user_id = ?")
            .bind(is_public)
            .bind(row_id)
            .bind(owner.as_str())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.fetch_one(row_id, Some(owner)).await
    }

    async fn list_children(
        &self,
        owner: &ObjectId,
        parent: &ParentId,
        skip: usize,
        limit: usize,
    ) -> Result<Vec<FileRecord>> {
        let rows = sqlx::query_as::<_, FileRow>(&format!(
            "{SELECT_COLUMNS} WHERE user_id = ? AND parent_id = ? ORDER BY id DESC LIMIT ? OFFSET ?"
        ))
        .bind(owner.as_str())
        .bind(parent.as_stored())
        .bind(limit as i64)
        .bind(skip as i64)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(FileRecord::try_from).collect()
    }

    async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM files")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;

    async fn setup() -> (Database, SqliteFileStore) {
        let db = Database::open_in_memory().await.unwrap();
        let store = SqliteFileStore::new(db.pool().clone());
        (db, store)
    }

    fn owner() -> ObjectId {
        ObjectId::from_sequence(1)
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let (_db, store) = setup().await;

        let folder = store
            .insert(NewFile::new(owner(), "docs", FileType::Folder))
            .await
            .unwrap();
        let file = store
            .insert(
                NewFile::new(owner(), "a.txt", FileType::File)
                    .with_parent(ParentId::Id(folder.id.clone()))
                    .with_local_path("/tmp/files_manager/abc"),
            )
            .await
            .unwrap();

        let found = store.find_by_id(&file.id).await.unwrap().unwrap();
        assert_eq!(found, file);
        assert_eq!(found.parent_id, ParentId::Id(folder.id.clone()));
        assert_eq!(found.local_path, Some(PathBuf::from("/tmp/files_manager/abc")));

        let found_folder = store.find_by_id(&folder.id).await.unwrap().unwrap();
        assert_eq!(found_folder.parent_id, ParentId::Root);
        assert!(found_folder.local_path.is_none());
    }

    #[tokio::test]
    async fn test_find_unknown_ids() {
        let (_db, store) = setup().await;

        assert!(store.find_by_id(&ObjectId::null()).await.unwrap().is_none());
        let huge = ObjectId::parse("ffffffffffffffffffffffff").unwrap();
        assert!(store.find_by_id(&huge).await.unwrap().is_none());
        assert!(store.find_owned(&huge, &owner()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_owned_scopes_by_owner() {
        let (_db, store) = setup().await;
        let record = store
            .insert(NewFile::new(owner(), "docs", FileType::Folder))
            .await
            .unwrap();

        assert!(store.find_owned(&record.id, &owner()).await.unwrap().is_some());
        let stranger = ObjectId::from_sequence(2);
        assert!(store.find_owned(&record.id, &stranger).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_set_public() {
        let (_db, store) = setup().await;
        let record = store
            .insert(NewFile::new(owner(), "docs", FileType::Folder))
            .await
            .unwrap();

        let updated = store
            .set_public(&record.id, &owner(), true)
            .await
            .unwrap()
            .unwrap();
        assert!(updated.is_public);

        // Same value again still reports the record
        let again = store
            .set_public(&record.id, &owner(), true)
            .await
            .unwrap()
            .unwrap();
        assert!(again.is_public);

        let stranger = ObjectId::from_sequence(2);
        assert!(store
            .set_public(&record.id, &stranger, false)
            .await
            .unwrap()
            .is_none());
        assert!(store.find_by_id(&record.id).await.unwrap().unwrap().is_public);
    }

    #[tokio::test]
    async fn test_list_children_pagination() {
        let (_db, store) = setup().await;
        for i in 0..5 {
            store
                .insert(NewFile::new(owner(), format!("f{i}"), FileType::Folder))
                .await
                .unwrap();
        }
        let stranger = ObjectId::from_sequence(2);
        store
            .insert(NewFile::new(stranger, "other", FileType::Folder))
            .await
            .unwrap();

        let first = store
            .list_children(&owner(), &ParentId::Root, 0, 3)
            .await
            .unwrap();
        let names: Vec<_> = first.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["f4", "f3", "f2"]);

        let second = store
            .list_children(&owner(), &ParentId::Root, 3, 3)
            .await
            .unwrap();
        let names: Vec<_> = second.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["f1", "f0"]);

        assert_eq!(store.count().await.unwrap(), 6);
    }
}
