//! User repository.
//!
//! This module provides create/read operations for users in the database.

use sqlx::SqlitePool;

use super::user::{NewUser, User};
use crate::file::ObjectId;
use crate::{FilesError, Result};

/// Repository for user operations.
pub struct UserRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> UserRepository<'a> {
    /// Create a new UserRepository with the given database pool reference.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new user in the database.
    ///
    /// Returns the created user with the assigned ID. A taken email fails
    /// with `"Already exist"`, also when a concurrent insert won the race.
    pub async fn create(&self, new_user: &NewUser) -> Result<User> {
        let result = sqlx::query("INSERT INTO users (email, password) VALUES (?, ?)")
            .bind(&new_user.email)
            .bind(&new_user.password)
            .execute(self.pool)
            .await
            .map_err(|e| {
                if matches!(&e, sqlx::Error::Database(db_err) if db_err.is_unique_violation()) {
                    FilesError::validation("Already exist")
                } else {
                    FilesError::from(e)
                }
            })?;

        let id = result.last_insert_rowid();
        self.get_by_row_id(id)
            .await?
            .ok_or_else(|| FilesError::Database("inserted user not found".to_string()))
    }

    /// Get a user by client-facing id.
    pub async fn get_by_id(&self, id: &ObjectId) -> Result<Option<User>> {
        match id.sequence() {
            Some(row_id) => self.get_by_row_id(row_id).await,
            None => Ok(None),
        }
    }

    async fn get_by_row_id(&self, id: i64) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, password, created_at FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(user)
    }

    /// Get a user by email.
    pub async fn get_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, password, created_at FROM users WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(self.pool)
        .await?;

        Ok(user)
    }

    /// Check if an email is already registered.
    pub async fn email_exists(&self, email: &str) -> Result<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = ?)")
            .bind(email)
            .fetch_one(self.pool)
            .await?;
        Ok(exists)
    }

    /// Count all users.
    pub async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }
}
