//! Background job dispatch.
//!
//! The service only enqueues. An out-of-process worker drains the queues,
//! e.g. rendering `{local_path}_{size}` thumbnails for uploaded images.

use std::sync::Mutex;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use sqlx::SqlitePool;
use tracing::debug;

use crate::file::ObjectId;
use crate::{FilesError, Result};

/// Queue consumed by the thumbnail renderer.
pub const THUMBNAIL_QUEUE: &str = "thumbnail generation";

/// Queue consumed by the mailer.
pub const EMAIL_QUEUE: &str = "email sending";

/// A unit of work for a background worker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Job {
    /// Queue the job is pushed to.
    pub queue: String,
    /// Human-readable job name.
    pub name: String,
    /// Worker input.
    pub payload: Value,
}

impl Job {
    /// Create a job.
    pub fn new(queue: impl Into<String>, name: impl Into<String>, payload: Value) -> Self {
        Self {
            queue: queue.into(),
            name: name.into(),
            payload,
        }
    }

    /// Thumbnail rendering for an uploaded image.
    pub fn thumbnail(user_id: &ObjectId, file_id: &ObjectId, file_name: &str) -> Self {
        Self::new(
            THUMBNAIL_QUEUE,
            format!("Image thumbnail [{user_id}-{file_id}]"),
            serde_json::json!({
                "userId": user_id,
                "fileId": file_id,
                "name": file_name,
            }),
        )
    }

    /// Welcome mail for a new account.
    pub fn welcome_email(user_id: &ObjectId) -> Self {
        Self::new(
            EMAIL_QUEUE,
            format!("Welcome email [{user_id}]"),
            serde_json::json!({ "userId": user_id }),
        )
    }
}

/// Fire-and-forget job dispatcher.
#[async_trait]
pub trait JobQueue: Send + Sync {
    /// Accept a job. Returns once the job is durably queued.
    async fn enqueue(&self, job: Job) -> Result<()>;
}

/// In-memory [`JobQueue`] that records every job.
#[derive(Debug, Default)]
pub struct MemoryJobQueue {
    jobs: Mutex<Vec<Job>>,
}

impl MemoryJobQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the jobs accepted so far, oldest first.
    pub fn jobs(&self) -> Vec<Job> {
        self.jobs
            .lock()
            .map(|jobs| jobs.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl JobQueue for MemoryJobQueue {
    async fn enqueue(&self, job: Job) -> Result<()> {
        let mut jobs = self
            .jobs
            .lock()
            .map_err(|_| FilesError::Queue("job list poisoned".to_string()))?;
        jobs.push(job);
        Ok(())
    }
}

#[derive(Debug, sqlx::FromRow)]
struct JobRow {
    id: i64,
    queue: String,
    name: String,
    payload: String,
}

/// [`JobQueue`] backed by the `jobs` table.
#[derive(Debug, Clone)]
pub struct SqliteJobQueue {
    pool: SqlitePool,
}

impl SqliteJobQueue {
    /// Create a queue over the given pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Take the oldest job from `queue`, removing it.
    pub async fn claim_next(&self, queue: &str) -> Result<Option<Job>> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, JobRow>(
            "SELECT id, queue, name, payload FROM jobs WHERE queue = ? ORDER BY id LIMIT 1",
        )
        .bind(queue)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        sqlx::query("DELETE FROM jobs WHERE id = ?")
            .bind(row.id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        let payload = serde_json::from_str(&row.payload)
            .map_err(|e| FilesError::Queue(format!("corrupt payload for job {}: {e}", row.id)))?;
        Ok(Some(Job::new(row.queue, row.name, payload)))
    }

    /// Number of jobs waiting in `queue`.
    pub async fn pending(&self, queue: &str) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM jobs WHERE queue = ?")
            .bind(queue)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

#[async_trait]
impl JobQueue for SqliteJobQueue {
    async fn enqueue(&self, job: Job) -> Result<()> {
        sqlx::query("INSERT INTO jobs (queue, name, payload) VALUES (?, ?, ?)")
            .bind(&job.queue)
            .bind(&job.name)
            .bind(job.payload.to_string())
            .execute(&self.pool)
            .await?;

        debug!(queue = %job.queue, name = %job.name, "Job enqueued");
        Ok(())
    }
}
