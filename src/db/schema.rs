//! Database schema and migrations.
//!
//! Migrations are applied in order the first time the database is opened
//! or upgraded. The schema_version table tracks which ones have run.

/// Database migrations.
pub const MIGRATIONS: &[&str] = &[
    // v1: users
    r#"
CREATE TABLE users (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    email       TEXT NOT NULL UNIQUE,
    password    TEXT NOT NULL,           -- Argon2 hash
    created_at  TEXT NOT NULL DEFAULT (datetime('now'))
);
"#,
    // v2: file metadata
    r#"
CREATE TABLE files (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id     TEXT NOT NULL,
    name        TEXT NOT NULL,
    type        TEXT NOT NULL,           -- 'folder', 'file', 'image'
    is_public   INTEGER NOT NULL DEFAULT 0,
    parent_id   TEXT NOT NULL DEFAULT '0',  -- '0' is the root
    local_path  TEXT,                    -- NULL for folders
    created_at  TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX idx_files_owner_parent ON files(user_id, parent_id, id);
"#,
    // v3: background jobs
    r#"
CREATE TABLE jobs (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    queue       TEXT NOT NULL,
    name        TEXT NOT NULL,
    payload     TEXT NOT NULL,           -- JSON
    created_at  TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX idx_jobs_queue ON jobs(queue, id);
"#,
];
