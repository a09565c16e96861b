//! Database schema and migrations for filevault.
//!
//! Migrations are applied in order; the `schema_version` table records
//! which ones have run.

/// Database migrations.
pub const MIGRATIONS: &[&str] = &[
    // v1: users
    r#"
CREATE TABLE users (
    id               INTEGER PRIMARY KEY AUTOINCREMENT,
    email            TEXT NOT NULL UNIQUE,
    password_digest  TEXT NOT NULL,           -- Argon2 PHC string
    created_at       TEXT NOT NULL DEFAULT (datetime('now'))
);
"#,
    // v2: file and folder records
    r#"
CREATE TABLE files (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id     INTEGER NOT NULL REFERENCES users(id),
    name        TEXT NOT NULL,
    type        TEXT NOT NULL,               -- 'folder', 'file', 'image'
    parent_id   INTEGER,                     -- NULL for root
    is_public   INTEGER NOT NULL DEFAULT 0,
    local_path  TEXT,                        -- NULL for folders
    created_at  TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX idx_files_user_id ON files(user_id);
CREATE INDEX idx_files_user_parent ON files(user_id, parent_id);
"#,
    // v3: key-value entries with absolute expiry (session tokens)
    r#"
CREATE TABLE kv_entries (
    key            TEXT PRIMARY KEY,
    value          TEXT NOT NULL,
    expires_at_ms  INTEGER NOT NULL           -- unix epoch milliseconds
);

CREATE INDEX idx_kv_entries_expires_at ON kv_entries(expires_at_ms);
"#,
];
