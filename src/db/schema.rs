//! SQL DDL for the task tracker.

/// Two tables, one user to many tasks.
/// - `user.username` is UNIQUE; registration relies on it as the final uniqueness check
/// - `task.completed` is a BOOLEAN stored as INTEGER 0/1
/// - `task.created_at` is RFC 3339 text in UTC, so string order is time order
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS user (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username VARCHAR(150) NOT NULL UNIQUE,
    password VARCHAR(150) NOT NULL
);

CREATE TABLE IF NOT EXISTS task (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title VARCHAR(100) NOT NULL,
    completed BOOLEAN NOT NULL DEFAULT 0,
    user_id INTEGER NOT NULL REFERENCES user(id),
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_task_user_id ON task(user_id);
"#;
