use crate::auth::session::UserLoader;
use crate::db::schema::SQLITE_INIT;
use crate::error::AppError;
use crate::models::{Task, TaskStats, User};
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

const TASK_COLUMNS: &str = "id, title, completed, user_id, created_at";

/// Handle to the relational store. Cloning shares the underlying pool.
#[derive(Clone, Debug)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Opens (creating if needed) the database file behind `url` and initialises the schema.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, AppError> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections.max(1))
            .connect_with(options)
            .await?;

        let db = Self { pool };
        db.init_schema().await?;
        Ok(db)
    }

    /// A private in-memory database, used by tests.
    ///
    /// Every SQLite connection to `:memory:` is its own database, so the pool is pinned to a
    /// single connection that is never recycled.
    pub async fn in_memory() -> Result<Self, AppError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        let db = Self { pool };
        db.init_schema().await?;
        Ok(db)
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Executes the bundled DDL one statement at a time.
    pub async fn init_schema(&self) -> Result<(), AppError> {
        for stmt in SQLITE_INIT.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s).execute(&self.pool).await?;
        }
        Ok(())
    }

    pub async fn find_user_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT id, username, password FROM user WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    pub async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, password FROM user WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    /// Inserts a user. A duplicate username surfaces as `AppError::Conflict`.
    pub async fn insert_user(&self, username: &str, password_hash: &str) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(
            "INSERT INTO user (username, password) VALUES (?, ?) RETURNING id, username, password",
        )
        .bind(username)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await?;
        Ok(user)
    }

    pub async fn insert_task(
        &self,
        user_id: i64,
        title: &str,
        created_at: DateTime<Utc>,
    ) -> Result<Task, AppError> {
        let sql = format!(
            "INSERT INTO task (title, completed, user_id, created_at) VALUES (?, 0, ?, ?) RETURNING {}",
            TASK_COLUMNS
        );
        let task = sqlx::query_as::<_, Task>(&sql)
            .bind(title)
            .bind(user_id)
            .bind(created_at)
            .fetch_one(&self.pool)
            .await?;
        Ok(task)
    }

    pub async fn find_task(&self, id: i64) -> Result<Option<Task>, AppError> {
        let sql = format!("SELECT {} FROM task WHERE id = ?", TASK_COLUMNS);
        let task = sqlx::query_as::<_, Task>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(task)
    }

    /// Sets `completed` on the task with `id`, whoever owns it. `None` if there is no such task.
    pub async fn mark_task_completed(&self, id: i64) -> Result<Option<Task>, AppError> {
        let sql = format!(
            "UPDATE task SET completed = 1 WHERE id = ? RETURNING {}",
            TASK_COLUMNS
        );
        let task = sqlx::query_as::<_, Task>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(task)
    }

    /// All tasks owned by `user_id`, in insertion order.
    pub async fn tasks_for_user(&self, user_id: i64) -> Result<Vec<Task>, AppError> {
        let sql = format!(
            "SELECT {} FROM task WHERE user_id = ? ORDER BY id",
            TASK_COLUMNS
        );
        let tasks = sqlx::query_as::<_, Task>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(tasks)
    }

    /// Counts `user_id`'s tasks created at or after `since`, split by completion.
    pub async fn count_tasks_since(
        &self,
        user_id: i64,
        since: DateTime<Utc>,
    ) -> Result<TaskStats, AppError> {
        let rows = sqlx::query_as::<_, (bool, i64)>(
            "SELECT completed, COUNT(*) FROM task \
             WHERE user_id = ? AND created_at >= ? \
             GROUP BY completed",
        )
        .bind(user_id)
        .bind(since)
        .fetch_all(&self.pool)
        .await?;

        let mut stats = TaskStats::default();
        for (completed, count) in rows {
            if completed {
                stats.completed_count = count;
            } else {
                stats.ongoing_count = count;
            }
        }
        Ok(stats)
    }
}

impl UserLoader for Database {
    async fn load_user(&self, user_id: i64) -> Result<Option<User>, AppError> {
        self.find_user_by_id(user_id).await
    }
}
