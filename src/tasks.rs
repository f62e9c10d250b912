//! Task operations: create, complete, list, and the weekly statistics.

use chrono::{DateTime, Datelike, Duration, NaiveTime, Utc};

use crate::db::Database;
use crate::error::AppError;
use crate::models::{Task, TaskStats, User};

/// Midnight UTC of the Monday on or before `now`.
pub fn start_of_week(now: DateTime<Utc>) -> DateTime<Utc> {
    let days_since_monday = i64::from(now.weekday().num_days_from_monday());
    let monday = now.date_naive() - Duration::days(days_since_monday);
    monday.and_time(NaiveTime::MIN).and_utc()
}

/// Stores a new, not yet completed task for `user`, stamped with the current time.
pub async fn create_task(db: &Database, user: &User, title: &str) -> Result<Task, AppError> {
    let task = db.insert_task(user.id, title, Utc::now()).await?;
    log::debug!("User {} created task {}: {:?}", user.id, task.id, task.title);
    Ok(task)
}

/// Marks a task completed. Completing an already completed task changes nothing.
///
/// The lookup is by id alone: any signed-in user can complete any task. That is logged
/// rather than refused.
pub async fn complete_task(
    db: &Database,
    requester: &User,
    task_id: i64,
) -> Result<Task, AppError> {
    let task = db
        .mark_task_completed(task_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Task {} not found", task_id)))?;

    if task.user_id != requester.id {
        log::warn!(
            "User {} completed task {} owned by user {}",
            requester.id,
            task.id,
            task.user_id
        );
    }
    Ok(task)
}

pub async fn list_tasks(db: &Database, user: &User) -> Result<Vec<Task>, AppError> {
    db.tasks_for_user(user.id).await
}

/// Completed and ongoing counts over the user's tasks created since the start of `now`'s week.
pub async fn weekly_stats(
    db: &Database,
    user: &User,
    now: DateTime<Utc>,
) -> Result<TaskStats, AppError> {
    db.count_tasks_since(user.id, start_of_week(now)).await
}
