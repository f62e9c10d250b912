use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Represents a task entity as stored in the `task` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Task {
    /// Auto-assigned row id.
    pub id: i64,
    /// Free-form title. Empty and whitespace-only titles are allowed.
    pub title: String,
    /// Flips from `false` to `true` once; there is no way back.
    pub completed: bool,
    /// Owner of the task.
    pub user_id: i64,
    /// Creation time in UTC.
    pub created_at: DateTime<Utc>,
}

/// Form payload for `POST /`.
#[derive(Debug, Deserialize)]
pub struct TaskForm {
    pub title: String,
}

/// Body of the `POST /` response.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreatedTask {
    pub id: i64,
    pub title: String,
}

impl From<&Task> for CreatedTask {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id,
            title: task.title.clone(),
        }
    }
}

/// Completed and ongoing counts for tasks created during the current week.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskStats {
    pub completed_count: i64,
    pub ongoing_count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_created_task_keeps_only_id_and_title() {
        let task = Task {
            id: 1,
            title: "Write report".to_string(),
            completed: false,
            user_id: 3,
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(CreatedTask::from(&task)).unwrap();
        assert_eq!(json, serde_json::json!({"id": 1, "title": "Write report"}));
    }

    #[test]
    fn test_stats_field_names() {
        let stats = TaskStats {
            completed_count: 1,
            ongoing_count: 0,
        };
        let json = serde_json::to_value(stats).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"completed_count": 1, "ongoing_count": 0})
        );
    }
}
