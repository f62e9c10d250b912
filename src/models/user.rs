use serde::Serialize;
use sqlx::FromRow;

/// A registered account as stored in the `user` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    /// Salted bcrypt hash. Never serialized.
    #[serde(skip_serializing)]
    pub password: String,
}
