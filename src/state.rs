use crate::auth::SessionManager;
use crate::config::Config;
use crate::db::Database;
use crate::error::AppError;

/// Everything a request handler needs, registered once as `web::Data<AppState>`.
#[derive(Clone, Debug)]
pub struct AppState {
    pub db: Database,
    pub sessions: SessionManager,
    /// bcrypt work factor for new password hashes.
    pub bcrypt_cost: u32,
}

impl AppState {
    pub fn new(db: Database, sessions: SessionManager, bcrypt_cost: u32) -> Self {
        Self {
            db,
            sessions,
            bcrypt_cost,
        }
    }

    /// Connects to the configured database and sets up session signing.
    pub async fn from_config(config: &Config) -> Result<Self, AppError> {
        let db = Database::connect(&config.database_url, config.database_max_connections).await?;

        let secret = match &config.session_secret {
            Some(secret) => secret.clone(),
            None => {
                log::warn!("SESSION_SECRET not set; generated a random key, sessions end on restart");
                SessionManager::generate_secret()
            }
        };
        let sessions = SessionManager::new(
            secret.as_bytes(),
            chrono::Duration::hours(config.session_ttl_hours),
        );

        Ok(Self::new(db, sessions, config.bcrypt_cost))
    }

    /// Fresh in-memory database and a random signing key.
    pub async fn in_memory(bcrypt_cost: u32) -> Result<Self, AppError> {
        let db = Database::in_memory().await?;
        let secret = SessionManager::generate_secret();
        let sessions = SessionManager::new(secret.as_bytes(), chrono::Duration::hours(1));
        Ok(Self::new(db, sessions, bcrypt_cost))
    }
}
