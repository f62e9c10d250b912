use crate::error::AppError;
use std::env;

/// Values that must never be used as a session signing key.
const PLACEHOLDER_SECRETS: &[&str] = &["your_secret_key", "secret", "changeme", "change-me"];

/// Minimum accepted length of a configured session secret, in bytes.
pub const MIN_SECRET_LEN: usize = 32;

/// Longest accepted session lifetime: ten years.
pub const MAX_SESSION_TTL_HOURS: i64 = 24 * 365 * 10;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub database_max_connections: u32,
    pub server_port: u16,
    pub server_host: String,
    /// `None` means a key is generated at start-up and sessions do not survive restarts.
    pub session_secret: Option<String>,
    pub session_ttl_hours: i64,
    pub bcrypt_cost: u32,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_vars<F>(var: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let session_secret = var("SESSION_SECRET").filter(|s| !s.is_empty());
        if let Some(secret) = &session_secret {
            validate_secret(secret)?;
        }

        let bcrypt_cost = parse_or(&var, "BCRYPT_COST", bcrypt::DEFAULT_COST)?;
        if !(4..=31).contains(&bcrypt_cost) {
            return Err(AppError::Configuration(format!(
                "BCRYPT_COST must be between 4 and 31, got {}",
                bcrypt_cost
            )));
        }

        let session_ttl_hours = parse_or(&var, "SESSION_TTL_HOURS", 24 * 7)?;
        if !(1..=MAX_SESSION_TTL_HOURS).contains(&session_ttl_hours) {
            return Err(AppError::Configuration(format!(
                "SESSION_TTL_HOURS must be between 1 and {}, got {}",
                MAX_SESSION_TTL_HOURS, session_ttl_hours
            )));
        }

        Ok(Self {
            database_url: var("DATABASE_URL").unwrap_or_else(|| "sqlite://site.db".to_string()),
            database_max_connections: parse_or(&var, "DATABASE_MAX_CONNECTIONS", 5)?,
            server_port: parse_or(&var, "SERVER_PORT", 8080)?,
            server_host: var("SERVER_HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            session_secret,
            session_ttl_hours,
            bcrypt_cost,
        })
    }

    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.server_host, self.server_port)
    }
}

fn parse_or<F, T>(var: &F, key: &str, default: T) -> Result<T, AppError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match var(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::Configuration(format!("{} must be a number, got {:?}", key, raw))),
        None => Ok(default),
    }
}

fn validate_secret(secret: &str) -> Result<(), AppError> {
    if PLACEHOLDER_SECRETS
        .iter()
        .any(|p| p.eq_ignore_ascii_case(secret.trim()))
    {
        return Err(AppError::Configuration(
            "SESSION_SECRET is a placeholder value; generate a random one".into(),
        ));
    }
    if secret.len() < MIN_SECRET_LEN {
        return Err(AppError::Configuration(format!(
            "SESSION_SECRET must be at least {} bytes",
            MIN_SECRET_LEN
        )));
    }
    Ok(())
}
