use actix_web::web;

use crate::auth::password::{hash_password, verify_password};
use crate::auth::USERNAME_TAKEN;
use crate::db::Database;
use crate::error::AppError;
use crate::models::User;

/// Runs CPU-heavy hashing on the blocking thread pool.
async fn blocking<F, R>(f: F) -> Result<R, AppError>
where
    F: FnOnce() -> Result<R, AppError> + Send + 'static,
    R: Send + 'static,
{
    web::block(f)
        .await
        .map_err(|e| AppError::InternalServerError(format!("Blocking task failed: {}", e)))?
}

/// Creates an account. Fails with `Conflict` when the username is taken.
///
/// The lookup catches the common case; the UNIQUE constraint catches a concurrent
/// registration of the same name, which `Database::insert_user` also reports as `Conflict`.
pub async fn register(
    db: &Database,
    username: &str,
    password: &str,
    cost: u32,
) -> Result<User, AppError> {
    if db.find_user_by_username(username).await?.is_some() {
        return Err(AppError::Conflict(USERNAME_TAKEN.into()));
    }

    let password = password.to_owned();
    let password_hash = blocking(move || hash_password(&password, cost)).await?;
    let user = db.insert_user(username, &password_hash).await?;
    log::info!("Registered user {} ({})", user.id, user.username);
    Ok(user)
}

/// Checks credentials. Unknown usernames and wrong passwords are indistinguishable.
///
/// An unknown username still pays for one bcrypt round at `cost`, the work factor stored
/// hashes are created with, so response time does not reveal which usernames exist.
pub async fn login(
    db: &Database,
    username: &str,
    password: &str,
    cost: u32,
) -> Result<User, AppError> {
    let candidate = password.to_owned();
    let Some(user) = db.find_user_by_username(username).await? else {
        blocking(move || hash_password(&candidate, cost)).await?;
        return Err(AppError::InvalidCredentials);
    };

    let stored = user.password.clone();
    if blocking(move || verify_password(&candidate, &stored)).await? {
        Ok(user)
    } else {
        Err(AppError::InvalidCredentials)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_COST: u32 = 4;

    #[actix_rt::test]
    async fn test_register_hashes_password() {
        let db = Database::in_memory().await.unwrap();
        let user = register(&db, "alice", "pw1", TEST_COST).await.unwrap();

        assert_eq!(user.username, "alice");
        assert_ne!(user.password, "pw1");
        assert!(verify_password("pw1", &user.password).unwrap());
    }

    #[actix_rt::test]
    async fn test_register_twice_is_conflict() {
        let db = Database::in_memory().await.unwrap();
        let first = register(&db, "alice", "pw1", TEST_COST).await.unwrap();

        match register(&db, "alice", "other", TEST_COST).await {
            Err(AppError::Conflict(msg)) => assert_eq!(msg, USERNAME_TAKEN),
            other => panic!("expected Conflict, got {:?}", other),
        }

        let stored = db.find_user_by_username("alice").await.unwrap().unwrap();
        assert_eq!(stored, first);
        assert!(login(&db, "alice", "pw1", TEST_COST).await.is_ok());
    }

    #[actix_rt::test]
    async fn test_login_rejects_bad_credentials() {
        let db = Database::in_memory().await.unwrap();
        register(&db, "bob", "secret", TEST_COST).await.unwrap();

        assert!(matches!(
            login(&db, "bob", "wrong", TEST_COST).await,
            Err(AppError::InvalidCredentials)
        ));
        assert!(matches!(
            login(&db, "nobody", "secret", TEST_COST).await,
            Err(AppError::InvalidCredentials)
        ));

        let user = login(&db, "bob", "secret", TEST_COST).await.unwrap();
        assert_eq!(user.username, "bob");
    }

    #[actix_rt::test]
    async fn test_unknown_username_costs_a_bcrypt_round() {
        // Cost 10 makes one bcrypt round take milliseconds, well above a bare lookup.
        const SLOW_COST: u32 = 10;
        let db = Database::in_memory().await.unwrap();

        let single_round = std::time::Instant::now();
        hash_password("secret", SLOW_COST).unwrap();
        let single_round = single_round.elapsed();

        let started = std::time::Instant::now();
        let result = login(&db, "nobody", "secret", SLOW_COST).await;
        let elapsed = started.elapsed();

        assert!(matches!(result, Err(AppError::InvalidCredentials)));
        assert!(
            elapsed * 2 >= single_round,
            "unknown username answered in {:?}, one bcrypt round takes {:?}",
            elapsed,
            single_round
        );
    }
}
