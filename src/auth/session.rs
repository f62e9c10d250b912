use crate::error::AppError;
use crate::models::User;
use actix_web::cookie::{time::Duration as CookieDuration, Cookie, SameSite};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use rand::{distributions::Alphanumeric, Rng};
use serde::{Deserialize, Serialize};
use std::future::Future;

/// Name of the cookie carrying the signed session token.
pub const SESSION_COOKIE: &str = "session";

/// Represents the claims encoded within a session token.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SessionClaims {
    /// Subject of the token: the authenticated user's id.
    pub sub: i64,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

/// Resolves a user id stored in a session to the full record.
///
/// The session manager does not know where users live; whoever asks it for the current
/// user hands it a loader.
pub trait UserLoader {
    fn load_user(&self, user_id: i64) -> impl Future<Output = Result<Option<User>, AppError>>;
}

/// Issues, verifies and clears session tokens signed with a server-side key.
#[derive(Clone)]
pub struct SessionManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: chrono::Duration,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl SessionManager {
    pub fn new(secret: &[u8], ttl: chrono::Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            ttl,
        }
    }

    /// 64 random alphanumeric characters from the thread-local CSPRNG.
    pub fn generate_secret() -> String {
        rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(64)
            .map(char::from)
            .collect()
    }

    /// Signs a token binding the session to `user_id`.
    pub fn issue_token(&self, user_id: i64) -> Result<String, AppError> {
        let now = chrono::Utc::now();
        let expires = now.checked_add_signed(self.ttl).ok_or_else(|| {
            AppError::InternalServerError(format!("Session lifetime {} is out of range", self.ttl))
        })?;
        let claims = SessionClaims {
            sub: user_id,
            iat: now.timestamp(),
            exp: expires.timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::InternalServerError(format!("Failed to sign session: {}", e)))
    }

    /// Verifies signature and expiry. Any failure is `AppError::Unauthenticated`.
    pub fn verify_token(&self, token: &str) -> Result<SessionClaims, AppError> {
        let claims = decode::<SessionClaims>(token, &self.decoding_key, &Validation::default())?;
        Ok(claims.claims)
    }

    /// Establishes an authenticated session: the cookie to attach to the response.
    pub fn login_cookie(&self, user_id: i64) -> Result<Cookie<'static>, AppError> {
        let token = self.issue_token(user_id)?;
        Ok(Cookie::build(SESSION_COOKIE, token)
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .max_age(CookieDuration::seconds(self.ttl.num_seconds()))
            .finish())
    }

    /// A cookie that clears the session. Valid whether or not a session exists.
    pub fn logout_cookie(&self) -> Cookie<'static> {
        let mut cookie = Cookie::build(SESSION_COOKIE, "")
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .finish();
        cookie.make_removal();
        cookie
    }

    /// Resolves session state to a user. `None` when anonymous or the user is gone.
    pub async fn current_user<L: UserLoader>(
        &self,
        claims: Option<&SessionClaims>,
        loader: &L,
    ) -> Result<Option<User>, AppError> {
        match claims {
            Some(claims) => loader.load_user(claims.sub).await,
            None => Ok(None),
        }
    }
}
