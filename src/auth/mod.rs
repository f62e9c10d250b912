pub mod accounts;
pub mod extractors;
pub mod middleware;
pub mod password;
pub mod session;

use serde::Deserialize;

// Re-export necessary items
pub use extractors::CurrentUser;
pub use middleware::SessionMiddleware;
pub use password::{hash_password, verify_password};
pub use session::{SessionClaims, SessionManager, UserLoader, SESSION_COOKIE};

/// Shown when registration hits an existing username.
pub const USERNAME_TAKEN: &str = "Username already exists. Please choose another one.";

/// Shown on the login form when authentication fails.
pub const INVALID_CREDENTIALS: &str = "Invalid username or password";

/// Form payload shared by `POST /login` and `POST /register`.
///
/// No length or charset rules: any username the store accepts is a valid username.
#[derive(Debug, Deserialize)]
pub struct CredentialsForm {
    pub username: String,
    pub password: String,
}
