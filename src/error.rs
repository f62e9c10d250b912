//!
//! # Custom Error Handling
//!
//! This module defines the custom error type `AppError` used throughout the application.
//! Every fallible operation (persistence, hashing, session tokens, configuration) reports
//! through it, so handlers can use the `?` operator and return `Result<_, AppError>`.
//!
//! `AppError` implements `actix_web::error::ResponseError`. Most variants become plain-text
//! error responses; `Unauthenticated` becomes a redirect to the login page, which is how the
//! authentication guard short-circuits protected routes.

use actix_web::{
    error::ResponseError,
    http::{header, StatusCode},
    HttpResponse,
};
use std::fmt;

/// Where the authentication guard sends anonymous visitors.
pub const LOGIN_PATH: &str = "/login";

/// Represents all possible errors that can occur within the application.
#[derive(Debug)]
pub enum AppError {
    /// Unknown username or wrong password on login.
    InvalidCredentials,
    /// The requested username is already registered (HTTP 400, plain text).
    Conflict(String),
    /// Represents a situation where a requested resource was not found (HTTP 404).
    NotFound(String),
    /// No valid session on a protected route. Rendered as a redirect to `/login`.
    Unauthenticated,
    /// Represents a client-side error due to a malformed or invalid request (HTTP 400).
    BadRequest(String),
    /// Represents an unexpected server-side error (HTTP 500).
    InternalServerError(String),
    /// Represents an error originating from database operations (HTTP 500).
    /// Wraps errors from the `sqlx` crate.
    DatabaseError(String),
    /// Invalid or missing configuration detected at start-up.
    Configuration(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::InvalidCredentials => write!(f, "{}", crate::auth::INVALID_CREDENTIALS),
            AppError::Conflict(msg) => write!(f, "{}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::Unauthenticated => write!(f, "Authentication required"),
            AppError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            AppError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
            AppError::DatabaseError(msg) => write!(f, "Database Error: {}", msg),
            AppError::Configuration(msg) => write!(f, "Configuration Error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

/// Converts `AppError` variants into `HttpResponse` objects.
impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::Conflict(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthenticated => StatusCode::FOUND,
            AppError::InternalServerError(_)
            | AppError::DatabaseError(_)
            | AppError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Unauthenticated => HttpResponse::Found()
                .insert_header((header::LOCATION, LOGIN_PATH))
                .finish(),
            AppError::Conflict(msg) => HttpResponse::BadRequest()
                .content_type("text/plain; charset=utf-8")
                .body(msg.clone()),
            // Internal details stay in the log, not in the response body.
            AppError::InternalServerError(_)
            | AppError::DatabaseError(_)
            | AppError::Configuration(_) => {
                log::error!("{}", self);
                HttpResponse::InternalServerError()
                    .content_type("text/plain; charset=utf-8")
                    .body("Internal Server Error")
            }
            _ => HttpResponse::build(self.status_code())
                .content_type("text/plain; charset=utf-8")
                .body(self.to_string()),
        }
    }
}

/// Converts `sqlx::Error` into `AppError`.
///
/// `RowNotFound` maps to `NotFound`, a unique-constraint violation maps to `Conflict`
/// (the only unique column is `user.username`), everything else is a `DatabaseError`.
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        match error {
            sqlx::Error::RowNotFound => AppError::NotFound("Record not found".into()),
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                AppError::Conflict(crate::auth::USERNAME_TAKEN.into())
            }
            _ => AppError::DatabaseError(error.to_string()),
        }
    }
}

/// Converts `jsonwebtoken::errors::Error` into `AppError::Unauthenticated`.
///
/// A session token that fails verification is treated the same as no session at all.
impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(_: jsonwebtoken::errors::Error) -> AppError {
        AppError::Unauthenticated
    }
}

/// Converts `bcrypt::BcryptError` into `AppError::InternalServerError`.
impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::InternalServerError(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::MessageBody;

    #[test]
    fn test_error_responses() {
        let response = AppError::InvalidCredentials.error_response();
        assert_eq!(response.status(), 401);

        let response = AppError::Conflict("taken".into()).error_response();
        assert_eq!(response.status(), 400);

        let response = AppError::NotFound("Resource not found".into()).error_response();
        assert_eq!(response.status(), 404);

        let response = AppError::DatabaseError("disk I/O error".into()).error_response();
        assert_eq!(response.status(), 500);
    }

    #[test]
    fn test_unauthenticated_redirects_to_login() {
        let response = AppError::Unauthenticated.error_response();
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            LOGIN_PATH
        );
    }

    #[test]
    fn test_conflict_body_is_plain_message() {
        let response = AppError::Conflict("Username already exists.".into()).error_response();
        let body = response.into_body().try_into_bytes().unwrap();
        assert_eq!(&body[..], b"Username already exists.");
    }

    #[test]
    fn test_internal_details_are_not_leaked() {
        let response = AppError::DatabaseError("no such table: task".into()).error_response();
        let body = response.into_body().try_into_bytes().unwrap();
        assert_eq!(&body[..], b"Internal Server Error");
    }
}
