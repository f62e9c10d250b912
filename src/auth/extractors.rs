use actix_web::dev::Payload;
use actix_web::{web, Error as ActixError, FromRequest, HttpMessage, HttpRequest};
use futures::future::LocalBoxFuture;

use crate::auth::session::SessionClaims;
use crate::error::AppError;
use crate::models::User;
use crate::state::AppState;

/// The authenticated user behind the current request.
///
/// Taking this as a handler argument makes the route protected: when the request carries no
/// valid session, or the session names a user that no longer exists, extraction fails with
/// `AppError::Unauthenticated` and the client is redirected to `/login` before the handler runs.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl FromRequest for CurrentUser {
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let claims = req.extensions().get::<SessionClaims>().cloned();
        let state = req.app_data::<web::Data<AppState>>().cloned();

        Box::pin(async move {
            let state = state.ok_or_else(|| {
                AppError::InternalServerError("AppState is not registered".into())
            })?;

            match state.sessions.current_user(claims.as_ref(), &state.db).await? {
                Some(user) => Ok(CurrentUser(user)),
                None => Err(AppError::Unauthenticated.into()),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::{header, StatusCode};
    use actix_web::test;

    #[actix_rt::test]
    async fn test_current_user_extractor_success() {
        let state = AppState::in_memory(4).await.unwrap();
        let user = state.db.insert_user("alice", "hash").await.unwrap();

        let req = test::TestRequest::default()
            .app_data(web::Data::new(state))
            .to_http_request();
        req.extensions_mut().insert(SessionClaims {
            sub: user.id,
            iat: 0,
            exp: i64::MAX,
        });

        let mut payload = Payload::None;
        let extracted = CurrentUser::from_request(&req, &mut payload).await.unwrap();
        assert_eq!(extracted.0, user);
    }

    #[actix_rt::test]
    async fn test_anonymous_request_redirects_to_login() {
        let state = AppState::in_memory(4).await.unwrap();
        let req = test::TestRequest::default()
            .app_data(web::Data::new(state))
            .to_http_request();

        let mut payload = Payload::None;
        let err = CurrentUser::from_request(&req, &mut payload)
            .await
            .unwrap_err();
        let response = err.error_response();
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/login");
    }

    #[actix_rt::test]
    async fn test_session_for_deleted_user_redirects_to_login() {
        let state = AppState::in_memory(4).await.unwrap();
        let req = test::TestRequest::default()
            .app_data(web::Data::new(state))
            .to_http_request();
        req.extensions_mut().insert(SessionClaims {
            sub: 404,
            iat: 0,
            exp: i64::MAX,
        });

        let mut payload = Payload::None;
        let err = CurrentUser::from_request(&req, &mut payload)
            .await
            .unwrap_err();
        assert_eq!(err.error_response().status(), StatusCode::FOUND);
    }
}
