//! Shared helpers for the integration tests: an app over a fresh in-memory database, and
//! shortcuts for registering users and carrying their session cookie around.
#![allow(dead_code)]

use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::cookie::Cookie;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::{header, StatusCode};
use actix_web::{test, web, App, Error};
use weektasks::auth::{SessionMiddleware, SESSION_COOKIE};
use weektasks::{routes, AppState};

/// Lowest cost bcrypt accepts; keeps the tests fast.
pub const TEST_BCRYPT_COST: u32 = 4;

pub async fn spawn_app() -> (
    web::Data<AppState>,
    impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = Error>,
) {
    let state = AppState::in_memory(TEST_BCRYPT_COST)
        .await
        .expect("Failed to create in-memory state");
    let data = web::Data::new(state);

    let app = test::init_service(
        App::new()
            .app_data(data.clone())
            .wrap(SessionMiddleware)
            .configure(routes::config),
    )
    .await;

    (data, app)
}

/// The session cookie set by `resp`, if any.
pub fn session_cookie<B>(resp: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    resp.response()
        .cookies()
        .find(|c| c.name() == SESSION_COOKIE)
        .map(|c| c.into_owned())
}

pub fn location<B>(resp: &ServiceResponse<B>) -> Option<String> {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
}

/// Registers `username` through the form endpoint and returns the session it was given.
pub async fn register<S, B>(app: &S, username: &str, password: &str) -> Cookie<'static>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
    B: MessageBody,
{
    let req = test::TestRequest::post()
        .uri("/register")
        .set_form([("username", username), ("password", password)])
        .to_request();
    let resp = test::call_service(app, req).await;

    assert_eq!(resp.status(), StatusCode::FOUND, "registration of {} failed", username);
    assert_eq!(location(&resp).as_deref(), Some("/"));
    session_cookie(&resp).expect("registration should set a session cookie")
}

/// Creates a task as the owner of `session` and returns the JSON response.
pub async fn create_task<S, B>(
    app: &S,
    session: &Cookie<'static>,
    title: &str,
) -> serde_json::Value
where
    S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
    B: MessageBody,
{
    let req = test::TestRequest::post()
        .uri("/")
        .cookie(session.clone())
        .set_form([("title", title)])
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), StatusCode::OK, "creating {:?} failed", title);
    test::read_body_json(resp).await
}
