use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    web, Error, HttpMessage,
};
use futures::future::{ready, LocalBoxFuture, Ready};

use crate::auth::session::SESSION_COOKIE;
use crate::state::AppState;

/// Restores session state on every request.
///
/// A valid `session` cookie puts its `SessionClaims` into the request extensions; a missing,
/// forged or expired one leaves the request anonymous. Nothing is rejected here: protected
/// handlers ask for a `CurrentUser`, which does the redirecting.
pub struct SessionMiddleware;

impl<S, B> Transform<S, ServiceRequest> for SessionMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = SessionMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionMiddlewareService { service }))
    }
}

pub struct SessionMiddlewareService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for SessionMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let token = req.cookie(SESSION_COOKIE).map(|c| c.value().to_owned());

        if let (Some(token), Some(state)) = (token, req.app_data::<web::Data<AppState>>()) {
            match state.sessions.verify_token(&token) {
                Ok(claims) => {
                    req.extensions_mut().insert(claims);
                }
                Err(_) => log::debug!("Ignoring invalid session cookie on {}", req.path()),
            }
        }

        Box::pin(self.service.call(req))
    }
}
