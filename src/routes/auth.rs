use crate::{
    auth::{accounts, CredentialsForm, CurrentUser, INVALID_CREDENTIALS},
    error::{AppError, LOGIN_PATH},
    state::AppState,
    views,
};
use actix_web::{get, http::header, post, web, HttpResponse, Responder};

fn html(page: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(page)
}

/// Render the registration form.
#[get("/register")]
pub async fn register_form() -> impl Responder {
    html(views::register_page())
}

/// Register a new user
///
/// Creates the account and signs the new user in straight away.
///
/// ## Responses:
/// - `302 Found` to `/` with a fresh session cookie.
/// - `400 Bad Request` (plain text) if the username is taken or a form field is missing.
#[post("/register")]
pub async fn register(
    state: web::Data<AppState>,
    form: web::Form<CredentialsForm>,
) -> Result<impl Responder, AppError> {
    let user = accounts::register(&state.db, &form.username, &form.password, state.bcrypt_cost)
        .await?;
    let cookie = state.sessions.login_cookie(user.id)?;

    Ok(HttpResponse::Found()
        .insert_header((header::LOCATION, "/"))
        .cookie(cookie)
        .finish())
}

/// Render the login form.
#[get("/login")]
pub async fn login_form() -> impl Responder {
    html(views::login_page(None))
}

/// Login user
///
/// ## Responses:
/// - `302 Found` to `/` with a session cookie on success.
/// - `200 OK` with the login form and an error message on bad credentials.
#[post("/login")]
pub async fn login(
    state: web::Data<AppState>,
    form: web::Form<CredentialsForm>,
) -> Result<HttpResponse, AppError> {
    match accounts::login(&state.db, &form.username, &form.password, state.bcrypt_cost).await {
        Ok(user) => {
            log::info!("User {} logged in", user.id);
            let cookie = state.sessions.login_cookie(user.id)?;
            Ok(HttpResponse::Found()
                .insert_header((header::LOCATION, "/"))
                .cookie(cookie)
                .finish())
        }
        Err(AppError::InvalidCredentials) => {
            log::info!("Failed login for {:?}", form.username);
            Ok(html(views::login_page(Some(INVALID_CREDENTIALS))))
        }
        Err(e) => Err(e),
    }
}

/// Logout user
///
/// Clears the session cookie and sends the browser to the login page.
#[post("/logout")]
pub async fn logout(state: web::Data<AppState>, user: CurrentUser) -> impl Responder {
    log::info!("User {} logged out", user.0.id);
    HttpResponse::Found()
        .insert_header((header::LOCATION, LOGIN_PATH))
        .cookie(state.sessions.logout_cookie())
        .finish()
}
