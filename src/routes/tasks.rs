use crate::{
    auth::CurrentUser,
    error::AppError,
    models::{CreatedTask, TaskForm},
    state::AppState,
    tasks, views,
};
use actix_web::{get, post, web, HttpResponse, Responder};
use chrono::Utc;

/// Renders the signed-in user's tasks with this week's counts.
#[get("/")]
pub async fn index(
    state: web::Data<AppState>,
    user: CurrentUser,
) -> Result<impl Responder, AppError> {
    let CurrentUser(user) = user;
    let task_list = tasks::list_tasks(&state.db, &user).await?;
    let stats = tasks::weekly_stats(&state.db, &user, Utc::now()).await?;

    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(views::index_page(&user, &task_list, stats)))
}

/// Creates a task from the `title` form field.
///
/// ## Responses:
/// - `200 OK`: JSON `{"id": .., "title": ..}` of the new task.
/// - `400 Bad Request`: if the `title` field is missing.
/// - `302 Found` to `/login` without a session.
#[post("/")]
pub async fn create_task(
    state: web::Data<AppState>,
    user: CurrentUser,
    form: web::Form<TaskForm>,
) -> Result<impl Responder, AppError> {
    log::debug!("Received title: {:?}", form.title);
    let task = tasks::create_task(&state.db, &user.0, &form.title).await?;

    Ok(HttpResponse::Ok().json(CreatedTask::from(&task)))
}

/// Marks a task completed.
///
/// Always `204 No Content` for a signed-in user, including when no task has that id.
/// A non-numeric id fails path extraction, which actix answers with `404`.
#[post("/complete/{task_id}")]
pub async fn complete_task(
    state: web::Data<AppState>,
    user: CurrentUser,
    task_id: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    let task_id = task_id.into_inner();

    match tasks::complete_task(&state.db, &user.0, task_id).await {
        Ok(_) => {}
        Err(AppError::NotFound(msg)) => log::debug!("{}", msg),
        Err(e) => return Err(e),
    }

    Ok(HttpResponse::NoContent().finish())
}

/// This week's completed and ongoing counts as JSON.
#[get("/task-stats")]
pub async fn task_stats(
    state: web::Data<AppState>,
    user: CurrentUser,
) -> Result<impl Responder, AppError> {
    let stats = tasks::weekly_stats(&state.db, &user.0, Utc::now()).await?;
    Ok(HttpResponse::Ok().json(stats))
}
