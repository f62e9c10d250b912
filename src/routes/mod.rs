pub mod auth;
pub mod tasks;

use actix_web::web;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(tasks::index)
        .service(tasks::create_task)
        .service(tasks::complete_task)
        .service(tasks::task_stats)
        .service(auth::register_form)
        .service(auth::register)
        .service(auth::login_form)
        .service(auth::login)
        .service(auth::logout);
}
