use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use std::io;

use weektasks::auth::SessionMiddleware;
use weektasks::config::Config;
use weektasks::routes;
use weektasks::AppState;

fn to_io_error(e: weektasks::AppError) -> io::Error {
    io::Error::new(io::ErrorKind::Other, e.to_string())
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env().map_err(to_io_error)?;
    let state = AppState::from_config(&config).await.map_err(to_io_error)?;
    let data = web::Data::new(state);

    log::info!("Starting task tracker at {}", config.server_url());
    HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .wrap(SessionMiddleware)
            .wrap(Logger::default())
            .configure(routes::config)
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .run()
    .await
}
