#![doc = "The `weektasks` library crate."]
#![doc = ""]
#![doc = "A personal task tracker: accounts with session login, tasks that can be created and"]
#![doc = "completed, and weekly completion statistics. The binary (`main.rs`) wires the"]
#![doc = "configuration, the `AppState` and `routes::config` into an actix-web server."]

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod state;
pub mod tasks;
pub mod views;

pub use crate::error::AppError;
pub use crate::state::AppState;
