//! Persistence layer: SQLite schema and the `Database` handle.
//!
//! - `schema.rs`: DDL executed at start-up
//! - `sqlite.rs`: connection setup and every query the application runs

pub mod schema;
pub mod sqlite;

pub use schema::SQLITE_INIT;
pub use sqlite::Database;
