//! `SQLite` adapters for task record persistence.

mod models;
mod repository;
mod schema;

pub use repository::{SqliteTaskRepository, TaskSqlitePool, connect, ensure_schema};
