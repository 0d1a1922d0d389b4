//! taskboard-server: HTTP backend for a kanban-style task board
//!
//! Exposes lists and cards over HTTP with position-based ordering and
//! transactional bulk reordering, backed by SQLite.

pub mod db;
pub mod http;

pub use db::repos::DbError;
pub use http::{build_router, run_server, ApiError, AppState, ServerConfig};
