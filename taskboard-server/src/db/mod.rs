//! Database layer - connection pool, schema bootstrap, and repositories
//!
//! ## Design Principles
//!
//! - **No ORM** - Direct SQL via sqlx for clarity and control
//! - **Parameterized queries** - All user input bound, never interpolated
//! - **Rely on DB constraints** - NOT NULL and foreign keys reject malformed
//!   rows; no check-then-insert
//! - **Positions are data** - Ordering lives in a `position` column, computed
//!   from the stored maximum at insert time

pub mod migrations;
pub mod pool;
pub mod repos;

pub use pool::{create_memory_pool, create_pool};
pub use repos::*;
