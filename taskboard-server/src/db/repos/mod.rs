//! Repository layer
//!
//! One repository per table, borrowing the pool:
//! - `ListRepo` - board columns
//! - `CardRepo` - tasks within columns
//!
//! Bulk updates run inside a transaction; an unknown id aborts the whole
//! batch.

pub mod cards;
pub mod lists;

pub use cards::{Card, CardRepo, CardUpdate};
pub use lists::{DbError, List, ListRepo, ListUpdate};
