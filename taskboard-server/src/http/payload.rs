//! Request payload helpers

use serde::Deserialize;

/// A value that may arrive as one item or as an array of items.
///
/// The bulk update endpoints accept `{"lists": {...}}` and
/// `{"lists": [{...}, ...]}` interchangeably; handlers normalize with
/// [`into_vec`](OneOrMany::into_vec) and always respond with an array.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    /// Normalize to a vector, preserving input order.
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::One(item) => vec![item],
            Self::Many(items) => items,
        }
    }
}
