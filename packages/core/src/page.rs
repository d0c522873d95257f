//! Limit/offset pagination envelope.

use serde::{Deserialize, Serialize};

/// One page of a server-side list.
///
/// `count` is the total number of matching items, stable across pages of
/// the same filtered and sorted query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub count: u64,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> PaginatedResponse<T> {
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

impl<T> Default for PaginatedResponse<T> {
    fn default() -> Self {
        Self {
            count: 0,
            next: None,
            previous: None,
            results: Vec::new(),
        }
    }
}
