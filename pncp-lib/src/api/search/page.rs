//! Page type for paginated search results.

use serde::Deserialize;
use serde::Serialize;

use crate::model::Record;

/// One page of search results.
///
/// `total` is the number of matching records across all pages as reported by
/// the server, not the size of this page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchPage {
    total: u64,
    items: Vec<Record>,
}

impl SearchPage {
    /// Creates a page from its items and the server-reported total.
    pub fn new(items: Vec<Record>, total: u64) -> Self {
        Self { total, items }
    }

    /// Returns the server-reported total across all pages.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Returns a reference to the records in this page.
    pub fn items(&self) -> &[Record] {
        &self.items
    }

    /// Consumes the page and returns the records.
    pub fn into_items(self) -> Vec<Record> {
        self.items
    }

    /// Returns `true` if this page has no records.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of records in this page.
    pub fn len(&self) -> usize {
        self.items.len()
    }
}
