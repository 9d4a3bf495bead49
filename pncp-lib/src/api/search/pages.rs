//! Sequential page cursor.

use super::PageSource;
use super::SearchPage;
use super::SearchQuery;
use crate::error::Error;

/// Walks pages 1, 2, 3, ... of a query, one request per call.
///
/// Stops yielding once `max_pages` pages have been requested or a request
/// has failed.
pub(crate) struct SearchPages<'a, S: ?Sized> {
    source: &'a S,
    query: &'a SearchQuery,
    /// The page number the next call will request.
    next_page: u32,
    max_pages: u32,
    done: bool,
}

impl<'a, S: PageSource + ?Sized> SearchPages<'a, S> {
    pub(crate) fn new(source: &'a S, query: &'a SearchQuery, max_pages: u32) -> Self {
        Self {
            source,
            query,
            next_page: 1,
            max_pages,
            done: false,
        }
    }

    /// Fetches the next page of results.
    ///
    /// Returns `None` when the ceiling is reached or after an error.
    pub(crate) async fn next(&mut self) -> Option<Result<SearchPage, Error>> {
        if self.done || self.next_page > self.max_pages {
            self.done = true;
            return None;
        }

        let page = self.next_page;
        self.next_page += 1;

        log::debug!("Requesting search page {}", page);

        match self.source.fetch_page(self.query, page).await {
            Ok(result) => {
                log::debug!(
                    "Page {} returned {} items (server total {})",
                    page,
                    result.len(),
                    result.total()
                );
                Some(Ok(result))
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }

    /// Returns the last page number requested, or 0 if none was.
    pub(crate) fn last_page(&self) -> u32 {
        self.next_page - 1
    }
}
