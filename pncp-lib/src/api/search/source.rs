//! Page source abstraction.

use async_trait::async_trait;

use super::SearchPage;
use super::SearchQuery;
use crate::error::Error;

/// Anything that can serve a numbered page of search results.
///
/// [`PncpClient`](crate::PncpClient) implements this over HTTP. Tests and
/// offline tools can implement it over canned data.
///
/// # Example
///
/// ```
/// use async_trait::async_trait;
/// use pncp_lib::api::{PageSource, SearchPage, SearchQuery};
/// use pncp_lib::error::Error;
///
/// struct Empty;
///
/// #[async_trait]
/// impl PageSource for Empty {
///     async fn fetch_page(&self, _query: &SearchQuery, _page: u32) -> Result<SearchPage, Error> {
///         Ok(SearchPage::new(Vec::new(), 0))
///     }
/// }
/// ```
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetches one page. Page numbers start at 1.
    async fn fetch_page(&self, query: &SearchQuery, page: u32) -> Result<SearchPage, Error>;
}
