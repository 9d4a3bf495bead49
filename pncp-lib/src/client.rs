//! Main PncpClient

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::ACCEPT;
use url::Url;

use crate::api::FetchOutcome;
use crate::api::PageSource;
use crate::api::SearchPage;
use crate::api::SearchQuery;
use crate::api::fetch_all;
use crate::error::ApiError;
use crate::error::Error;

/// Public PNCP search endpoint.
pub const DEFAULT_BASE_URL: &str = "https://pncp.gov.br/api/search/";

/// Default ceiling on pages requested by a single full fetch.
pub const DEFAULT_MAX_PAGES: u32 = 1000;

/// The client for the PNCP search API.
///
/// This client is cheap to clone (uses `Arc` internally) and can be shared
/// across threads safely. Each full fetch is independent: nothing is cached
/// between calls.
///
/// # Example
///
/// ```ignore
/// use pncp_lib::PncpClient;
///
/// let client = PncpClient::builder()
///     .timeout(Duration::from_secs(30))
///     .build()?;
///
/// let outcome = client.fetch_all().await?;
/// println!("{}", outcome.report());
/// ```
#[derive(Clone)]
pub struct PncpClient {
    inner: Arc<PncpClientInner>,
}

struct PncpClientInner {
    base_url: Url,
    query: SearchQuery,
    http_client: Client,
    timeout: Option<Duration>,
    max_pages: u32,
}

impl PncpClient {
    /// Creates a new builder for constructing a client.
    pub fn builder() -> PncpClientBuilder {
        PncpClientBuilder::new()
    }

    /// Returns the search endpoint URL.
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Returns the configured query.
    pub fn query(&self) -> &SearchQuery {
        &self.inner.query
    }

    /// Returns the page ceiling for full fetches.
    pub fn max_pages(&self) -> u32 {
        self.inner.max_pages
    }

    /// Fetches every page of the configured query.
    pub async fn fetch_all(&self) -> Result<FetchOutcome, Error> {
        fetch_all(self, &self.inner.query, self.inner.max_pages).await
    }

    /// Fetches every page of an ad-hoc query.
    pub async fn fetch_all_with(&self, query: &SearchQuery) -> Result<FetchOutcome, Error> {
        fetch_all(self, query, self.inner.max_pages).await
    }

    /// Requests a single page.
    ///
    /// Non-success statuses become [`ApiError::Http`] carrying the body. A body
    /// that is not a search response becomes [`ApiError::Parse`] carrying the
    /// raw text.
    pub async fn search_page(&self, query: &SearchQuery, page: u32) -> Result<SearchPage, Error> {
        let url = query.build_url(&self.inner.base_url, page);
        log::debug!("GET {}", url);

        let mut request = self
            .inner
            .http_client
            .get(url)
            .header(ACCEPT, "application/json");

        if let Some(timeout) = self.inner.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await.map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::http(status.as_u16(), body).into());
        }

        let body = response.text().await.map_err(|e| self.transport_error(e))?;

        serde_json::from_str(&body).map_err(|e| {
            ApiError::parse_with_body(format!("Invalid search response for page {}: {}", page, e), body)
                .into()
        })
    }

    fn transport_error(&self, error: reqwest::Error) -> Error {
        match self.inner.timeout {
            Some(timeout) if error.is_timeout() => ApiError::Timeout(timeout).into(),
            _ => ApiError::Network(error).into(),
        }
    }
}

#[async_trait]
impl PageSource for PncpClient {
    async fn fetch_page(&self, query: &SearchQuery, page: u32) -> Result<SearchPage, Error> {
        self.search_page(query, page).await
    }
}

// =============================================================================
// Builder
// =============================================================================

/// Builder for constructing a [`PncpClient`].
///
/// Every setting has a default: the public endpoint, the default
/// [`SearchQuery`], no request timeout and [`DEFAULT_MAX_PAGES`].
///
/// # Example
///
/// ```ignore
/// let client = PncpClient::builder()
///     .base_url("https://pncp.gov.br/api/search/")
///     .query(SearchQuery::new("semáforos inteligentes"))
///     .timeout(Duration::from_secs(30))
///     .max_pages(50)
///     .build()?;
/// ```
pub struct PncpClientBuilder {
    base_url: String,
    query: SearchQuery,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    http_client: Option<Client>,
    max_pages: u32,
}

impl PncpClientBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            query: SearchQuery::default(),
            timeout: None,
            connect_timeout: None,
            http_client: None,
            max_pages: DEFAULT_MAX_PAGES,
        }
    }

    /// Sets the search endpoint URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the query used by [`PncpClient::fetch_all`].
    pub fn query(mut self, query: SearchQuery) -> Self {
        self.query = query;
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the connection timeout.
    ///
    /// This is applied when building the HTTP client, so it is ignored when a
    /// custom client is supplied.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets a custom HTTP client.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Sets the page ceiling for full fetches. Values below 1 are raised to 1.
    pub fn max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = max_pages.max(1);
        self
    }

    /// Builds the [`PncpClient`].
    ///
    /// Fails if the base URL does not parse or the HTTP client cannot be
    /// constructed.
    pub fn build(self) -> Result<PncpClient, Error> {
        let base_url = Url::parse(&self.base_url)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", self.base_url, e)))?;

        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(self.base_url).into());
        }

        let http_client = match self.http_client {
            Some(client) => client,
            None => {
                let mut builder =
                    Client::builder().user_agent(concat!("pncp-lib/", env!("CARGO_PKG_VERSION")));
                if let Some(timeout) = self.connect_timeout {
                    builder = builder.connect_timeout(timeout);
                }
                builder.build().map_err(ApiError::from)?
            }
        };

        Ok(PncpClient {
            inner: Arc::new(PncpClientInner {
                base_url,
                query: self.query,
                http_client,
                timeout: self.timeout,
                max_pages: self.max_pages,
            }),
        })
    }
}

impl Default for PncpClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
