//! Search query configuration.

use serde::Deserialize;
use serde::Serialize;
use url::Url;

/// Parameters of a PNCP search.
///
/// The defaults reproduce the smart-cities contract search: term
/// `Cidades Inteligentes`, contracts only, newest first, 100 items per page,
/// every status and every contract type.
///
/// Every field has a default, so a partial TOML/JSON table deserializes into
/// a complete query.
///
/// # Example
///
/// ```
/// use pncp_lib::api::SearchQuery;
///
/// let query = SearchQuery::new("iluminação pública")
///     .contract_types(&[1, 2])
///     .page_size(50);
///
/// assert_eq!(query.page_size, 50);
/// assert_eq!(query.sort, "-data");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchQuery {
    /// Free-text search term (`q`).
    pub term: String,
    /// Document-type codes (`tipos_documento`).
    pub document_types: Vec<String>,
    /// Contract-type codes (`tipos_contrato`).
    pub contract_types: Vec<u32>,
    /// Sort directive (`ordenacao`).
    pub sort: String,
    /// Items per page (`tam_pagina`).
    pub page_size: u32,
    /// Status filter (`status`).
    pub status: String,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            term: "Cidades Inteligentes".to_string(),
            document_types: vec!["contrato".to_string()],
            contract_types: vec![3, 12, 2, 4, 6, 7, 8, 5, 11, 1],
            sort: "-data".to_string(),
            page_size: 100,
            status: "todos".to_string(),
        }
    }
}

impl SearchQuery {
    /// Creates a query for the given term with the remaining defaults.
    pub fn new(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            ..Self::default()
        }
    }

    /// Sets the document-type codes.
    pub fn document_types(mut self, types: &[&str]) -> Self {
        self.document_types = types.iter().map(|s| (*s).to_string()).collect();
        self
    }

    /// Sets the contract-type codes.
    pub fn contract_types(mut self, types: &[u32]) -> Self {
        self.contract_types = types.to_vec();
        self
    }

    /// Sets the sort directive.
    pub fn sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = sort.into();
        self
    }

    /// Sets the page size.
    pub fn page_size(mut self, size: u32) -> Self {
        self.page_size = size;
        self
    }

    /// Sets the status filter.
    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    /// Returns the query parameters for the given page, in request order.
    ///
    /// Code sets are pipe-delimited; empty sets are omitted.
    pub fn params(&self, page: u32) -> Vec<(&'static str, String)> {
        let mut params = vec![("q", self.term.clone())];

        if !self.document_types.is_empty() {
            params.push(("tipos_documento", self.document_types.join("|")));
        }

        params.push(("ordenacao", self.sort.clone()));
        params.push(("pagina", page.to_string()));
        params.push(("tam_pagina", self.page_size.to_string()));
        params.push(("status", self.status.clone()));

        if !self.contract_types.is_empty() {
            let codes: Vec<_> = self.contract_types.iter().map(|c| c.to_string()).collect();
            params.push(("tipos_contrato", codes.join("|")));
        }

        params
    }

    /// Builds the request URL for the given page.
    pub(crate) fn build_url(&self, base_url: &Url, page: u32) -> Url {
        let mut url = base_url.clone();
        url.query_pairs_mut().extend_pairs(self.params(page));
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_query_url() {
        let base = Url::parse("https://pncp.gov.br/api/search/").unwrap();
        let url = SearchQuery::default().build_url(&base, 2);

        assert_eq!(
            url.as_str(),
            "https://pncp.gov.br/api/search/?q=Cidades+Inteligentes&tipos_documento=contrato\
             &ordenacao=-data&pagina=2&tam_pagina=100&status=todos\
             &tipos_contrato=3%7C12%7C2%7C4%7C6%7C7%7C8%7C5%7C11%7C1"
        );
    }

    #[test]
    fn test_single_page_parameter() {
        let base = Url::parse("https://pncp.gov.br/api/search/").unwrap();
        let url = SearchQuery::default().build_url(&base, 7);

        let pages: Vec<_> = url.query_pairs().filter(|(k, _)| k == "pagina").collect();
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].1, "7");
    }

    #[test]
    fn test_empty_code_sets_are_omitted() {
        let query = SearchQuery::new("drones")
            .document_types(&[])
            .contract_types(&[]);

        let keys: Vec<_> = query.params(1).into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["q", "ordenacao", "pagina", "tam_pagina", "status"]);
    }

    #[test]
    fn test_multiple_document_types_are_pipe_delimited() {
        let query = SearchQuery::default().document_types(&["contrato", "ata"]);
        let params = query.params(1);

        assert!(params.contains(&("tipos_documento", "contrato|ata".to_string())));
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let query: SearchQuery = serde_json::from_str(r#"{"term": "semáforos", "page_size": 20}"#).unwrap();

        assert_eq!(query.term, "semáforos");
        assert_eq!(query.page_size, 20);
        assert_eq!(query.status, "todos");
        assert_eq!(query.contract_types, SearchQuery::default().contract_types);
    }
}
