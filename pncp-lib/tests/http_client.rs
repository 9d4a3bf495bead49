//! End-to-end tests of `PncpClient` against a local HTTP server.

use std::collections::HashMap;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::Request;
use hyper::Response;
use hyper::StatusCode;
use hyper_util::rt::TokioIo;
use pncp_lib::api::SearchQuery;
use pncp_lib::error::{ApiError, Error};
use pncp_lib::PncpClient;
use serde_json::json;
use tokio::net::TcpListener;

type Params = HashMap<String, String>;
type Handler = Arc<dyn Fn(&Params) -> (StatusCode, String) + Send + Sync>;

/// A search endpoint on localhost that answers with `handler` and records the
/// query parameters of every request.
struct MockServer {
    url: String,
    requests: Arc<Mutex<Vec<Params>>>,
}

impl MockServer {
    async fn start(handler: Handler) -> Self {
        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
            .await
            .unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let recorded = requests.clone();

        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let handler = handler.clone();
                let recorded = recorded.clone();

                tokio::spawn(async move {
                    let service = service_fn(move |req: Request<Incoming>| {
                        let params: Params =
                            url::form_urlencoded::parse(req.uri().query().unwrap_or_default().as_bytes())
                                .into_owned()
                                .collect();
                        let (status, body) = handler(&params);
                        recorded.lock().unwrap().push(params);

                        async move {
                            Ok::<_, Infallible>(
                                Response::builder()
                                    .status(status)
                                    .header("Content-Type", "application/json")
                                    .body(Full::new(Bytes::from(body)))
                                    .unwrap(),
                            )
                        }
                    });

                    let _ = http1::Builder::new()
                        .serve_connection(TokioIo::new(stream), service)
                        .await;
                });
            }
        });

        Self {
            url: format!("http://{}/api/search/", addr),
            requests,
        }
    }

    fn pages_requested(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|p| p.get("pagina").cloned().unwrap_or_default())
            .collect()
    }

    fn client(&self) -> PncpClient {
        PncpClient::builder()
            .base_url(&self.url)
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap()
    }
}

/// Serves `total` numbered items in pages of the requested size.
fn paged(total: usize) -> Handler {
    Arc::new(move |params: &Params| {
        let page: usize = params["pagina"].parse().unwrap();
        let size: usize = params["tam_pagina"].parse().unwrap();
        let start = (page - 1) * size;
        let end = (start + size).min(total);

        let items: Vec<_> = (start.min(end)..end)
            .map(|n| json!({ "id": n, "orgao_nome": format!("Órgão {}", n), "valor_global": 1000.0 }))
            .collect();
        let body = json!({ "total": total, "items": items });

        (StatusCode::OK, body.to_string())
    })
}

#[tokio::test]
async fn test_fetch_all_over_http() {
    let server = MockServer::start(paged(250)).await;

    let outcome = server.client().fetch_all().await.unwrap();

    assert!(outcome.is_complete());
    assert_eq!(outcome.records().len(), 250);
    assert_eq!(server.pages_requested(), ["1", "2", "3"]);

    let ids: Vec<_> = outcome
        .records()
        .iter()
        .map(|r| r.get_i64("id").unwrap().unwrap())
        .collect();
    assert_eq!(ids, (0..250).collect::<Vec<i64>>());
}

#[tokio::test]
async fn test_default_query_parameters_are_sent() {
    let server = MockServer::start(paged(1)).await;

    server.client().fetch_all().await.unwrap();

    let requests = server.requests.lock().unwrap();
    let params = &requests[0];
    assert_eq!(params["q"], "Cidades Inteligentes");
    assert_eq!(params["tipos_documento"], "contrato");
    assert_eq!(params["ordenacao"], "-data");
    assert_eq!(params["pagina"], "1");
    assert_eq!(params["tam_pagina"], "100");
    assert_eq!(params["status"], "todos");
    assert_eq!(params["tipos_contrato"], "3|12|2|4|6|7|8|5|11|1");
}

#[tokio::test]
async fn test_custom_query_page_size() {
    let server = MockServer::start(paged(45)).await;
    let query = SearchQuery::new("semáforos").page_size(20);

    let outcome = server.client().fetch_all_with(&query).await.unwrap();

    assert!(outcome.is_complete());
    assert_eq!(server.pages_requested(), ["1", "2", "3"]);
    assert_eq!(server.requests.lock().unwrap()[0]["q"], "semáforos");
}

#[tokio::test]
async fn test_http_error_status_is_fatal() {
    let server = MockServer::start(Arc::new(|_: &Params| {
        (StatusCode::SERVICE_UNAVAILABLE, "manutenção".to_string())
    }))
    .await;

    let result = server.client().fetch_all().await;

    match result {
        Err(Error::Api(ApiError::Http { status, message })) => {
            assert_eq!(status, 503);
            assert_eq!(message, "manutenção");
        }
        other => panic!("expected an HTTP error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_body_is_a_parse_error() {
    let server = MockServer::start(Arc::new(|_: &Params| {
        (StatusCode::OK, r#"{"resultado": []}"#.to_string())
    }))
    .await;

    let result = server.client().fetch_all().await;

    match result {
        Err(Error::Api(err @ ApiError::Parse { .. })) => {
            assert_eq!(err.body(), Some(r#"{"resultado": []}"#));
        }
        other => panic!("expected a parse error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_single_page_search() {
    let server = MockServer::start(paged(250)).await;

    let page = server
        .client()
        .search_page(&SearchQuery::default(), 3)
        .await
        .unwrap();

    assert_eq!(page.total(), 250);
    assert_eq!(page.len(), 50);
    assert_eq!(server.pages_requested(), ["3"]);
}
