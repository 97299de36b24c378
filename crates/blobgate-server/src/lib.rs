//! HTTP endpoint for blobgate.
//!
//! One path, dispatched by method: `POST` stores the JSON body as a record,
//! `GET` returns the record named by a query parameter, anything else is
//! `405`. Gateway outcomes are mapped to status codes in [`response`].

pub mod config;
pub mod endpoint;
pub mod error;
pub mod handler;
pub mod response;
pub mod router;
pub mod server;

pub use config::{BackendConfig, ServerConfig};
pub use endpoint::{endpoints, messages, HealthResponse, SaveAck};
pub use error::{ServerError, ServerResult};
pub use handler::AppState;
pub use response::ApiError;
pub use server::BlobgateServer;

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use axum::Router;
    use blobgate_store::{BlobStore, InMemoryBlobStore, Namespace};
    use tower::util::ServiceExt;

    use super::*;

    const ROUTE: &str = endpoints::RECORDS;

    fn app() -> (Arc<InMemoryBlobStore>, Router) {
        let store = Arc::new(InMemoryBlobStore::new());
        let server = BlobgateServer::with_store(ServerConfig::default(), store.clone()).unwrap();
        (store, server.router())
    }

    async fn send(app: &Router, method: Method, uri: &str, body: &str) -> (StatusCode, String) {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    async fn post(app: &Router, body: &str) -> (StatusCode, String) {
        send(app, Method::POST, ROUTE, body).await
    }

    async fn get(app: &Router, query: &str) -> (StatusCode, String) {
        send(app, Method::GET, &format!("{ROUTE}{query}"), "").await
    }

    #[tokio::test]
    async fn health_endpoint() {
        let (_store, app) = app();
        let (status, body) = send(&app, Method::GET, "/v1/health", "").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("\"status\":\"ok\""));
    }

    #[tokio::test]
    async fn post_saves_order() {
        let (_store, app) = app();
        let (status, body) = post(&app, r#"{"orderId":"A100","total":42}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, r#"{"message":"Order Saved Successfully","id":"A100"}"#);
    }

    #[tokio::test]
    async fn get_returns_exact_document() {
        let (_store, app) = app();
        post(&app, r#"{"orderId":"A100","total":42}"#).await;

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri(format!("{ROUTE}?id=A100"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");

        let (status, body) = get(&app, "?id=A100").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, r#"{"orderId":"A100","total":42}"#);
    }

    #[tokio::test]
    async fn post_without_order_id() {
        let (store, app) = app();
        let (status, body) = post(&app, r#"{"total":7}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "Missing Order ID");
        assert!(store.is_empty().unwrap());
    }

    #[tokio::test]
    async fn post_invalid_json() {
        let (store, app) = app();
        for body in ["", "{not json", "[1,2,3]"] {
            let (status, text) = post(&app, body).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "body {body:?}");
            assert_eq!(text, "Invalid JSON body");
        }
        assert_eq!(store.calls(), 0);
    }

    #[tokio::test]
    async fn get_unknown_order() {
        let (_store, app) = app();
        let (status, body) = get(&app, "?id=ZZZ").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, "Order not found");
    }

    #[tokio::test]
    async fn get_without_id_parameter() {
        let (store, app) = app();
        for query in ["", "?", "?id=", "?orderId=A100"] {
            let (status, body) = get(&app, query).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "query {query:?}");
            assert_eq!(body, "Missing Order ID parameter");
        }
        assert_eq!(store.calls(), 0);
    }

    #[tokio::test]
    async fn other_methods_are_rejected() {
        let (store, app) = app();
        for method in [Method::PUT, Method::DELETE, Method::PATCH] {
            let (status, body) = send(&app, method, ROUTE, r#"{"orderId":"A100"}"#).await;
            assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
            assert_eq!(body, "Method Not Allowed");
        }
        assert_eq!(store.calls(), 0);
    }

    #[tokio::test]
    async fn overwrite_returns_latest() {
        let (_store, app) = app();
        post(&app, r#"{"orderId":"A1","total":1}"#).await;
        post(&app, r#"{"orderId":"A1","total":2,"note":"second"}"#).await;
        let (_, body) = get(&app, "?id=A1").await;
        assert_eq!(body, r#"{"orderId":"A1","total":2,"note":"second"}"#);
    }

    #[tokio::test]
    async fn url_encoded_ids_round_trip() {
        let (store, app) = app();
        post(&app, r#"{"orderId":"A 100/x","total":1}"#).await;
        let (status, _) = get(&app, "?id=A%20100%2Fx").await;
        assert_eq!(status, StatusCode::OK);

        let ns = Namespace::new("orders").unwrap();
        assert!(store.exists(&ns, "A 100/x").await.unwrap());
    }

    #[tokio::test]
    async fn backend_failures_are_opaque() {
        let (store, app) = app();
        store.fail_writes(true);
        let (status, body) = post(&app, r#"{"orderId":"A100"}"#).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, "Server Error: Could not save order.");

        store.fail_reads(true);
        let (status, body) = get(&app, "?id=A100").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, "Server Error: Could not fetch order.");
    }

    #[tokio::test]
    async fn oversized_body_is_refused() {
        let store = Arc::new(InMemoryBlobStore::new());
        let config = ServerConfig {
            max_body_bytes: 16,
            ..ServerConfig::default()
        };
        let app = BlobgateServer::with_store(config, store.clone())
            .unwrap()
            .router();
        let (status, _) = post(&app, r#"{"orderId":"A100","padding":"xxxxxxxxxxxx"}"#).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert!(store.is_empty().unwrap());
    }

    #[tokio::test]
    async fn custom_route_and_fields() {
        let store = Arc::new(InMemoryBlobStore::new());
        let config = ServerConfig::from_toml_str(
            "route = \"/carts\"\nnamespace = \"carts\"\nid_field = \"cartId\"\nid_param = \"cart\"\n",
        )
        .unwrap();
        let app = BlobgateServer::with_store(config, store).unwrap().router();

        let (status, body) = send(&app, Method::POST, "/carts", r#"{"cartId":"c1"}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("\"id\":\"c1\""));
        let (status, body) = send(&app, Method::GET, "/carts?cart=c1", "").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, r#"{"cartId":"c1"}"#);
    }

    #[tokio::test]
    async fn filesystem_backend_long_unknown_id_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let config = ServerConfig {
            backend: BackendConfig::Filesystem {
                root: dir.path().to_path_buf(),
                sync_writes: false,
            },
            ..ServerConfig::default()
        };
        let app = BlobgateServer::new(config).unwrap().router();
        let id = "A".repeat(128);
        let (status, body) = get(&app, &format!("?id={id}")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, "Order not found");
    }

    #[tokio::test]
    async fn filesystem_backend_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let config = ServerConfig {
            backend: BackendConfig::Filesystem {
                root: dir.path().to_path_buf(),
                sync_writes: false,
            },
            ..ServerConfig::default()
        };
        let app = BlobgateServer::new(config.clone()).unwrap().router();
        post(&app, r#"{"orderId":"A100","total":42}"#).await;

        // A fresh server over the same directory sees the record.
        let app = BlobgateServer::new(config).unwrap().router();
        let (status, body) = get(&app, "?id=A100").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, r#"{"orderId":"A100","total":42}"#);
    }
}
