//! Lookup Module Tests
//!
//! ## Test Scopes
//! - **Wire types**: Decoding the service's JSON into `Fact` and `SearchPage`.
//! - **Errors**: Display strings and transient classification of `LookupError`.
//! - **HTTP client**: URL building and full request/response handling against a
//!   local axum stub of the lookup service.

#[cfg(test)]
mod tests {
    use crate::config::LookupConfig;
    use crate::lookup::client::{normalize_base_url, HttpLookup, LookupService};
    use crate::lookup::types::{Fact, LookupError, SearchPage};
    use axum::extract::Query;
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::{Json, Router};
    use std::collections::HashMap;
    use std::time::Duration;

    // ============================================================
    // WIRE TYPES
    // ============================================================

    #[test]
    fn test_fact_decodes_full_payload() {
        let json = r#"{
            "categories": ["dev"],
            "created_at": "2020-01-05 13:42:19.104863",
            "icon_url": "https://assets.chucknorris.host/img/avatar/chuck-norris.png",
            "id": "elgv2wkvt8ioag6xywykbq",
            "updated_at": "2020-01-05 13:42:19.104863",
            "url": "https://api.chucknorris.io/jokes/elgv2wkvt8ioag6xywykbq",
            "value": "Chuck Norris's keyboard has no Ctrl key."
        }"#;

        let fact: Fact = serde_json::from_str(json).unwrap();

        assert_eq!(fact.id, "elgv2wkvt8ioag6xywykbq");
        assert_eq!(fact.categories, vec!["dev".to_string()]);
        assert!(fact.url.is_some());
    }

    #[test]
    fn test_fact_decodes_minimal_payload() {
        let fact: Fact = serde_json::from_str(r#"{"id": "1", "value": "short"}"#).unwrap();

        assert_eq!(fact, Fact::new("1", "short"));
    }

    #[test]
    fn test_search_page_reads_result_field() {
        let json = r#"{"total": 2, "result": [{"id": "a", "value": "x"}, {"id": "b", "value": "y"}]}"#;

        let page: SearchPage = serde_json::from_str(json).unwrap();

        assert_eq!(page.total, 2);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[1].id, "b");
    }

    #[test]
    fn test_search_page_missing_result_is_empty() {
        let page: SearchPage = serde_json::from_str(r#"{"total": 0}"#).unwrap();

        assert!(page.items.is_empty());
    }

    // ============================================================
    // ERRORS
    // ============================================================

    #[test]
    fn test_transport_error_displays_bare_message() {
        let err = LookupError::Transport("timeout".to_string());

        assert_eq!(err.to_string(), "timeout");
        assert!(err.is_transient());
    }

    #[test]
    fn test_service_error_classification() {
        let server = LookupError::Service {
            status: 503,
            message: "unavailable".to_string(),
        };
        let client = LookupError::Service {
            status: 400,
            message: "size must be between 3 and 120".to_string(),
        };

        assert!(server.is_transient());
        assert!(!client.is_transient());
        assert!(client.to_string().contains("400"));
        assert!(!LookupError::Decode("bad".to_string()).is_transient());
    }

    // ============================================================
    // HTTP CLIENT - URLs
    // ============================================================

    #[test]
    fn test_normalize_base_url() {
        assert_eq!(normalize_base_url("https://api.chucknorris.io/"), "https://api.chucknorris.io");
        assert_eq!(normalize_base_url("  http://localhost:9000//  "), "http://localhost:9000");
        assert_eq!(normalize_base_url("api.chucknorris.io"), "https://api.chucknorris.io");
    }

    #[test]
    fn test_search_url_encodes_query_verbatim() {
        let lookup = HttpLookup::new(&LookupConfig::default()).unwrap();

        assert_eq!(lookup.random_url(), "https://api.chucknorris.io/jokes/random");
        assert_eq!(
            lookup.search_url("Cat & Dog"),
            "https://api.chucknorris.io/jokes/search?query=Cat%20%26%20Dog"
        );
    }

    // ============================================================
    // HTTP CLIENT - against a local stub
    // ============================================================

    async fn spawn_stub() -> String {
        async fn search(
            Query(params): Query<HashMap<String, String>>,
        ) -> (StatusCode, Json<serde_json::Value>) {
            let query = params.get("query").cloned().unwrap_or_default();
            match query.as_str() {
                "boom" => (
                    StatusCode::BAD_REQUEST,
                    Json(serde_json::json!({"status": 400, "message": "search.query: size must be between 3 and 120"})),
                ),
                "slow" => {
                    tokio::time::sleep(Duration::from_secs(2)).await;
                    (StatusCode::OK, Json(serde_json::json!({"total": 0, "result": []})))
                }
                "garbage" => (StatusCode::OK, Json(serde_json::json!({"result": "nope"}))),
                _ => (
                    StatusCode::OK,
                    Json(serde_json::json!({
                        "total": 1,
                        "result": [{"id": "q1", "value": format!("about {}", query)}]
                    })),
                ),
            }
        }

        async fn random() -> Json<serde_json::Value> {
            Json(serde_json::json!({"id": "r1", "value": "random"}))
        }

        let app = Router::new()
            .route("/jokes/search", get(search))
            .route("/jokes/random", get(random));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        format!("http://{}", addr)
    }

    fn client_for(base_url: String, timeout: Duration) -> HttpLookup {
        HttpLookup::new(&LookupConfig { base_url, timeout }).unwrap()
    }

    #[tokio::test]
    async fn test_http_search_success() {
        let base = spawn_stub().await;
        let lookup = client_for(base, Duration::from_secs(5));

        let page = lookup.search("cat facts").await.unwrap();

        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].value, "about cat facts");
    }

    #[tokio::test]
    async fn test_http_random_fact() {
        let base = spawn_stub().await;
        let lookup = client_for(base, Duration::from_secs(5));

        let fact = lookup.fetch_random().await.unwrap();

        assert_eq!(fact.id, "r1");
    }

    #[tokio::test]
    async fn test_http_error_status_carries_service_message() {
        let base = spawn_stub().await;
        let lookup = client_for(base, Duration::from_secs(5));

        let err = lookup.search("boom").await.unwrap_err();

        assert_eq!(
            err,
            LookupError::Service {
                status: 400,
                message: "search.query: size must be between 3 and 120".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_http_malformed_body_is_decode_error() {
        let base = spawn_stub().await;
        let lookup = client_for(base, Duration::from_secs(5));

        let err = lookup.search("garbage").await.unwrap_err();

        assert!(matches!(err, LookupError::Decode(_)));
    }

    #[tokio::test]
    async fn test_http_timeout_is_transport_error() {
        let base = spawn_stub().await;
        let lookup = client_for(base, Duration::from_millis(100));

        let err = lookup.search("slow").await.unwrap_err();

        assert_eq!(err, LookupError::Transport("timeout".to_string()));
    }

    #[tokio::test]
    async fn test_http_timeout_during_body_is_transport_error() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        // Headers and part of the body arrive, then the server stalls
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = [0u8; 1024];
            let _ = socket.read(&mut request).await;
            socket
                .write_all(
                    b"HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: 100\r\n\r\n{\"total\":",
                )
                .await
                .unwrap();
            socket.flush().await.unwrap();
            tokio::time::sleep(Duration::from_secs(3)).await;
        });

        let lookup = client_for(format!("http://{}", addr), Duration::from_millis(300));

        let err = lookup.search("cats").await.unwrap_err();

        assert_eq!(err, LookupError::Transport("timeout".to_string()));
        assert_eq!(err.to_string(), "timeout");
        assert!(err.is_transient());
    }

    #[tokio::test]
    async fn test_http_unreachable_is_transport_error() {
        // Port 9 (discard) on localhost is not expected to accept connections
        let lookup = client_for("http://127.0.0.1:9".to_string(), Duration::from_secs(2));

        let err = lookup.search("cats").await.unwrap_err();

        assert!(matches!(err, LookupError::Transport(_)));
    }
}
