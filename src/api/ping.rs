//! Liveness endpoint.

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

/// Body of every `GET /ping` response.
///
/// Both fields are literals, so the key set is fixed at compile time.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Liveness {
    pub status: &'static str,
    pub agent: &'static str,
}

impl Liveness {
    pub const ALIVE: Self = Self {
        status: "alive",
        agent: "agentnet",
    };
}

/// `GET /ping` — always returns 200 OK with `{"status": "alive", "agent": "agentnet"}`.
///
/// Reads nothing from the request (query strings included) and touches no
/// state, so it is safe to hit from any number of monitors at once.
pub async fn ping() -> impl IntoResponse {
    (StatusCode::OK, Json(Liveness::ALIVE))
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
        Router,
    };
    use serde_json::json;
    use tower::ServiceExt; // oneshot

    use super::*;

    // -----------------------------------------------------------------------
    // Test helpers
    // -----------------------------------------------------------------------

    fn app() -> Router {
        crate::api::router()
    }

    fn request(method: Method, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    async fn body_json(body: Body) -> serde_json::Value {
        let bytes = to_bytes(body, usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    // -----------------------------------------------------------------------
    // Payload
    // -----------------------------------------------------------------------

    #[test]
    fn payload_serializes_to_exactly_two_keys() {
        let value = serde_json::to_value(Liveness::ALIVE).unwrap();
        assert_eq!(value, json!({ "status": "alive", "agent": "agentnet" }));
        assert_eq!(value.as_object().unwrap().len(), 2);
    }

    // -----------------------------------------------------------------------
    // GET /ping
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn ping_returns_200_with_liveness_body() {
        let resp = app().oneshot(request(Method::GET, "/ping")).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp.into_body()).await;
        assert_eq!(json, json!({ "status": "alive", "agent": "agentnet" }));
    }

    #[tokio::test]
    async fn ping_sets_json_content_type() {
        let resp = app().oneshot(request(Method::GET, "/ping")).await.unwrap();

        let content_type = resp
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        assert_eq!(content_type, "application/json");
    }

    #[tokio::test]
    async fn ping_ignores_query_string() {
        let plain = app().oneshot(request(Method::GET, "/ping")).await.unwrap();
        let with_query = app()
            .oneshot(request(Method::GET, "/ping?x=1"))
            .await
            .unwrap();

        assert_eq!(with_query.status(), plain.status());
        assert_eq!(
            body_json(with_query.into_body()).await,
            body_json(plain.into_body()).await
        );
    }

    #[tokio::test]
    async fn repeated_requests_return_identical_responses() {
        let app = app();
        for _ in 0..5 {
            let resp = app
                .clone()
                .oneshot(request(Method::GET, "/ping"))
                .await
                .unwrap();
            assert_eq!(resp.status(), StatusCode::OK);
            assert_eq!(
                body_json(resp.into_body()).await,
                json!({ "status": "alive", "agent": "agentnet" })
            );
        }
    }

    #[tokio::test]
    async fn concurrent_requests_return_identical_responses() {
        let app = app();
        let responses = futures_util::future::join_all(
            (0..32).map(|_| app.clone().oneshot(request(Method::GET, "/ping"))),
        )
        .await;

        for resp in responses {
            let resp = resp.unwrap();
            assert_eq!(resp.status(), StatusCode::OK);
            assert_eq!(
                body_json(resp.into_body()).await,
                json!({ "status": "alive", "agent": "agentnet" })
            );
        }
    }

    #[tokio::test]
    async fn head_ping_returns_200_without_body() {
        let resp = app().oneshot(request(Method::HEAD, "/ping")).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        assert!(bytes.is_empty());
    }

    // -----------------------------------------------------------------------
    // Framework defaults
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn post_ping_is_method_not_allowed() {
        let resp = app().oneshot(request(Method::POST, "/ping")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn unknown_path_is_not_found() {
        let resp = app()
            .oneshot(request(Method::GET, "/healthz"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
