//! HTTP surface: the `/ping` route plus the request-scoped middleware.

use axum::{middleware, routing::get, Router};
use tower_http::trace::{DefaultOnResponse, TraceLayer};

pub mod ping;
pub mod request_id;

/// Build the application router.
///
/// Unknown paths and disallowed methods fall through to axum's default
/// 404 / 405 responses; both still pass through the middleware below.
pub fn router() -> Router {
    // Later layers wrap earlier ones: request IDs are assigned before the
    // trace span is made.
    Router::new()
        .route("/ping", get(ping::ping))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(request_id::make_span)
                .on_response(DefaultOnResponse::new().level(tracing::Level::INFO)),
        )
        .layer(middleware::from_fn(request_id::assign_request_id))
}
