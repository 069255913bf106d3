//! Per-request spans.

use axum::http::Request;
use tracing::Span;
use uuid::Uuid;

/// Span for one inbound request, tagged with a fresh request ID.
pub fn make_request_span<B>(request: &Request<B>) -> Span {
    let request_id = Uuid::new_v4();
    tracing::info_span!(
        "request",
        request_id = %request_id,
        method = %request.method(),
        path = %request.uri().path(),
    )
}
