//! Outbound response construction.
//!
//! # Responsibilities
//! - Relay an upstream response to the client without buffering
//! - Build minimal plain-text rejections
//!
//! # Design Decisions
//! - The upstream byte stream becomes the client body directly, so a slow
//!   client slows the upstream read and dropping the client drops the
//!   upstream connection
//! - Status is passed through; headers come from the CORS policy only

use axum::{
    body::Body,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::Response,
};

use crate::security::headers::{ALLOW_ANY_ORIGIN, NO_STORE};

/// Plain-text response carrying the open access-control header.
pub fn plain_text(status: StatusCode, message: &str) -> Response {
    let mut response = Response::new(Body::from(message.to_owned()));
    *response.status_mut() = status;

    let headers = response.headers_mut();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static(ALLOW_ANY_ORIGIN),
    );
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static(NO_STORE));
    response
}

/// Stream `upstream` to the client with `headers` in place of its own.
pub fn relay(upstream: reqwest::Response, headers: HeaderMap) -> Response {
    let status = upstream.status();
    let mut response = Response::new(Body::from_stream(upstream.bytes_stream()));
    *response.status_mut() = status;
    *response.headers_mut() = headers;
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_plain_text() {
        let response = plain_text(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed");
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers()[header::CACHE_CONTROL], "no-store");

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"Method not allowed");
    }
}
