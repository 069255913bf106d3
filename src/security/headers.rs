//! Cross-origin response headers.
//!
//! # Responsibilities
//! - Mirror only allow-listed upstream headers to the client
//! - Guarantee a cache directive on every relayed response
//! - Add the wildcard `Access-Control-Allow-Origin`
//! - Answer CORS preflight requests
//!
//! # Design Decisions
//! - Allow-list, not deny-list: cookies, auth and any header not named here
//!   never reach the browser
//! - The policy is a pure value built at startup and shared read-only

use axum::{
    body::Body,
    http::{header, HeaderMap, HeaderName, HeaderValue, StatusCode},
    response::Response,
};

/// Value of `Access-Control-Allow-Origin` on every response.
pub const ALLOW_ANY_ORIGIN: &str = "*";

/// Cache directive used when nothing else supplied one.
pub const NO_STORE: &str = "no-store";

/// Upstream headers allowed through to the client.
pub const SAFE_RESPONSE_HEADERS: [HeaderName; 8] = [
    header::CONTENT_TYPE,
    header::CACHE_CONTROL,
    header::ACCEPT_RANGES,
    header::CONTENT_LENGTH,
    header::CONTENT_RANGE,
    header::ETAG,
    header::LAST_MODIFIED,
    header::EXPIRES,
];

const PREFLIGHT_METHODS: &str = "GET,HEAD,OPTIONS";
const PREFLIGHT_MAX_AGE_SECS: &str = "86400";

/// Builds outbound headers from upstream response headers.
#[derive(Debug, Clone)]
pub struct CorsPolicy {
    allowed: Vec<HeaderName>,
    default_cache: HeaderValue,
}

impl Default for CorsPolicy {
    fn default() -> Self {
        Self {
            allowed: SAFE_RESPONSE_HEADERS.to_vec(),
            default_cache: HeaderValue::from_static(NO_STORE),
        }
    }
}

impl CorsPolicy {
    /// Filter `upstream` to the allow-list, default the cache directive and
    /// add the open access-control header.
    pub fn apply(&self, upstream: Option<&HeaderMap>) -> HeaderMap {
        let mut headers = HeaderMap::new();

        if let Some(upstream) = upstream {
            for name in &self.allowed {
                for value in upstream.get_all(name) {
                    headers.append(name.clone(), value.clone());
                }
            }
        }

        if !headers.contains_key(header::CACHE_CONTROL) {
            headers.insert(header::CACHE_CONTROL, self.default_cache.clone());
        }
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static(ALLOW_ANY_ORIGIN),
        );
        headers
    }
}

/// Response to an `OPTIONS` preflight request.
pub fn preflight_response() -> Response {
    let mut response = Response::new(Body::empty());
    *response.status_mut() = StatusCode::NO_CONTENT;

    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static(ALLOW_ANY_ORIGIN),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(PREFLIGHT_METHODS),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_MAX_AGE,
        HeaderValue::from_static(PREFLIGHT_MAX_AGE_SECS),
    );
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upstream_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("audio/mpeg"));
        headers.insert(header::CONTENT_LENGTH, HeaderValue::from_static("1024"));
        headers.insert(header::SET_COOKIE, HeaderValue::from_static("session=secret"));
        headers.insert(header::SERVER, HeaderValue::from_static("nginx"));
        headers.insert("x-upstream-debug", HeaderValue::from_static("1"));
        headers
    }

    #[test]
    fn test_only_allow_listed_headers_survive() {
        let policy = CorsPolicy::default();
        let headers = policy.apply(Some(&upstream_headers()));

        for name in headers.keys() {
            assert!(
                SAFE_RESPONSE_HEADERS.contains(name) || *name == header::ACCESS_CONTROL_ALLOW_ORIGIN,
                "leaked header {name}"
            );
        }
        assert_eq!(headers[header::CONTENT_TYPE], "audio/mpeg");
        assert_eq!(headers[header::CONTENT_LENGTH], "1024");
        assert!(!headers.contains_key(header::SET_COOKIE));
    }

    #[test]
    fn test_defaults_cache_directive() {
        let headers = CorsPolicy::default().apply(None);
        assert_eq!(headers[header::CACHE_CONTROL], "no-store");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(headers.len(), 2);
    }

    #[test]
    fn test_keeps_upstream_cache_directive() {
        let mut upstream = HeaderMap::new();
        upstream.insert(header::CACHE_CONTROL, HeaderValue::from_static("max-age=60"));
        let headers = CorsPolicy::default().apply(Some(&upstream));
        assert_eq!(headers[header::CACHE_CONTROL], "max-age=60");
    }

    #[test]
    fn test_upstream_cannot_override_origin() {
        let mut upstream = HeaderMap::new();
        upstream.insert(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("https://evil.example"),
        );
        let headers = CorsPolicy::default().apply(Some(&upstream));
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    }

    #[test]
    fn test_preflight_headers() {
        let response = preflight_response();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        let headers = response.headers();
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], "GET,HEAD,OPTIONS");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_HEADERS], "*");
        assert_eq!(headers[header::ACCESS_CONTROL_MAX_AGE], "86400");
    }
}
