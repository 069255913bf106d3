//! Upstream call for a translated API request.

use axum::{
    http::{header, HeaderMap, HeaderValue},
    response::Response,
};

use crate::backends::Backend;
use crate::error::{GatewayError, GatewayResult};
use crate::http::request::{ForwardedHeaders, QueryParams};
use crate::http::response::relay;
use crate::security::CorsPolicy;
use crate::upstream::{UpstreamClient, UpstreamRequest};

const JSON_UTF8: &str = "application/json; charset=utf-8";

/// Translate `query` for `backend`, call the upstream once and stream the
/// result back with CORS headers.
pub async fn forward(
    backend: &dyn Backend,
    query: &QueryParams,
    forwarded: &ForwardedHeaders,
    client: &UpstreamClient,
    cors: &CorsPolicy,
) -> GatewayResult<Response> {
    let translation = backend.translate(query)?;

    tracing::info!(backend = backend.name(), url = %translation.url, "Forwarding API request");

    let request = UpstreamRequest::get(translation.url.clone(), request_headers(backend, forwarded));
    let upstream = match client.send(request).await {
        Ok(response) => response,
        Err(e) => {
            tracing::error!(backend = backend.name(), url = %translation.url, error = %e, "Upstream error");
            return Err(match backend.failure_message() {
                Some(message) => GatewayError::UpstreamDiagnostic {
                    message: message.to_string(),
                    error: e.to_string(),
                    url: translation.url.to_string(),
                },
                None => GatewayError::Upstream(e),
            });
        }
    };

    let mut headers = cors.apply(Some(upstream.headers()));
    if !headers.contains_key(header::CONTENT_TYPE) {
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(JSON_UTF8));
    }
    if let Some(cache_control) = translation.cache_control {
        headers.insert(header::CACHE_CONTROL, cache_control);
    }

    Ok(relay(upstream, headers))
}

fn request_headers(backend: &dyn Backend, forwarded: &ForwardedHeaders) -> HeaderMap {
    let identity = backend.identity();
    let mut headers = HeaderMap::new();
    headers.insert(header::USER_AGENT, forwarded.user_agent_or(&identity.user_agent));
    headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(header::REFERER, identity.referer.clone());
    headers.insert(header::ORIGIN, identity.origin.clone());
    headers
}
