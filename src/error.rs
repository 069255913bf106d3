//! Gateway error taxonomy and its HTTP rendering.
//!
//! Client errors render as minimal plain-text responses. Upstream transport
//! failures render as 502 unless the backend asked for a JSON diagnostic.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::http::response::plain_text;
use crate::security::headers::{ALLOW_ANY_ORIGIN, NO_STORE};

/// Result type for request handling.
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Errors surfaced while handling a single request.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Method other than GET, HEAD or OPTIONS.
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// Audio target failed allow-list validation.
    #[error("Invalid target")]
    InvalidTarget,

    /// Translated query lacks a parameter the backend requires.
    #[error("Missing {0}")]
    MissingParameter(String),

    /// Upstream could not be reached.
    #[error("Upstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),

    /// Upstream could not be reached; reported to the caller as JSON.
    #[error("{message}: {error}")]
    UpstreamDiagnostic {
        message: String,
        error: String,
        url: String,
    },
}

impl GatewayError {
    /// Status code this error renders with.
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            GatewayError::InvalidTarget | GatewayError::MissingParameter(_) => StatusCode::BAD_REQUEST,
            GatewayError::Upstream(_) => StatusCode::BAD_GATEWAY,
            GatewayError::UpstreamDiagnostic { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// JSON body of an upstream diagnostic.
#[derive(Debug, Serialize)]
struct DiagnosticBody<'a> {
    code: u16,
    message: &'a str,
    error: &'a str,
    url: &'a str,
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            GatewayError::UpstreamDiagnostic { message, error, url } => {
                let body = DiagnosticBody {
                    code: status.as_u16(),
                    message,
                    error,
                    url,
                };
                let mut response = (status, Json(body)).into_response();
                let headers = response.headers_mut();
                headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
                headers.insert(
                    header::ACCESS_CONTROL_ALLOW_ORIGIN,
                    HeaderValue::from_static(ALLOW_ANY_ORIGIN),
                );
                headers.insert(header::CACHE_CONTROL, HeaderValue::from_static(NO_STORE));
                response
            }
            GatewayError::Upstream(_) => plain_text(status, "Upstream request failed"),
            _ => plain_text(status, &self.to_string()),
        }
    }
}
