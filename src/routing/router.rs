//! Request classification.

use axum::http::Method;

use crate::http::request::{QueryParams, SELECTOR_PARAM, TARGET_PARAM};

/// Where a request goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision<'q> {
    /// `OPTIONS`: answer the CORS preflight.
    Preflight,
    /// Anything but GET/HEAD/OPTIONS.
    MethodNotAllowed,
    /// Relay the audio resource at `target`.
    Audio { target: &'q str },
    /// Translate for the backend named by `selector` (default when `None`).
    Api { selector: Option<&'q str> },
}

impl RouteDecision<'_> {
    /// Label for metrics and logs.
    pub fn label(&self) -> &'static str {
        match self {
            RouteDecision::Preflight => "preflight",
            RouteDecision::MethodNotAllowed => "rejected",
            RouteDecision::Audio { .. } => "audio",
            RouteDecision::Api { .. } => "api",
        }
    }
}

/// Classify a request by method and query.
pub fn classify<'q>(method: &Method, query: &'q QueryParams) -> RouteDecision<'q> {
    if *method == Method::OPTIONS {
        return RouteDecision::Preflight;
    }
    if *method != Method::GET && *method != Method::HEAD {
        return RouteDecision::MethodNotAllowed;
    }

    match query.get_non_empty(TARGET_PARAM) {
        Some(target) => RouteDecision::Audio { target },
        None => RouteDecision::Api {
            selector: query.get(SELECTOR_PARAM),
        },
    }
}
