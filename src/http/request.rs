//! Inbound request inspection.
//!
//! # Responsibilities
//! - Decode the query string into ordered name/value pairs
//! - Extract the headers forwarded upstream (`User-Agent`, `Range`)
//!
//! # Design Decisions
//! - Pairs keep inbound order; lookups return the first occurrence
//! - Decoding is `application/x-www-form-urlencoded` (`+` is a space)

use axum::http::{header, HeaderMap, HeaderValue, Uri};
use url::form_urlencoded;

/// Absolute URL of an audio resource; its presence selects the audio proxy.
pub const TARGET_PARAM: &str = "target";

/// Backend selector.
pub const SELECTOR_PARAM: &str = "api";

/// JSONP callback name; never forwarded.
pub const CALLBACK_PARAM: &str = "callback";

/// Gateway control parameters no backend receives.
pub const RESERVED_PARAMS: [&str; 3] = [TARGET_PARAM, CALLBACK_PARAM, SELECTOR_PARAM];

/// Decoded query parameters of an inbound request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Decode a raw query string (without the leading `?`).
    pub fn parse(query: &str) -> Self {
        Self {
            pairs: form_urlencoded::parse(query.as_bytes())
                .into_owned()
                .collect(),
        }
    }

    /// Decode the query of `uri`; empty when there is none.
    pub fn from_uri(uri: &Uri) -> Self {
        uri.query().map(Self::parse).unwrap_or_default()
    }

    /// First value of `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// First value of `name`, treating an empty value as absent.
    pub fn get_non_empty(&self, name: &str) -> Option<&str> {
        self.get(name).filter(|value| !value.is_empty())
    }

    /// All pairs in inbound order, duplicates included.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Client headers relayed to upstreams.
#[derive(Debug, Clone, Default)]
pub struct ForwardedHeaders {
    pub user_agent: Option<HeaderValue>,
    pub range: Option<HeaderValue>,
}

impl ForwardedHeaders {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self {
            user_agent: headers.get(header::USER_AGENT).cloned(),
            range: headers.get(header::RANGE).cloned(),
        }
    }

    /// Client `User-Agent`, or `fallback` when the client sent none.
    pub fn user_agent_or(&self, fallback: &HeaderValue) -> HeaderValue {
        self.user_agent.clone().unwrap_or_else(|| fallback.clone())
    }
}
