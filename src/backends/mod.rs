//! API backend translation subsystem.
//!
//! # Data Flow
//! ```text
//! QueryParams (inbound, generic names)
//!     → registry.rs (pick backend by `api` selector)
//!     → Backend::translate
//!         resolve_path    (upstream path for this operation)
//!         map_parameters  (rename, filter, default)
//!         default_cache   (cache directive override)
//!     → forward.rs (single upstream call, CORS headers, streamed relay)
//! ```
//!
//! # Design Decisions
//! - One trait, one registry: adding a backend is a new impl, not a new branch
//! - Mapping tables come from configuration at construction
//! - Translation is a pure function of the inbound query

pub mod alternate;
pub mod forward;
pub mod primary;
pub mod query;
pub mod registry;

use std::fmt;

use axum::http::{HeaderValue, header::InvalidHeaderValue};
use thiserror::Error;
use url::Url;

use crate::config::UpstreamIdentityConfig;
use crate::error::GatewayResult;
use crate::http::request::QueryParams;

pub use alternate::AlternateBackend;
pub use primary::PrimaryBackend;
pub use query::UpstreamQuery;
pub use registry::BackendRegistry;

/// Errors building backends from configuration.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("backend '{backend}': invalid base_url: {source}")]
    InvalidUrl {
        backend: String,
        #[source]
        source: url::ParseError,
    },

    #[error("{field}: invalid header value")]
    InvalidHeader {
        field: String,
        #[source]
        source: InvalidHeaderValue,
    },

    #[error("default backend '{0}' is not registered")]
    UnknownDefault(String),

    #[error("failed to build upstream client: {0}")]
    Client(#[from] reqwest::Error),
}

pub(crate) fn header_value(field: &str, value: &str) -> Result<HeaderValue, BuildError> {
    HeaderValue::from_str(value).map_err(|source| BuildError::InvalidHeader {
        field: field.to_string(),
        source,
    })
}

pub(crate) fn parse_base_url(backend: &str, raw: &str) -> Result<Url, BuildError> {
    Url::parse(raw).map_err(|source| BuildError::InvalidUrl {
        backend: backend.to_string(),
        source,
    })
}

/// Headers a backend presents to its upstream.
#[derive(Debug, Clone)]
pub struct UpstreamIdentity {
    /// Used when the client sent no `User-Agent`.
    pub user_agent: HeaderValue,
    pub referer: HeaderValue,
    pub origin: HeaderValue,
}

impl UpstreamIdentity {
    /// Resolve configured identity; `Referer`/`Origin` default to the
    /// origin of `base_url`.
    pub fn from_config(
        backend: &str,
        config: &UpstreamIdentityConfig,
        base_url: &Url,
    ) -> Result<Self, BuildError> {
        let origin = base_url.origin().ascii_serialization();
        let referer = config.referer.clone().unwrap_or_else(|| format!("{origin}/"));
        let origin = config.origin.clone().unwrap_or(origin);

        Ok(Self {
            user_agent: header_value(&format!("{backend}.user_agent"), &config.user_agent)?,
            referer: header_value(&format!("{backend}.referer"), &referer)?,
            origin: header_value(&format!("{backend}.origin"), &origin)?,
        })
    }
}

/// Result of translating an inbound query for one backend.
#[derive(Debug, Clone, PartialEq)]
pub struct Translation {
    /// Fully built upstream URL.
    pub url: Url,
    /// Cache directive replacing whatever the upstream sends.
    pub cache_control: Option<HeaderValue>,
}

/// One upstream music API and its parameter schema.
pub trait Backend: Send + Sync + fmt::Debug {
    /// Name for logging/metrics.
    fn name(&self) -> &str;

    /// Values of `api` that select this backend.
    fn selectors(&self) -> &[String];

    fn base_url(&self) -> &Url;

    fn identity(&self) -> &UpstreamIdentity;

    /// Upstream path for this query; `None` keeps the base URL path.
    fn resolve_path(&self, _query: &QueryParams) -> Option<String> {
        None
    }

    /// Write the upstream parameters for `query` into `upstream`, which
    /// starts out holding the base URL's own query.
    fn map_parameters(&self, query: &QueryParams, upstream: &mut UpstreamQuery) -> GatewayResult<()>;

    /// Cache directive for this query, replacing the upstream's.
    fn default_cache(&self, _query: &QueryParams) -> Option<HeaderValue> {
        None
    }

    /// Message for a JSON diagnostic on transport failure. `None` lets the
    /// failure propagate as a bare 502.
    fn failure_message(&self) -> Option<&str> {
        None
    }

    /// Build the upstream URL and cache override for `query`.
    fn translate(&self, query: &QueryParams) -> GatewayResult<Translation> {
        let mut url = self.base_url().clone();
        if let Some(path) = self.resolve_path(query) {
            url.set_path(&path);
        }

        let mut upstream = UpstreamQuery::from_url(&url);
        self.map_parameters(query, &mut upstream)?;
        upstream.write_to(&mut url);

        Ok(Translation {
            url,
            cache_control: self.default_cache(query),
        })
    }
}
