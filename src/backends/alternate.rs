//! Schema-mapped backend.
//!
//! The upstream exposes one path per operation and its own parameter names.
//! The operation comes from the `type` parameter; caller-facing synonyms are
//! renamed through the configured table and anything unlisted passes through
//! under its original name.

use std::collections::HashMap;

use axum::http::HeaderValue;
use url::Url;

use crate::backends::{
    header_value, parse_base_url, Backend, BuildError, UpstreamIdentity, UpstreamQuery,
};
use crate::config::AlternateBackendConfig;
use crate::error::GatewayResult;
use crate::http::request::{QueryParams, RESERVED_PARAMS};

const SEARCH: &str = "search";
const PLAY_URL: &str = "url";

const KEYWORDS: &str = "keywords";
const NAME: &str = "name";
const PAGE: &str = "page";
const PAGE_SIZE: &str = "pagesize";

const DEFAULT_PAGE: &str = "1";
const DEFAULT_PAGE_SIZE: &str = "20";

const FAILURE_MESSAGE: &str = "Alternate backend request failed";

#[derive(Debug, Clone)]
struct CachePolicy {
    search: HeaderValue,
    url: HeaderValue,
    other: HeaderValue,
}

/// Backend whose upstream takes one path per operation and its own names.
#[derive(Debug, Clone)]
pub struct AlternateBackend {
    name: String,
    selectors: Vec<String>,
    base_url: Url,
    identity: UpstreamIdentity,
    type_param: String,
    default_type: String,
    paths: HashMap<String, String>,
    parameters: HashMap<String, String>,
    cache: CachePolicy,
}

impl AlternateBackend {
    /// Build from configuration, resolving identity headers and cache tiers.
    pub fn from_config(config: &AlternateBackendConfig) -> Result<Self, BuildError> {
        let base_url = parse_base_url(&config.name, &config.base_url)?;
        let identity = UpstreamIdentity::from_config(&config.name, &config.identity, &base_url)?;
        let cache = CachePolicy {
            search: header_value("cache.search", &config.cache.search)?,
            url: header_value("cache.url", &config.cache.url)?,
            other: header_value("cache.other", &config.cache.other)?,
        };

        Ok(Self {
            name: config.name.clone(),
            selectors: config.selectors.clone(),
            base_url,
            identity,
            type_param: config.type_param.clone(),
            default_type: config.default_type.clone(),
            paths: config.paths.clone(),
            parameters: config.parameters.clone(),
            cache,
        })
    }

    /// Operation requested by `query`; missing or empty means the default.
    pub fn operation<'q>(&'q self, query: &'q QueryParams) -> &'q str {
        query
            .get_non_empty(&self.type_param)
            .unwrap_or(&self.default_type)
    }

    fn is_reserved(&self, name: &str) -> bool {
        name == self.type_param || RESERVED_PARAMS.contains(&name)
    }
}

impl Backend for AlternateBackend {
    fn name(&self) -> &str {
        &self.name
    }

    fn selectors(&self) -> &[String] {
        &self.selectors
    }

    fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn identity(&self) -> &UpstreamIdentity {
        &self.identity
    }

    fn resolve_path(&self, query: &QueryParams) -> Option<String> {
        let operation = self.operation(query);
        Some(
            self.paths
                .get(operation)
                .cloned()
                .unwrap_or_else(|| format!("/{operation}")),
        )
    }

    fn map_parameters(&self, query: &QueryParams, upstream: &mut UpstreamQuery) -> GatewayResult<()> {
        for (name, value) in query.iter() {
            if self.is_reserved(name) {
                continue;
            }
            let mapped = self.parameters.get(name).map(String::as_str).unwrap_or(name);
            upstream.set(mapped, value);
        }

        if self.operation(query) == SEARCH {
            upstream.set_default(PAGE_SIZE, DEFAULT_PAGE_SIZE);
            upstream.set_default(PAGE, DEFAULT_PAGE);
        }

        // Only reachable when the table no longer maps `name`.
        if !upstream.contains(KEYWORDS) {
            if let Some(name) = query.get(NAME) {
                upstream.set(KEYWORDS, name);
            }
        }
        Ok(())
    }

    fn default_cache(&self, query: &QueryParams) -> Option<HeaderValue> {
        let directive = match self.operation(query) {
            SEARCH => &self.cache.search,
            PLAY_URL => &self.cache.url,
            _ => &self.cache.other,
        };
        Some(directive.clone())
    }

    fn failure_message(&self) -> Option<&str> {
        Some(FAILURE_MESSAGE)
    }
}
