//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check upstream endpoints are absolute http(s) URLs
//! - Check backend selectors are unique and the default resolves
//! - Check header values (cache directives, identities) are sendable
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use axum::http::HeaderValue;
use thiserror::Error;
use url::Url;

use crate::config::schema::{GatewayConfig, UpstreamIdentityConfig};

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid bind address '{0}'")]
    BindAddress(String),

    #[error("invalid metrics address '{0}'")]
    MetricsAddress(String),

    #[error("backend '{backend}': base_url '{url}' must be an absolute http(s) URL")]
    BaseUrl { backend: String, url: String },

    #[error("audio.trusted_suffix '{0}' must be a bare domain such as 'kuwo.cn'")]
    TrustedSuffix(String),

    #[error("backend '{0}' has no selectors")]
    NoSelectors(String),

    #[error("selector '{0}' is claimed by more than one backend")]
    DuplicateSelector(String),

    #[error("default backend '{0}' does not match any selector")]
    UnknownDefault(String),

    #[error("{field}: '{value}' is not a valid header value")]
    HeaderValue { field: String, value: String },

    #[error("backend '{0}': type_param must not be empty")]
    EmptyTypeParam(String),
}

/// Validate a parsed configuration.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(config.listener.bind_address.clone()));
    }

    let observability = &config.observability;
    if observability.metrics_enabled && observability.metrics_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::MetricsAddress(observability.metrics_address.clone()));
    }

    let suffix = &config.audio.trusted_suffix;
    if suffix.is_empty()
        || suffix.contains("://")
        || suffix.contains('/')
        || suffix.starts_with('.')
        || suffix.ends_with('.')
    {
        errors.push(ValidationError::TrustedSuffix(suffix.clone()));
    }

    check_header(&mut errors, "audio.referer", &config.audio.referer);
    check_header(&mut errors, "audio.default_user_agent", &config.audio.default_user_agent);
    check_header(&mut errors, "audio.cache_control", &config.audio.cache_control);

    let primary = &config.backends.primary;
    let alternate = &config.backends.alternate;

    check_base_url(&mut errors, &primary.name, &primary.base_url);
    check_base_url(&mut errors, &alternate.name, &alternate.base_url);
    check_identity(&mut errors, "backends.primary.identity", &primary.identity);
    check_identity(&mut errors, "backends.alternate.identity", &alternate.identity);

    check_header(&mut errors, "backends.alternate.cache.search", &alternate.cache.search);
    check_header(&mut errors, "backends.alternate.cache.url", &alternate.cache.url);
    check_header(&mut errors, "backends.alternate.cache.other", &alternate.cache.other);

    if alternate.type_param.is_empty() {
        errors.push(ValidationError::EmptyTypeParam(alternate.name.clone()));
    }

    let mut seen = HashSet::new();
    for (name, selectors) in [
        (&primary.name, &primary.selectors),
        (&alternate.name, &alternate.selectors),
    ] {
        if selectors.iter().all(|s| s.trim().is_empty()) {
            errors.push(ValidationError::NoSelectors(name.clone()));
        }
        for selector in selectors {
            if !seen.insert(selector.to_ascii_lowercase()) {
                errors.push(ValidationError::DuplicateSelector(selector.clone()));
            }
        }
    }

    if !seen.contains(&config.backends.default.to_ascii_lowercase()) {
        errors.push(ValidationError::UnknownDefault(config.backends.default.clone()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_base_url(errors: &mut Vec<ValidationError>, backend: &str, raw: &str) {
    let valid = Url::parse(raw)
        .map(|url| matches!(url.scheme(), "http" | "https") && url.host_str().is_some())
        .unwrap_or(false);
    if !valid {
        errors.push(ValidationError::BaseUrl {
            backend: backend.to_string(),
            url: raw.to_string(),
        });
    }
}

fn check_identity(errors: &mut Vec<ValidationError>, prefix: &str, identity: &UpstreamIdentityConfig) {
    check_header(errors, &format!("{prefix}.user_agent"), &identity.user_agent);
    if let Some(referer) = &identity.referer {
        check_header(errors, &format!("{prefix}.referer"), referer);
    }
    if let Some(origin) = &identity.origin {
        check_header(errors, &format!("{prefix}.origin"), origin);
    }
}

fn check_header(errors: &mut Vec<ValidationError>, field: &str, value: &str) {
    if HeaderValue::from_str(value).is_err() {
        errors.push(ValidationError::HeaderValue {
            field: field.to_string(),
            value: value.to_string(),
        });
    }
}
