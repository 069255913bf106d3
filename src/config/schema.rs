//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Root configuration for the music gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Shared outbound client settings.
    pub upstream: UpstreamConfig,

    /// Audio stream proxy settings.
    pub audio: AudioConfig,

    /// API backend definitions.
    pub backends: BackendsConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Outbound HTTP client configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Honour `HTTP_PROXY`/`HTTPS_PROXY` from the environment.
    pub system_proxy: bool,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self { system_proxy: true }
    }
}

/// Audio stream proxy configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AudioConfig {
    /// Trusted host suffix; the host must equal it or end with `.<suffix>`.
    pub trusted_suffix: String,

    /// `Referer` sent to the audio host.
    pub referer: String,

    /// `User-Agent` used when the client sent none.
    pub default_user_agent: String,

    /// Cache directive applied when the audio host sent none.
    pub cache_control: String,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            trusted_suffix: "kuwo.cn".to_string(),
            referer: "https://www.kuwo.cn/".to_string(),
            default_user_agent: "Mozilla/5.0".to_string(),
            cache_control: "public, max-age=3600".to_string(),
        }
    }
}

/// API backends and the selector used when a request names none.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BackendsConfig {
    /// Selector of the backend used when `api` is absent or unknown.
    pub default: String,

    /// Generic passthrough backend.
    pub primary: PrimaryBackendConfig,

    /// Schema-mapped backend.
    pub alternate: AlternateBackendConfig,
}

impl Default for BackendsConfig {
    fn default() -> Self {
        Self {
            default: "gdstudio".to_string(),
            primary: PrimaryBackendConfig::default(),
            alternate: AlternateBackendConfig::default(),
        }
    }
}

/// Request identity presented to an API backend.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamIdentityConfig {
    /// `User-Agent` used when the client sent none.
    pub user_agent: String,

    /// `Referer` header. Derived from the base URL origin when absent.
    pub referer: Option<String>,

    /// `Origin` header. Derived from the base URL origin when absent.
    pub origin: Option<String>,
}

impl Default for UpstreamIdentityConfig {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36".to_string(),
            referer: None,
            origin: None,
        }
    }
}

/// Passthrough backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PrimaryBackendConfig {
    /// Backend name for logging/metrics.
    pub name: String,

    /// Values of `api` that select this backend (case-insensitive).
    pub selectors: Vec<String>,

    /// Upstream endpoint; query parameters are appended to it.
    pub base_url: String,

    /// Parameters the translated query must contain.
    pub required: Vec<String>,

    /// Headers identifying the gateway to the upstream.
    pub identity: UpstreamIdentityConfig,
}

impl Default for PrimaryBackendConfig {
    fn default() -> Self {
        Self {
            name: "gdstudio".to_string(),
            selectors: vec!["gdstudio".to_string()],
            base_url: "https://music-api.gdstudio.xyz/api.php".to_string(),
            required: vec!["types".to_string()],
            identity: UpstreamIdentityConfig::default(),
        }
    }
}

/// Schema-mapped backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AlternateBackendConfig {
    /// Backend name for logging/metrics.
    pub name: String,

    /// Values of `api` that select this backend (case-insensitive).
    pub selectors: Vec<String>,

    /// Upstream origin; the resolved path replaces its path.
    pub base_url: String,

    /// Query parameter carrying the operation type.
    pub type_param: String,

    /// Operation type used when the request carries none.
    pub default_type: String,

    /// Operation type to upstream path. Unknown types use `/<type>`.
    pub paths: HashMap<String, String>,

    /// Caller-facing parameter name to upstream parameter name.
    pub parameters: HashMap<String, String>,

    /// Cache tiers by operation type.
    pub cache: CacheTiers,

    /// Headers identifying the gateway to the upstream.
    pub identity: UpstreamIdentityConfig,
}

impl Default for AlternateBackendConfig {
    fn default() -> Self {
        let paths = [
            "search", "song", "url", "lyric", "playlist", "album", "artist", "top", "hot", "suggest",
        ]
        .into_iter()
        .map(|kind| (kind.to_string(), format!("/{kind}")))
        .collect();

        let parameters = [
            ("keywords", "keywords"),
            ("name", "keywords"),
            ("id", "keywords"),
            ("type", "type"),
            ("page", "page"),
            ("pages", "page"),
            ("count", "pagesize"),
            ("pagesize", "pagesize"),
            ("limit", "pagesize"),
            ("songid", "id"),
            ("mid", "mid"),
            ("hash", "hash"),
            ("br", "br"),
            ("quality", "br"),
            ("playlistid", "id"),
            ("albumid", "id"),
            ("artistid", "id"),
            ("topid", "id"),
        ]
        .into_iter()
        .map(|(from, to)| (from.to_string(), to.to_string()))
        .collect();

        Self {
            name: "kugou".to_string(),
            selectors: vec!["kugo".to_string(), "kugou".to_string()],
            base_url: "https://kugo.520me.cf".to_string(),
            type_param: "type".to_string(),
            default_type: "search".to_string(),
            paths,
            parameters,
            cache: CacheTiers::default(),
            identity: UpstreamIdentityConfig {
                referer: Some("https://m.kugou.com/".to_string()),
                origin: Some("https://m.kugou.com".to_string()),
                ..UpstreamIdentityConfig::default()
            },
        }
    }
}

/// Cache directives applied by the schema-mapped backend.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CacheTiers {
    /// Search results.
    pub search: String,

    /// Resolved play URLs.
    pub url: String,

    /// Everything else.
    pub other: String,
}

impl Default for CacheTiers {
    fn default() -> Self {
        Self {
            search: "public, max-age=300".to_string(),
            url: "public, max-age=3600".to_string(),
            other: "public, max-age=1800".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit logs as JSON lines.
    pub json_logs: bool,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
