//! Generic passthrough backend.
//!
//! Every inbound parameter is copied verbatim except the gateway's own
//! control parameters. The upstream requires a content-type selector, so a
//! query without it is rejected before any call is made.

use url::Url;

use crate::backends::{parse_base_url, Backend, BuildError, UpstreamIdentity, UpstreamQuery};
use crate::config::PrimaryBackendConfig;
use crate::error::{GatewayError, GatewayResult};
use crate::http::request::{QueryParams, RESERVED_PARAMS};

/// Backend that forwards the caller's parameters unchanged.
#[derive(Debug, Clone)]
pub struct PrimaryBackend {
    name: String,
    selectors: Vec<String>,
    base_url: Url,
    required: Vec<String>,
    identity: UpstreamIdentity,
}

impl PrimaryBackend {
    /// Build from configuration.
    pub fn from_config(config: &PrimaryBackendConfig) -> Result<Self, BuildError> {
        let base_url = parse_base_url(&config.name, &config.base_url)?;
        let identity = UpstreamIdentity::from_config(&config.name, &config.identity, &base_url)?;
        Ok(Self {
            name: config.name.clone(),
            selectors: config.selectors.clone(),
            base_url,
            required: config.required.clone(),
            identity,
        })
    }
}

impl Backend for PrimaryBackend {
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

    fn map_parameters(&self, query: &QueryParams, upstream: &mut UpstreamQuery) -> GatewayResult<()> {
        for (name, value) in query.iter() {
            if !RESERVED_PARAMS.contains(&name) {
                upstream.set(name, value);
            }
        }

        if let Some(missing) = self.required.iter().find(|name| !upstream.contains(name)) {
            return Err(GatewayError::MissingParameter(missing.clone()));
        }
        Ok(())
    }
}
