//! Range-capable relay to the trusted audio host.

use axum::{
    http::{header, HeaderMap, HeaderValue, Method},
    response::Response,
};

use crate::backends::{header_value, BuildError};
use crate::config::{AudioConfig, UpstreamConfig};
use crate::error::{GatewayError, GatewayResult};
use crate::http::request::ForwardedHeaders;
use crate::http::response::relay;
use crate::security::{CorsPolicy, HostAllowList};
use crate::upstream::{UpstreamClient, UpstreamRequest};

/// Relays audio from the trusted host, through a client that will not
/// follow redirects off it.
#[derive(Debug, Clone)]
pub struct AudioProxy {
    allow_list: HostAllowList,
    client: UpstreamClient,
    referer: HeaderValue,
    default_user_agent: HeaderValue,
    cache_control: HeaderValue,
}

impl AudioProxy {
    /// Build the proxy and its redirect-confined client.
    pub fn from_config(
        config: &AudioConfig,
        upstream: &UpstreamConfig,
    ) -> Result<Self, BuildError> {
        let allow_list = HostAllowList::new(config.trusted_suffix.as_str());
        Ok(Self {
            client: UpstreamClient::confined_to(upstream, allow_list.clone())?,
            allow_list,
            referer: header_value("audio.referer", &config.referer)?,
            default_user_agent: header_value("audio.default_user_agent", &config.default_user_agent)?,
            cache_control: header_value("audio.cache_control", &config.cache_control)?,
        })
    }

    /// Build the upstream request for `target`, or reject it.
    pub fn prepare(
        &self,
        target: &str,
        method: &Method,
        forwarded: &ForwardedHeaders,
    ) -> GatewayResult<UpstreamRequest> {
        let Some(url) = self.allow_list.normalize(target) else {
            tracing::warn!(target = %target, "Rejected audio target");
            return Err(GatewayError::InvalidTarget);
        };

        let mut headers = HeaderMap::new();
        headers.insert(header::USER_AGENT, forwarded.user_agent_or(&self.default_user_agent));
        headers.insert(header::REFERER, self.referer.clone());
        if let Some(range) = &forwarded.range {
            headers.insert(header::RANGE, range.clone());
        }

        Ok(UpstreamRequest {
            method: method.clone(),
            url,
            headers,
        })
    }

    /// Relay `target` to the client.
    pub async fn proxy(
        &self,
        target: &str,
        method: &Method,
        forwarded: &ForwardedHeaders,
        cors: &CorsPolicy,
    ) -> GatewayResult<Response> {
        let request = self.prepare(target, method, forwarded)?;
        tracing::info!(url = %request.url, range = ?forwarded.range, "Proxying audio");

        let upstream = self.client.send(request).await.map_err(|e| {
            tracing::error!(error = %e, "Audio upstream error");
            GatewayError::Upstream(e)
        })?;

        let mut headers = cors.apply(Some(upstream.headers()));
        if !upstream.headers().contains_key(header::CACHE_CONTROL) {
            headers.insert(header::CACHE_CONTROL, self.cache_control.clone());
        }

        Ok(relay(upstream, headers))
    }
}
