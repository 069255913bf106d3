//! Shared upstream client.

use axum::http::{HeaderMap, Method};
use reqwest::redirect::Policy;
use url::Url;

use crate::config::UpstreamConfig;
use crate::security::HostAllowList;

/// Redirect hops followed before the call fails.
const MAX_REDIRECTS: usize = 10;

/// A single outbound call.
#[derive(Debug, Clone)]
pub struct UpstreamRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
}

impl UpstreamRequest {
    pub fn get(url: Url, headers: HeaderMap) -> Self {
        Self {
            method: Method::GET,
            url,
            headers,
        }
    }
}

/// Wrapper over a pooled `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
}

impl UpstreamClient {
    /// Build the client from configuration.
    pub fn new(config: &UpstreamConfig) -> Result<Self, reqwest::Error> {
        Self::build(config, reqwest::Client::builder())
    }

    /// Build a client that follows redirects only onto hosts `allow_list`
    /// accepts. Any other hop stops, and the 3xx is returned as the response.
    /// Request headers are kept across hops and no `Referer` is synthesised.
    pub fn confined_to(
        config: &UpstreamConfig,
        allow_list: HostAllowList,
    ) -> Result<Self, reqwest::Error> {
        let policy = Policy::custom(move |attempt| {
            if attempt.previous().len() >= MAX_REDIRECTS {
                return attempt.error("too many redirects");
            }
            let url = attempt.url();
            let allowed = matches!(url.scheme(), "http" | "https")
                && url.host_str().is_some_and(|host| allow_list.allows_host(host));
            if allowed {
                attempt.follow()
            } else {
                tracing::warn!(url = %attempt.url(), "Refused redirect outside the allow-list");
                attempt.stop()
            }
        });
        Self::build(config, reqwest::Client::builder().redirect(policy).referer(false))
    }

    fn build(
        config: &UpstreamConfig,
        mut builder: reqwest::ClientBuilder,
    ) -> Result<Self, reqwest::Error> {
        if !config.system_proxy {
            builder = builder.no_proxy();
        }
        Ok(Self {
            http: builder.build()?,
        })
    }

    /// Issue `request` once and return the response with its body unread.
    pub async fn send(&self, request: UpstreamRequest) -> Result<reqwest::Response, reqwest::Error> {
        tracing::debug!(method = %request.method, url = %request.url, "Calling upstream");
        self.http
            .request(request.method, request.url)
            .headers(request.headers)
            .send()
            .await
    }
}
