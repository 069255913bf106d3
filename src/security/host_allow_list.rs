//! Audio host allow-list.
//!
//! The only security boundary of the gateway: the audio proxy relays to a URL
//! supplied by the caller, so anything outside the trusted domain is refused
//! before a connection is opened.

use url::Url;

/// Accepts URLs whose host equals the trusted suffix or is a subdomain of it.
#[derive(Debug, Clone)]
pub struct HostAllowList {
    suffix: String,
}

impl HostAllowList {
    /// Create an allow-list for `suffix` (e.g. `kuwo.cn`).
    pub fn new(suffix: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into().to_ascii_lowercase(),
        }
    }

    /// Returns true if `host` is the suffix or ends with `.<suffix>`.
    pub fn allows_host(&self, host: &str) -> bool {
        if host.is_empty() {
            return false;
        }
        let host = host.to_ascii_lowercase();
        match host.strip_suffix(self.suffix.as_str()) {
            Some("") => true,
            Some(prefix) => prefix.ends_with('.'),
            None => false,
        }
    }

    /// Validate `raw` and rewrite it to plain `http`.
    ///
    /// Returns `None` when `raw` is not an absolute URL, its scheme is not
    /// http/https, or its host is outside the allow-list. Host, path and
    /// query are preserved.
    pub fn normalize(&self, raw: &str) -> Option<Url> {
        let mut url = Url::parse(raw).ok()?;
        if !matches!(url.scheme(), "http" | "https") {
            return None;
        }
        if !url.host_str().is_some_and(|host| self.allows_host(host)) {
            return None;
        }
        url.set_scheme("http").ok()?;
        Some(url)
    }
}
