//! Audio stream proxy.
//!
//! # Data Flow
//! ```text
//! ?target=<url>
//!     → security::HostAllowList (reject, or rewrite to http)
//!     → upstream call (inbound method, Range, User-Agent, fixed Referer;
//!       redirects followed only within the allow-list)
//!     → CORS policy (public cache default instead of no-store)
//!     → streamed relay, status passed through (206 for ranges)
//! ```

pub mod proxy;

pub use proxy::AudioProxy;
