//! Music API gateway library.
//!
//! Fronts third-party music-data APIs and one audio host: audio streams are
//! relayed from an allow-listed domain, API queries are translated onto each
//! backend's schema, and every response is made readable cross-origin.

pub mod audio;
pub mod backends;
pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;
pub mod security;
pub mod upstream;

pub use config::GatewayConfig;
pub use error::GatewayError;
pub use http::GatewayServer;
pub use lifecycle::Shutdown;
