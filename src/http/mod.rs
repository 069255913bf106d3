//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request span)
//!     → request.rs (decode query, pick forwarded headers)
//!     → [routing decides audio proxy or API backend]
//!     → response.rs (streamed relay or plain-text rejection)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{ForwardedHeaders, QueryParams};
pub use server::{AppState, GatewayServer, ServerError};
