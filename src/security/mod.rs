//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Audio request:
//!     → host_allow_list.rs (reject targets outside the trusted domain)
//!     → [upstream call]
//! Every relayed response:
//!     → headers.rs (allow-listed headers + CORS)
//! ```
//!
//! # Design Decisions
//! - Fail closed: unparseable or foreign targets are rejected
//! - No upstream header reaches the client unless explicitly allow-listed

pub mod headers;
pub mod host_allow_list;

pub use headers::{preflight_response, CorsPolicy};
pub use host_allow_list::HostAllowList;
