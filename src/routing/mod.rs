//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (method, query)
//!     → router.rs (classify)
//!     → Preflight | MethodNotAllowed | Audio(target) | Api(selector)
//!     → http::server dispatches to the matching handler
//! ```
//!
//! # Design Decisions
//! - Stateless: the decision depends only on method and query
//! - Deterministic: same input always yields the same route
//! - Order is fixed: method checks precede any query inspection

pub mod router;

pub use router::{classify, RouteDecision};
