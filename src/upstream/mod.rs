//! Outbound HTTP to upstream services.
//!
//! # Design Decisions
//! - One pooled client shared by every backend and the audio proxy
//! - Exactly one attempt per request; no retries, no gateway-imposed timeout
//! - Responses are handed back unread so callers can stream them

pub mod client;

pub use client::{UpstreamClient, UpstreamRequest};
