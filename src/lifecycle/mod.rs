//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Shutdown (shutdown.rs):
//!     trigger() or Ctrl-C (signals.rs) → stop accepting → drain in-flight streams → exit
//! ```

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
