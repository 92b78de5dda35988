//! Load balancing subsystem.
//!
//! # Data Flow
//! ```text
//! Inbound exchange
//!     → pool.rs (Balancer::dispatch)
//!     → round-robin selection over the fixed pool (skip non-live entries)
//!     → backend.rs (ProxyBackend::forward)
//!     → upstream server
//!     → response streamed back to the caller
//! ```
//!
//! # Design Decisions
//! - The pool is ordered and immutable after construction; rotation is
//!   defined over that exact order
//! - The rotation cursor is an atomic ticket counter, safe under parallel
//!   dispatch without changing the observable round-robin contract
//! - Liveness is a capability: the balancer only reads it; an external
//!   health collaborator may write it out-of-band
//! - If no backend is live, selection fails after scanning the pool once
//!   rather than looping

pub mod backend;
pub mod pool;

use thiserror::Error;

pub use backend::{Backend, ProxyBackend};
pub use pool::Balancer;

/// Errors produced by the balancing subsystem.
#[derive(Debug, Error)]
pub enum BalancerError {
    /// A configured backend address could not be used.
    #[error("invalid backend url '{url}': {reason}")]
    InvalidBackend { url: String, reason: String },

    /// The balancer was constructed with no backends.
    #[error("backend pool is empty")]
    EmptyPool,

    /// Every backend in the pool reported not-alive.
    #[error("no backend is currently alive")]
    NoAvailableBackend,
}
