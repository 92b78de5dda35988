//! Backend pool and round-robin rotation.
//!
//! # Responsibilities
//! - Own the ordered, fixed-size backend pool
//! - Select the next live backend per exchange via strict rotation
//! - Delegate forwarding and surface pool-wide unavailability as 503

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
};

use crate::balancer::{Backend, BalancerError};

/// Round-robin balancer over a fixed pool of backends.
///
/// The pool is read-only after construction; only the rotation cursor
/// mutates, and it is atomic, so dispatch is safe under parallel exchanges.
#[derive(Debug)]
pub struct Balancer<B> {
    /// Ordered pool; rotation is defined over this exact sequence.
    backends: Vec<Arc<B>>,
    /// Monotonic ticket counter. Only `ticket % len` indexes the pool.
    cursor: AtomicUsize,
}

impl<B: Backend> Balancer<B> {
    /// Create a balancer over a non-empty pool.
    pub fn new(backends: Vec<Arc<B>>) -> Result<Self, BalancerError> {
        if backends.is_empty() {
            return Err(BalancerError::EmptyPool);
        }
        Ok(Self {
            backends,
            cursor: AtomicUsize::new(0),
        })
    }

    /// The pool, in rotation order.
    pub fn backends(&self) -> &[Arc<B>] {
        &self.backends
    }

    /// Select the next live backend.
    ///
    /// Each probe consumes one cursor ticket, so a skipped dead backend
    /// advances the rotation exactly as a returned one does and the live
    /// entries keep their relative order. The scan is bounded to one full
    /// pass over the pool; if nothing is live the selection fails instead of
    /// looping.
    pub fn next_available(&self) -> Result<Arc<B>, BalancerError> {
        let len = self.backends.len();
        for _ in 0..len {
            let ticket = self.cursor.fetch_add(1, Ordering::Relaxed);
            let backend = &self.backends[ticket % len];
            if backend.is_alive() {
                return Ok(Arc::clone(backend));
            }
        }
        Err(BalancerError::NoAvailableBackend)
    }

    /// Handle one exchange: pick a backend and delegate the forward.
    pub async fn dispatch(&self, request: Request<Body>) -> Response {
        match self.next_available() {
            Ok(backend) => {
                tracing::debug!(backend = %backend.address(), "Forwarding request");
                backend.forward(request).await
            }
            Err(e) => {
                tracing::warn!(error = %e, "Dropping request: no backend available");
                (StatusCode::SERVICE_UNAVAILABLE, "No backend available").into_response()
            }
        }
    }
}
