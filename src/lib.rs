//! Round-robin HTTP load balancer library.
//!
//! Accepts HTTP requests on one listening port and forwards each to the next
//! live backend in a fixed, ordered pool, streaming the upstream response
//! back to the caller.

pub mod balancer;
pub mod config;
pub mod http;

pub use balancer::{Backend, Balancer, BalancerError, ProxyBackend};
pub use config::BalancerConfig;
pub use http::HttpServer;
