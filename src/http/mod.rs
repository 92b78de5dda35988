//! HTTP serving subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, catch-all route)
//!     → balancer picks the next live backend
//!     → backend forwards to the upstream
//!     → response streamed back to the client
//! ```

pub mod server;

pub use server::HttpServer;
