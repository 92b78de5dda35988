//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Build the backend pool and balancer from configuration
//! - Create the Axum router with the catch-all proxy handler
//! - Wire up middleware (request timeout, tracing)
//! - Serve connections until shutdown

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    response::Response,
    routing::any,
    Router,
};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use tokio::net::TcpListener;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::balancer::{Balancer, BalancerError, ProxyBackend};
use crate::config::BalancerConfig;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub balancer: Arc<Balancer<ProxyBackend>>,
}

/// HTTP server fronting the balancer.
pub struct HttpServer {
    router: Router,
    balancer: Arc<Balancer<ProxyBackend>>,
}

impl HttpServer {
    /// Create a server from a validated configuration.
    ///
    /// Fails if any backend URL is unusable or the pool is empty; both are
    /// startup errors, nothing here can fail once the server is running.
    pub fn new(config: BalancerConfig) -> Result<Self, BalancerError> {
        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());

        let backends = config
            .backends
            .iter()
            .map(|b| ProxyBackend::new(&b.url, client.clone()).map(Arc::new))
            .collect::<Result<Vec<_>, _>>()?;
        let balancer = Arc::new(Balancer::new(backends)?);

        let router = Self::build_router(&config, AppState {
            balancer: balancer.clone(),
        });

        Ok(Self { router, balancer })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &BalancerConfig, state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(proxy_handler))
            .route("/", any(proxy_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(TraceLayer::new_for_http())
    }

    /// The balancer backing this server.
    ///
    /// Exposed so an external health collaborator can reach the pool's
    /// liveness flags.
    pub fn balancer(&self) -> Arc<Balancer<ProxyBackend>> {
        self.balancer.clone()
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Main proxy handler: every path lands here and is dispatched identically.
async fn proxy_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    state.balancer.dispatch(request).await
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown signal received"),
        Err(e) => {
            // Returning here would stop the server; stay pending instead.
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    }
}
