//! Round-robin HTTP load balancer.
//!
//! # Architecture Overview
//!
//! ```text
//!                   ┌────────────────────────────────────────────┐
//!                   │               LOAD BALANCER                 │
//!                   │                                             │
//!  Client Request   │  ┌─────────┐    ┌──────────┐    ┌────────┐ │
//!  ─────────────────┼─▶│  http   │───▶│ balancer │───▶│backend │─┼──▶ Upstream
//!                   │  │ server  │    │ rotation │    │forward │ │     Server
//!                   │  └─────────┘    └──────────┘    └────────┘ │
//!  Client Response  │                                             │
//!  ◀────────────────┼─────────────────────────────────────────────┼──── Upstream
//!                   │                                             │     Response
//!                   │  ┌───────────────────────────────────────┐  │
//!                   │  │   config (load → validate → pool)     │  │
//!                   │  └───────────────────────────────────────┘  │
//!                   └────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use load_balancer::config::load_config;
use load_balancer::http::HttpServer;

#[derive(Parser)]
#[command(name = "load-balancer")]
#[command(about = "Round-robin HTTP load balancer", long_about = None)]
struct Args {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "balancer.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "load_balancer=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("load-balancer v0.1.0 starting");

    let args = Args::parse();

    // Any config problem is fatal here; nothing past this point re-reads it.
    let config = load_config(&args.config)?;

    tracing::info!(
        bind_address = %config.listener.bind_address,
        backends = config.backends.len(),
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(address = %local_addr, "Listening for connections");

    let server = HttpServer::new(config)?;
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
