//! Analysis swarm REST server
//!
//! # Usage
//!
//! ```bash
//! export GEMINI_API_KEY="..."
//! cargo run --bin swarm-server -p swarm-stock
//! ```

use std::env;
use std::sync::Arc;

use swarm_stock::server::{router, AppState};
use swarm_stock::SwarmConfig;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            env::var("RUST_LOG").unwrap_or_else(|_| "info,swarm_stock=debug".to_string()),
        )
        .init();

    let config = SwarmConfig::builder().with_env().build()?;

    // Initialization failures leave the server in degraded mode on purpose:
    // the health probe reports them and /analyze returns an explanatory 500.
    let state = Arc::new(AppState::initialize(config));

    let bind_addr = env::var("SWARM_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(%bind_addr, "swarm server listening");

    axum::serve(listener, router(state)).await?;
    Ok(())
}
