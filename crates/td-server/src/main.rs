//! Binary entry point: serve the dispatch API.
//!
//! Run with `cargo run -p td-server`; the port comes from `TD_PORT`
//! (default 8000).

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use td_server::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("td_server=info")),
        )
        .init();

    let port: u16 = std::env::var("TD_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8000);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    let app = td_server::router(Arc::new(AppState::default()));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "dispatch service listening");
    axum::serve(listener, app).await?;
    Ok(())
}
