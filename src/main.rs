//! log-bridge demo server.
//!
//! ```text
//!     Client Request
//!     ─────▶ TraceLayer ─▶ request id ─▶ request logger ─▶ handler
//!                                              │              │
//!                                              ▼              ▼
//!                                        Normalizer ◀── RequestLogger
//!                                              │
//!                                              ▼
//!                                         TracingSink ─▶ tracing subscriber
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{routing::get, Json, Router};
use clap::Parser;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use log_bridge::config::{load_config, BridgeConfig};
use log_bridge::http::{HttpServer, RequestFailure};
use log_bridge::observability::{logging, metrics};
use log_bridge::{Normalizer, RequestLogger, TracingSink};

#[derive(Parser)]
#[command(name = "log-bridge")]
#[command(about = "Demo server logging framework events through the normalizer", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override listener.bind_address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => BridgeConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    logging::init_logging(&config.logging);
    tracing::info!("log-bridge v{} starting", env!("CARGO_PKG_VERSION"));

    if config.metrics.enabled {
        let addr: SocketAddr = config.metrics.address.parse()?;
        metrics::init_metrics(addr)?;
    }

    let normalizer = Arc::new(
        Normalizer::builder()
            .logger(TracingSink::new())
            .options(config.normalize.clone())
            .build()?,
    );

    tracing::info!(
        bind_address = %config.listener.bind_address,
        options = ?config.normalize,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let server = HttpServer::new(routes(), normalizer);
    server.run(listener, shutdown_signal()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

fn routes() -> Router {
    Router::new()
        .route("/", get(index))
        .route("/fail", get(fail))
}

async fn index(log: RequestLogger) -> Json<Value> {
    log.log(["handler"], "hello world");
    log.debug("rendering index");
    Json(json!({ "hello": "world" }))
}

async fn fail(log: RequestLogger) -> Result<&'static str, RequestFailure> {
    log.warn("handler about to fail");
    Err(std::io::Error::other("fail").into())
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
