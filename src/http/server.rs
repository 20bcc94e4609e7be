//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Wire up middleware (tracing, request ID, request logger)
//! - Bind server to listener
//! - Raise server-wide notifications on start and stop
//! - Graceful shutdown

use std::future::Future;
use std::sync::Arc;

use axum::{middleware, Router};
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::http::logger::attach_request_logger;
use crate::normalize::Normalizer;

/// Layer `router` so every request gets a request id and a `RequestLogger`.
///
/// Layers run outermost first: trace span, request id, then the logger.
pub fn register(router: Router, normalizer: Arc<Normalizer>) -> Router {
    router
        .layer(middleware::from_fn_with_state(normalizer, attach_request_logger))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TraceLayer::new_for_http())
}

/// HTTP server whose requests are logged through a [`Normalizer`].
pub struct HttpServer {
    router: Router,
    normalizer: Arc<Normalizer>,
}

impl HttpServer {
    pub fn new(routes: Router, normalizer: Arc<Normalizer>) -> Self {
        let router = register(routes, normalizer.clone());
        Self { router, normalizer }
    }

    /// The fully layered router.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` resolves.
    pub async fn run<F>(self, listener: TcpListener, shutdown: F) -> Result<(), std::io::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");
        self.normalizer
            .log(["start"], json!({ "address": addr.to_string() }));

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await?;

        self.normalizer.log(["stop"], "server stopped");
        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
