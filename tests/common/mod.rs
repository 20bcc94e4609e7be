//! Shared utilities for integration testing.

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, Response},
    routing::get,
    Json, Router,
};
use log_bridge::http::{register, RequestFailure};
use log_bridge::{MemorySink, NormalizeOptions, Normalizer, RequestLogger};
use serde_json::{json, Value};
use tower::ServiceExt;

/// Normalizer writing into a fresh capturing sink.
pub fn capture(options: NormalizeOptions) -> (MemorySink, Arc<Normalizer>) {
    let sink = MemorySink::new();
    let normalizer = Normalizer::builder()
        .logger(sink.clone())
        .options(options)
        .build()
        .unwrap();
    (sink, Arc::new(normalizer))
}

/// Routes exercising every kind of per-request logging.
pub fn routes() -> Router {
    Router::new()
        .route("/", get(hello))
        .route("/fail", get(fail))
}

/// `routes()` layered with request ids and request loggers.
pub fn app(normalizer: Arc<Normalizer>) -> Router {
    register(routes(), normalizer)
}

/// Send one request through `router`.
pub async fn send(router: Router, request: Request<Body>) -> Response<Body> {
    router.oneshot(request).await.unwrap()
}

pub async fn get_path(router: Router, path: &str) -> Response<Body> {
    send(router, Request::builder().uri(path).body(Body::empty()).unwrap()).await
}

async fn hello(log: RequestLogger) -> Json<Value> {
    log.log(["tester"], "hello world");
    log.trace("test-trace");
    log.error("test-error");
    Json(json!({ "hello": "world" }))
}

async fn fail(_log: RequestLogger) -> Result<&'static str, RequestFailure> {
    Err(std::io::Error::other("fail").into())
}
