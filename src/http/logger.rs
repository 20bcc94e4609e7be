//! Per-request logger middleware.
//!
//! # Responsibilities
//! - Attach a `RequestLogger` to every request at request start
//! - Raise `request-internal` notifications for received/response
//! - Turn `RequestFailure` responses into `request-error` notifications
//!
//! # Design Decisions
//! - The logger lives in request extensions and dies with the request
//! - Handlers get it through the `RequestLogger` extractor

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{FromRequestParts, State},
    http::{request::Parts, Request, StatusCode},
    middleware::Next,
    response::Response,
};
use serde_json::json;

use crate::http::error::RequestFailure;
use crate::http::request::request_id_or_new;
use crate::normalize::{Normalizer, Notification, RequestLogger};

pub async fn attach_request_logger(
    State(normalizer): State<Arc<Normalizer>>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let logger = normalizer.attach(request_id_or_new(&request));

    logger.internal(
        ["received"],
        json!({
            "method": request.method().as_str(),
            "path": request.uri().path(),
        }),
    );

    request.extensions_mut().insert(logger.clone());
    let response = next.run(request).await;

    if let Some(failure) = response.extensions().get::<RequestFailure>() {
        normalizer.normalize(&Notification::request_error(
            logger.id(),
            failure.error().clone(),
        ));
    }

    logger.internal(["response"], json!({ "status": response.status().as_u16() }));
    response
}

impl<S> FromRequestParts<S> for RequestLogger
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<RequestLogger>()
            .cloned()
            .ok_or((StatusCode::INTERNAL_SERVER_ERROR, "Request logger not attached"))
    }
}
