//! Handler failures surfaced as `request-error` notifications.

use std::error::Error;
use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::normalize::SharedError;

/// Error returned by a handler that failed unexpectedly.
///
/// Renders as a plain 500 and carries the error in the response extensions,
/// where the request logger middleware picks it up and raises a
/// `request-error` notification with the error as payload.
#[derive(Debug, Clone)]
pub struct RequestFailure(pub SharedError);

impl RequestFailure {
    pub fn error(&self) -> &SharedError {
        &self.0
    }
}

impl<E> From<E> for RequestFailure
where
    E: Error + Send + Sync + 'static,
{
    fn from(error: E) -> Self {
        Self(Arc::new(error))
    }
}

impl IntoResponse for RequestFailure {
    fn into_response(self) -> Response {
        let mut response = (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response();
        response.extensions_mut().insert(self);
        response
    }
}
