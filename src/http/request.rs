//! Request identification.
//!
//! # Responsibilities
//! - Read the request id stamped by tower-http's `SetRequestIdLayer`
//! - Fall back to an incoming `x-request-id` header, then a fresh UUID v4
//!
//! # Design Decisions
//! - Request ID added as early as possible so every notification carries it

use axum::http::Request;
use tower_http::request_id::RequestId;
use uuid::Uuid;

pub const X_REQUEST_ID: &str = "x-request-id";

/// Request id for `request`, if one was set by the id layer or the client.
pub fn request_id<B>(request: &Request<B>) -> Option<String> {
    let value = request
        .extensions()
        .get::<RequestId>()
        .map(RequestId::header_value)
        .or_else(|| request.headers().get(X_REQUEST_ID))?;

    value
        .to_str()
        .ok()
        .filter(|id| !id.is_empty())
        .map(str::to_string)
}

/// Request id for `request`, generating one when none is present.
pub fn request_id_or_new<B>(request: &Request<B>) -> String {
    request_id(request).unwrap_or_else(|| Uuid::new_v4().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::HeaderValue;

    #[test]
    fn test_extension_wins_over_header() {
        let mut req = Request::builder()
            .header(X_REQUEST_ID, "from-client")
            .body(Body::empty())
            .unwrap();
        req.extensions_mut()
            .insert(RequestId::new(HeaderValue::from_static("from-layer")));

        assert_eq!(request_id(&req).as_deref(), Some("from-layer"));
    }

    #[test]
    fn test_header_fallback() {
        let req = Request::builder()
            .header(X_REQUEST_ID, "abc-123")
            .body(Body::empty())
            .unwrap();
        assert_eq!(request_id(&req).as_deref(), Some("abc-123"));
    }

    #[test]
    fn test_generates_when_missing() {
        let req = Request::builder().body(Body::empty()).unwrap();
        assert_eq!(request_id(&req), None);

        let id = request_id_or_new(&req);
        assert!(Uuid::parse_str(&id).is_ok());
    }
}
