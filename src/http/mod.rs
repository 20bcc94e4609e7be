//! HTTP integration subsystem.
//!
//! # Data Flow
//! ```text
//! incoming request
//!     → TraceLayer (tower-http span)
//!     → SetRequestIdLayer / PropagateRequestIdLayer (x-request-id)
//!     → logger.rs (attach RequestLogger, request-internal events)
//!     → application handler (RequestLogger extractor)
//!     → error.rs (RequestFailure → request-error event)
//!     → response
//! ```

pub mod error;
pub mod logger;
pub mod request;
pub mod server;

pub use error::RequestFailure;
pub use logger::attach_request_logger;
pub use request::{request_id, request_id_or_new, X_REQUEST_ID};
pub use server::{register, HttpServer};
