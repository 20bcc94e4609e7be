//! Bridges web framework lifecycle and log events to a structured logger.
//!
//! Framework notifications (server logs, per-request logs, internal request
//! events, request errors) are normalized into structured records and written
//! to a caller-supplied [`LogSink`] at a resolved [`Severity`]. Each request
//! also gets a [`RequestLogger`] bound to its request id.

pub mod config;
pub mod http;
pub mod normalize;
pub mod observability;
pub mod sink;

pub use config::BridgeConfig;
pub use http::HttpServer;
pub use normalize::{
    Decision, NormalizeOptions, Normalizer, Notification, NotificationKind, Outcome, Payload,
    Record, RequestLogger, Severity, Tags,
};
pub use sink::{LogSink, MemorySink, TracingSink};
