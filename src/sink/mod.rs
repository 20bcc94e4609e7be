//! Structured logger capability.
//!
//! # Data Flow
//! ```text
//! Normalizer / RequestLogger
//!     → LogSink::emit        (fields + message at a severity)
//!     → LogSink::emit_error  (error payloads, sink-native formatting)
//!     → LogSink::child       (per-request logger bound to req_id)
//! ```
//!
//! # Design Decisions
//! - Sinks are shared via Arc and called from many request tasks at once;
//!   any synchronization is the sink's own business
//! - Child sinks carry bound fields; fields passed at emit time win on clash

pub mod memory;
pub mod tracing;

use std::error::Error;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::normalize::Severity;

pub use self::memory::{Entry, MemorySink};
pub use self::tracing::TracingSink;

/// A structured logging backend.
pub trait LogSink: Send + Sync {
    /// Write a record at `level`.
    fn emit(&self, level: Severity, fields: Map<String, Value>, message: &str);

    /// Write an error value at `level` using the backend's own error formatting.
    fn emit_error(
        &self,
        level: Severity,
        fields: Map<String, Value>,
        error: &(dyn Error + Send + Sync + 'static),
    );

    /// Derive a logger whose records always carry `fields`.
    fn child(&self, fields: Map<String, Value>) -> Arc<dyn LogSink>;
}

/// Merge emit-time fields over a child's bound fields.
pub(crate) fn with_bound(bound: &Map<String, Value>, fields: Map<String, Value>) -> Map<String, Value> {
    if bound.is_empty() {
        return fields;
    }
    let mut merged = bound.clone();
    merged.extend(fields);
    merged
}
