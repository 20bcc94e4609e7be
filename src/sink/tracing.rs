//! `tracing` backed sink.
//!
//! `tracing` levels stop at ERROR, so `fatal` records go out as ERROR events
//! carrying `fatal = true`. The structured fields travel as one JSON `record`
//! field since tracing field names are fixed at compile time.

use std::error::Error;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::normalize::Severity;
use crate::sink::{with_bound, LogSink};

macro_rules! event_at {
    ($level:expr, $($rest:tt)+) => {
        match $level {
            Severity::Trace => ::tracing::trace!($($rest)+),
            Severity::Debug => ::tracing::debug!($($rest)+),
            Severity::Info => ::tracing::info!($($rest)+),
            Severity::Warn => ::tracing::warn!($($rest)+),
            Severity::Error => ::tracing::error!($($rest)+),
            Severity::Fatal => ::tracing::error!(fatal = true, $($rest)+),
        }
    };
}

#[derive(Debug, Clone, Default)]
pub struct TracingSink {
    bound: Arc<Map<String, Value>>,
}

impl TracingSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LogSink for TracingSink {
    fn emit(&self, level: Severity, fields: Map<String, Value>, message: &str) {
        let record = Value::Object(with_bound(&self.bound, fields));
        event_at!(level, record = %record, "{}", message);
    }

    fn emit_error(
        &self,
        level: Severity,
        fields: Map<String, Value>,
        error: &(dyn Error + Send + Sync + 'static),
    ) {
        let record = Value::Object(with_bound(&self.bound, fields));
        let error: &(dyn Error + 'static) = error;
        event_at!(level, record = %record, error = error, "{}", error);
    }

    fn child(&self, fields: Map<String, Value>) -> Arc<dyn LogSink> {
        Arc::new(Self {
            bound: Arc::new(with_bound(&self.bound, fields)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tracing_test::traced_test;

    fn fields(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }

    #[test]
    #[traced_test]
    fn test_emit_writes_record_and_message() {
        let sink = TracingSink::new();
        sink.emit(Severity::Warn, fields(json!({"req_id": "r1"})), "disk almost full");

        assert!(logs_contain("WARN"));
        assert!(logs_contain("disk almost full"));
        assert!(logs_contain(r#"{"req_id":"r1"}"#));
    }

    #[test]
    #[traced_test]
    fn test_fatal_is_flagged() {
        TracingSink::new().emit(Severity::Fatal, Map::new(), "going down");

        assert!(logs_contain("ERROR"));
        assert!(logs_contain("fatal=true"));
    }

    #[test]
    #[traced_test]
    fn test_child_carries_bound_fields() {
        let child = TracingSink::new().child(fields(json!({"req_id": "abc"})));
        child.emit(Severity::Info, fields(json!({"step": 2})), "bound");

        assert!(logs_contain(r#""req_id":"abc""#));
        assert!(logs_contain(r#""step":2"#));
    }

    #[test]
    #[traced_test]
    fn test_emit_error_uses_error_display() {
        let err = std::io::Error::other("fail");
        TracingSink::new().emit_error(Severity::Error, Map::new(), &err);

        assert!(logs_contain("ERROR"));
        assert!(logs_contain("fail"));
    }
}
