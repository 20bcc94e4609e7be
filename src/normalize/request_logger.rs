//! Request-scoped logging handle.

use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::normalize::normalizer::Normalizer;
use crate::normalize::notification::{Notification, Payload};
use crate::normalize::record::Outcome;
use crate::normalize::severity::Severity;
use crate::normalize::tags::Tags;
use crate::sink::LogSink;

/// Logging handle bound to one request id.
///
/// Created when a request starts and dropped with it. Tagged calls go through
/// the normalizer as `request` notifications; the per-level calls skip tag
/// inference and write straight to a child sink bound to `req_id`.
#[derive(Clone)]
pub struct RequestLogger {
    id: Arc<str>,
    sink: Arc<dyn LogSink>,
    normalizer: Arc<Normalizer>,
}

impl RequestLogger {
    pub(crate) fn new(normalizer: Arc<Normalizer>, id: String) -> Self {
        let mut bound = Map::new();
        bound.insert("req_id".to_string(), Value::String(id.clone()));
        let sink = normalizer.logger().child(bound);
        Self {
            id: id.into(),
            sink,
            normalizer,
        }
    }

    /// The request id every record from this handle carries.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Child sink bound to this request's id.
    pub fn sink(&self) -> &Arc<dyn LogSink> {
        &self.sink
    }

    /// Tagged log call; severity is inferred from the tags.
    pub fn log(&self, tags: impl Into<Tags>, data: impl Into<Value>) -> Outcome {
        self.log_payload(tags, Payload::data(data))
    }

    pub fn log_payload(&self, tags: impl Into<Tags>, payload: Payload) -> Outcome {
        self.normalizer
            .normalize(&Notification::request(self.id.as_ref(), tags, payload))
    }

    /// Framework lifecycle event for this request.
    pub fn internal(&self, tags: impl Into<Tags>, data: impl Into<Value>) -> Outcome {
        self.normalizer.normalize(&Notification::request_internal(
            self.id.as_ref(),
            tags,
            Payload::data(data),
        ))
    }

    /// Write directly at `level`.
    pub fn log_at(&self, level: Severity, fields: Map<String, Value>, message: &str) {
        self.sink.emit(level, fields, message);
    }

    pub fn trace(&self, message: impl AsRef<str>) {
        self.log_at(Severity::Trace, Map::new(), message.as_ref());
    }

    pub fn debug(&self, message: impl AsRef<str>) {
        self.log_at(Severity::Debug, Map::new(), message.as_ref());
    }

    pub fn info(&self, message: impl AsRef<str>) {
        self.log_at(Severity::Info, Map::new(), message.as_ref());
    }

    pub fn warn(&self, message: impl AsRef<str>) {
        self.log_at(Severity::Warn, Map::new(), message.as_ref());
    }

    pub fn error(&self, message: impl AsRef<str>) {
        self.log_at(Severity::Error, Map::new(), message.as_ref());
    }

    pub fn fatal(&self, message: impl AsRef<str>) {
        self.log_at(Severity::Fatal, Map::new(), message.as_ref());
    }
}

impl fmt::Debug for RequestLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestLogger").field("id", &self.id).finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::NormalizeOptions;
    use crate::sink::MemorySink;
    use serde_json::json;

    fn setup(options: NormalizeOptions) -> (MemorySink, Arc<Normalizer>) {
        let sink = MemorySink::new();
        let normalizer = Normalizer::builder()
            .logger(sink.clone())
            .options(options)
            .build()
            .unwrap();
        (sink, Arc::new(normalizer))
    }

    #[test]
    fn test_direct_levels_carry_req_id() {
        let (sink, normalizer) = setup(NormalizeOptions::default());
        let log = normalizer.attach("req-1");

        log.trace("test-trace");
        log.error("test-error");
        log.fatal("test-fatal");

        for (level, message) in [
            (Severity::Trace, "test-trace"),
            (Severity::Error, "test-error"),
            (Severity::Fatal, "test-fatal"),
        ] {
            let entries = sink.at(level);
            assert_eq!(entries.len(), 1);
            assert_eq!(entries[0].message, message);
            assert_eq!(entries[0].fields.get("req_id"), Some(&json!("req-1")));
        }
    }

    #[test]
    fn test_direct_levels_ignore_tag_inference() {
        let (sink, normalizer) = setup(NormalizeOptions::default());
        let log = normalizer.attach("req-1");
        let mut fields = Map::new();
        fields.insert("error".into(), json!(true));

        log.log_at(Severity::Debug, fields, "not an error");

        assert_eq!(sink.at(Severity::Debug).len(), 1);
        assert!(sink.at(Severity::Error).is_empty());
    }

    #[test]
    fn test_tagged_log_goes_through_normalizer() {
        let (sink, normalizer) = setup(NormalizeOptions::default());
        let log = normalizer.attach("req-2");

        let outcome = log.log(["tester"], "hello world");
        assert_eq!(outcome.level(), Some(Severity::Info));

        let outcome = log.log(["tester", "warn"], json!({"n": 1}));
        assert_eq!(outcome.level(), Some(Severity::Warn));

        let info = sink.at(Severity::Info);
        assert_eq!(info[0].message, "hello world");
        assert_eq!(info[0].fields.get("req_id"), Some(&json!("req-2")));
        assert_eq!(sink.at(Severity::Warn)[0].fields.get("data"), Some(&json!({"n": 1})));
    }

    #[test]
    fn test_internal_defaults_to_debug() {
        let (sink, normalizer) = setup(NormalizeOptions::default());
        let outcome = normalizer.attach("req-3").internal(["received"], "GET /");

        assert_eq!(outcome.level(), Some(Severity::Debug));
        assert_eq!(sink.at(Severity::Debug)[0].message, "GET /");
    }

    #[test]
    fn test_handles_are_independent() {
        let (sink, normalizer) = setup(NormalizeOptions::default());
        let a = normalizer.attach("a");
        let b = normalizer.attach("b");

        a.info("from a");
        b.info("from b");
        drop(a);
        b.info("still b");

        let ids: Vec<_> = sink
            .entries()
            .into_iter()
            .map(|entry| entry.fields["req_id"].clone())
            .collect();
        assert_eq!(ids, vec![json!("a"), json!("b"), json!("b")]);
    }
}
