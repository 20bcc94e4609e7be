//! Event normalizer.
//!
//! # Responsibilities
//! - Resolve one severity per notification (tags first, then kind default)
//! - Run the optional override hook against a fresh decision context
//! - Map the payload to a structured record, or suppress it
//! - Forward the record to the decided sink at the decided level
//!
//! # Design Decisions
//! - Error payloads bypass field mapping and use the sink's error formatting
//! - Non-object data never fails a merge; it is attached whole under `data`
//! - Hook panics are not caught

use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::normalize::decision::Decision;
use crate::normalize::notification::{Notification, NotificationKind, Payload};
use crate::normalize::options::NormalizeOptions;
use crate::normalize::record::{Outcome, Record};
use crate::normalize::request_logger::RequestLogger;
use crate::normalize::severity::Severity;
use crate::normalize::tags::Tags;
use crate::observability::metrics;
use crate::sink::LogSink;

/// Caller-supplied hook. Returning `true` means the caller handled the
/// notification and nothing is emitted.
pub type OverrideHook = Arc<dyn Fn(&mut Decision, &Notification) -> bool + Send + Sync>;

/// Error raised while building a [`Normalizer`].
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    #[error("logger required")]
    MissingLogger,
}

/// Pick the level for a notification.
///
/// `RequestError` is always `Error`. Otherwise the highest severity tag wins
/// (fatal, error, warn, info, debug, trace) and the kind default applies when
/// no severity tag is present.
pub fn resolve_severity(kind: NotificationKind, tags: &Tags) -> Severity {
    if kind == NotificationKind::RequestError {
        return Severity::Error;
    }
    tags.severity().unwrap_or_else(|| kind.default_severity())
}

/// Turns framework notifications into structured records.
pub struct Normalizer {
    logger: Arc<dyn LogSink>,
    hook: Option<OverrideHook>,
    options: NormalizeOptions,
}

impl Normalizer {
    pub fn builder() -> NormalizerBuilder {
        NormalizerBuilder::default()
    }

    pub fn options(&self) -> &NormalizeOptions {
        &self.options
    }

    pub fn logger(&self) -> &Arc<dyn LogSink> {
        &self.logger
    }

    /// Create the logging handle for one request.
    pub fn attach(self: &Arc<Self>, request_id: impl Into<String>) -> RequestLogger {
        RequestLogger::new(self.clone(), request_id.into())
    }

    /// Raise a server-wide log notification.
    pub fn log(&self, tags: impl Into<Tags>, data: impl Into<Value>) -> Outcome {
        self.normalize(&Notification::generic(tags, Payload::data(data)))
    }

    /// Process one notification.
    pub fn normalize(&self, notification: &Notification) -> Outcome {
        let outcome = self.process(notification);
        metrics::record_notification(notification.kind, &outcome);
        outcome
    }

    fn process(&self, notification: &Notification) -> Outcome {
        let Some(payload) = &notification.payload else {
            return Outcome::Ignored;
        };

        let mut decision = Decision {
            level: resolve_severity(notification.kind, &notification.tags),
            options: self.options.clone(),
            logger: self.logger.clone(),
        };

        if let Some(hook) = &self.hook {
            if hook(&mut decision, notification) {
                tracing::trace!(kind = %notification.kind, "Notification handled by override hook");
                return Outcome::Vetoed;
            }
        }

        map_payload(decision, notification, payload)
    }
}

impl fmt::Debug for Normalizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Normalizer")
            .field("options", &self.options)
            .field("hook", &self.hook.is_some())
            .finish_non_exhaustive()
    }
}

/// Builder for [`Normalizer`]. A logger is required.
#[derive(Default)]
pub struct NormalizerBuilder {
    logger: Option<Arc<dyn LogSink>>,
    hook: Option<OverrideHook>,
    options: NormalizeOptions,
}

impl NormalizerBuilder {
    pub fn logger(mut self, logger: impl LogSink + 'static) -> Self {
        self.logger = Some(Arc::new(logger));
        self
    }

    pub fn shared_logger(mut self, logger: Arc<dyn LogSink>) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn hook<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut Decision, &Notification) -> bool + Send + Sync + 'static,
    {
        self.hook = Some(Arc::new(hook));
        self
    }

    pub fn options(mut self, options: NormalizeOptions) -> Self {
        self.options = options;
        self
    }

    pub fn build(self) -> Result<Normalizer, SetupError> {
        let logger = self.logger.ok_or(SetupError::MissingLogger)?;
        Ok(Normalizer {
            logger,
            hook: self.hook,
            options: self.options,
        })
    }
}

fn map_payload(decision: Decision, notification: &Notification, payload: &Payload) -> Outcome {
    let Decision {
        level,
        options,
        logger,
    } = decision;

    let mut fields = Map::new();

    if options.include_tags {
        let labels = &notification.tags.labels;
        let tags = match &options.join_tags {
            Some(separator) => Value::String(labels.join(separator)),
            None => Value::from(labels.clone()),
        };
        fields.insert("tags".to_string(), tags);
    }

    if let Some(id) = &notification.request_id {
        fields.insert("req_id".to_string(), Value::String(id.clone()));
    }

    let data = match payload {
        Payload::Error(error) => {
            logger.emit_error(level, fields, error.as_ref());
            return Outcome::Delegated { level };
        }
        Payload::Event { data } => data.as_ref(),
    };

    let mut message = String::new();
    match data {
        Some(Value::String(text)) => message = text.clone(),
        Some(value) if options.include_data => match value {
            Value::Object(map) if options.merge_data => merge_data(&mut fields, map),
            other => {
                fields.insert("data".to_string(), other.clone());
            }
        },
        _ if options.skip_undefined => return Outcome::Skipped,
        _ => {}
    }

    let record = Record { fields, message };
    logger.emit(level, record.fields.clone(), &record.message);
    Outcome::Emitted { level, record }
}

/// Merge object data into the record's top level. The request id is never
/// replaced, and a merged `id` equal to it is dropped.
fn merge_data(fields: &mut Map<String, Value>, data: &Map<String, Value>) {
    let req_id = fields.get("req_id").cloned();
    for (key, value) in data {
        if key == "req_id" && req_id.is_some() {
            continue;
        }
        fields.insert(key.clone(), value.clone());
    }
    if req_id.is_some() && data.get("id") == req_id.as_ref() {
        fields.remove("id");
    }
}
