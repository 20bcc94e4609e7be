//! Structured records and per-notification outcomes.

use serde_json::{Map, Value};

use crate::normalize::severity::Severity;

/// The structured value handed to a sink.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    pub fields: Map<String, Value>,
    pub message: String,
}

impl Record {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }
}

/// What `Normalizer::normalize` did with a notification.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Null payload; nothing ran.
    Ignored,
    /// The override hook took ownership of the notification.
    Vetoed,
    /// No usable data and `skip_undefined` was on.
    Skipped,
    /// The record was emitted at `level`.
    Emitted { level: Severity, record: Record },
    /// The error payload went to the sink's own error formatting.
    Delegated { level: Severity },
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Ignored => "ignored",
            Outcome::Vetoed => "vetoed",
            Outcome::Skipped => "skipped",
            Outcome::Emitted { .. } => "emitted",
            Outcome::Delegated { .. } => "delegated",
        }
    }

    /// Level the notification went out at, if anything was written.
    pub fn level(&self) -> Option<Severity> {
        match self {
            Outcome::Emitted { level, .. } | Outcome::Delegated { level } => Some(*level),
            _ => None,
        }
    }

    pub fn record(&self) -> Option<&Record> {
        match self {
            Outcome::Emitted { record, .. } => Some(record),
            _ => None,
        }
    }
}
