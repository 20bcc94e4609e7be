//! In-memory sink that captures every record, per level.

use std::error::Error;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde_json::{Map, Value};

use crate::normalize::Severity;
use crate::sink::{with_bound, LogSink};

/// One captured call.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub level: Severity,
    pub fields: Map<String, Value>,
    pub message: String,
    /// Display form of the error for `emit_error` calls.
    pub error: Option<String>,
}

/// Children share the parent's storage, so everything written through a
/// request logger is visible on the root sink.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    entries: Arc<Mutex<Vec<Entry>>>,
    bound: Map<String, Value>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<Entry> {
        self.lock().clone()
    }

    /// Entries written at exactly `level`.
    pub fn at(&self, level: Severity) -> Vec<Entry> {
        self.entries()
            .into_iter()
            .filter(|entry| entry.level == level)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    // A writer that panicked mid-push leaves the Vec intact, so keep going.
    fn lock(&self) -> MutexGuard<'_, Vec<Entry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn push(&self, entry: Entry) {
        self.lock().push(entry);
    }
}

impl LogSink for MemorySink {
    fn emit(&self, level: Severity, fields: Map<String, Value>, message: &str) {
        self.push(Entry {
            level,
            fields: with_bound(&self.bound, fields),
            message: message.to_string(),
            error: None,
        });
    }

    fn emit_error(
        &self,
        level: Severity,
        fields: Map<String, Value>,
        error: &(dyn Error + Send + Sync + 'static),
    ) {
        self.push(Entry {
            level,
            fields: with_bound(&self.bound, fields),
            message: String::new(),
            error: Some(error.to_string()),
        });
    }

    fn child(&self, fields: Map<String, Value>) -> Arc<dyn LogSink> {
        Arc::new(Self {
            entries: self.entries.clone(),
            bound: with_bound(&self.bound, fields),
        })
    }
}
