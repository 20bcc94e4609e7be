//! Options controlling how payloads become records.

use serde::{Deserialize, Serialize};

/// Normalization options, resolved once at setup.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct NormalizeOptions {
    /// Attach the tag list to the record as `tags`.
    pub include_tags: bool,

    /// Join tags into one string with this separator instead of an array.
    pub join_tags: Option<String>,

    /// Attach non-string payload data at all.
    pub include_data: bool,

    /// Merge object-shaped data into the record's top level instead of
    /// nesting it under `data`.
    pub merge_data: bool,

    /// Suppress notifications without usable data instead of emitting an
    /// empty message.
    pub skip_undefined: bool,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            include_tags: false,
            join_tags: None,
            include_data: true,
            merge_data: false,
            skip_undefined: true,
        }
    }
}
