//! Per-notification decision context.

use std::fmt;
use std::sync::Arc;

use crate::normalize::options::NormalizeOptions;
use crate::normalize::severity::Severity;
use crate::sink::LogSink;

/// Mutable state handed to the override hook.
///
/// Built fresh for every notification from the normalizer's resolved options;
/// whatever the hook changes here is seen by the mapping step for this one
/// notification and then dropped.
pub struct Decision {
    /// Level the record will be written at.
    pub level: Severity,
    /// Working copy of the normalization options.
    pub options: NormalizeOptions,
    /// Sink the record goes to. A hook may swap it to reroute.
    pub logger: Arc<dyn LogSink>,
}

impl fmt::Debug for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Decision")
            .field("level", &self.level)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
