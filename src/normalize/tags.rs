//! Notification tags.
//!
//! A tag list mixes two concerns: severity markers (`error`, `warn`, ...)
//! used to pick a level, and free-form labels attached to the record when
//! `include_tags` is on. Both are kept: six flags for the severities and the
//! ordered list of every name as given.

use crate::normalize::severity::Severity;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tags {
    pub trace: bool,
    pub debug: bool,
    pub info: bool,
    pub warn: bool,
    pub error: bool,
    pub fatal: bool,
    /// Every tag name in the order it was given, severity markers included.
    pub labels: Vec<String>,
}

impl Tags {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        names.into_iter().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Whether the severity marker for `level` is present.
    pub fn has(&self, level: Severity) -> bool {
        match level {
            Severity::Trace => self.trace,
            Severity::Debug => self.debug,
            Severity::Info => self.info,
            Severity::Warn => self.warn,
            Severity::Error => self.error,
            Severity::Fatal => self.fatal,
        }
    }

    /// Highest-precedence severity marker, if any.
    ///
    /// Checked fatal, error, warn, info, debug, trace; first match stops.
    pub fn severity(&self) -> Option<Severity> {
        Severity::PRECEDENCE
            .into_iter()
            .find(|level| self.has(*level))
    }

    fn push(&mut self, name: String) {
        if let Ok(level) = name.parse::<Severity>() {
            match level {
                Severity::Trace => self.trace = true,
                Severity::Debug => self.debug = true,
                Severity::Info => self.info = true,
                Severity::Warn => self.warn = true,
                Severity::Error => self.error = true,
                Severity::Fatal => self.fatal = true,
            }
        }
        self.labels.push(name);
    }
}

impl<S: Into<String>> FromIterator<S> for Tags {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut tags = Tags::default();
        for name in iter {
            tags.push(name.into());
        }
        tags
    }
}

impl<S: Into<String>, const N: usize> From<[S; N]> for Tags {
    fn from(names: [S; N]) -> Self {
        names.into_iter().collect()
    }
}

impl From<Vec<String>> for Tags {
    fn from(names: Vec<String>) -> Self {
        names.into_iter().collect()
    }
}
