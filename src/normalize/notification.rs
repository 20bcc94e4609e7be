//! Notifications delivered by the host framework.

use std::error::Error;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::normalize::severity::Severity;
use crate::normalize::tags::Tags;

/// Shared error value carried by error payloads.
pub type SharedError = Arc<dyn Error + Send + Sync + 'static>;

/// Which framework event produced a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    /// Server-wide log event, no request attached.
    Generic,
    /// Per-request log call made by application code.
    Request,
    /// Framework lifecycle event for a request (received, response, ...).
    RequestInternal,
    /// Error raised while handling a request.
    RequestError,
}

impl NotificationKind {
    /// Level used when no severity tag is present.
    pub fn default_severity(&self) -> Severity {
        match self {
            NotificationKind::Generic | NotificationKind::Request => Severity::Info,
            NotificationKind::RequestInternal => Severity::Debug,
            NotificationKind::RequestError => Severity::Error,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Generic => "log",
            NotificationKind::Request => "request",
            NotificationKind::RequestInternal => "request-internal",
            NotificationKind::RequestError => "request-error",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Notification body.
#[derive(Clone)]
pub enum Payload {
    /// Log event whose `data` member may be absent.
    Event { data: Option<Value> },
    /// The payload is itself an error value.
    Error(SharedError),
}

impl Payload {
    pub fn data(data: impl Into<Value>) -> Self {
        Payload::Event {
            data: Some(data.into()),
        }
    }

    /// An event without a `data` member.
    pub fn empty() -> Self {
        Payload::Event { data: None }
    }

    pub fn error<E>(error: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        Payload::Error(Arc::new(error))
    }
}

impl fmt::Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payload::Event { data } => f.debug_struct("Event").field("data", data).finish(),
            Payload::Error(err) => f.debug_tuple("Error").field(&err.to_string()).finish(),
        }
    }
}

/// One framework-originated event.
#[derive(Debug, Clone)]
pub struct Notification {
    pub kind: NotificationKind,
    pub request_id: Option<String>,
    /// `None` models a null payload; such notifications are ignored.
    pub payload: Option<Payload>,
    pub tags: Tags,
}

impl Notification {
    /// Server-wide log event.
    pub fn generic(tags: impl Into<Tags>, payload: Payload) -> Self {
        Self {
            kind: NotificationKind::Generic,
            request_id: None,
            payload: Some(payload),
            tags: tags.into(),
        }
    }

    /// Per-request log event.
    pub fn request(request_id: impl Into<String>, tags: impl Into<Tags>, payload: Payload) -> Self {
        Self {
            kind: NotificationKind::Request,
            request_id: Some(request_id.into()),
            payload: Some(payload),
            tags: tags.into(),
        }
    }

    /// Framework lifecycle event for a request.
    pub fn request_internal(
        request_id: impl Into<String>,
        tags: impl Into<Tags>,
        payload: Payload,
    ) -> Self {
        Self {
            kind: NotificationKind::RequestInternal,
            request_id: Some(request_id.into()),
            payload: Some(payload),
            tags: tags.into(),
        }
    }

    /// Handler failure. The payload is always the error itself.
    pub fn request_error(request_id: impl Into<String>, error: SharedError) -> Self {
        Self {
            kind: NotificationKind::RequestError,
            request_id: Some(request_id.into()),
            payload: Some(Payload::Error(error)),
            tags: Tags::from(["internal", "implementation", "error"]),
        }
    }
}
