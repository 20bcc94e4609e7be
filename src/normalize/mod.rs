//! Event normalization subsystem.
//!
//! # Data Flow
//! ```text
//! framework notification (kind, request id, payload, tags)
//!     → severity.rs / tags.rs (one level: highest tag, else kind default)
//!     → decision.rs (fresh mutable context: level, options, sink)
//!     → override hook (may mutate, may veto)
//!     → normalizer.rs (payload → Record, or skip)
//!     → LogSink at the decided level
//!
//! request start
//!     → Normalizer::attach → RequestLogger (child sink bound to req_id)
//! ```

pub mod decision;
pub mod normalizer;
pub mod notification;
pub mod options;
pub mod record;
pub mod request_logger;
pub mod severity;
pub mod tags;

pub use decision::Decision;
pub use normalizer::{resolve_severity, Normalizer, NormalizerBuilder, OverrideHook, SetupError};
pub use notification::{Notification, NotificationKind, Payload, SharedError};
pub use options::NormalizeOptions;
pub use record::{Outcome, Record};
pub use request_logger::RequestLogger;
pub use severity::Severity;
pub use tags::Tags;
