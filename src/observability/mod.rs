//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! The crate's own diagnostics:
//!     → logging.rs (tracing subscriber, pretty or JSON)
//!
//! Every normalized notification:
//!     → metrics.rs (counter by kind and outcome)
//!     → Prometheus scrape endpoint when enabled
//! ```
//!
//! # Design Decisions
//! - Subscriber install is idempotent so tests and embedders can call it freely
//! - RUST_LOG wins over the configured filter
//! - Metric updates are no-ops until a recorder is installed

pub mod logging;
pub mod metrics;
