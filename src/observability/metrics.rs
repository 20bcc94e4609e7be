//! Metrics collection and exposition.
//!
//! # Metrics
//! - `log_bridge_notifications_total` (counter): notifications by kind and outcome

use std::net::SocketAddr;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

use crate::normalize::{NotificationKind, Outcome};

pub const NOTIFICATIONS_TOTAL: &str = "log_bridge_notifications_total";

/// Install the Prometheus recorder and its scrape listener.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    ::metrics::describe_counter!(NOTIFICATIONS_TOTAL, "Framework notifications seen by the normalizer");
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

pub fn record_notification(kind: NotificationKind, outcome: &Outcome) {
    ::metrics::counter!(
        NOTIFICATIONS_TOTAL,
        "kind" => kind.as_str(),
        "outcome" => outcome.as_str()
    )
    .increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::{NormalizeOptions, Normalizer, Severity};
    use crate::sink::MemorySink;
    use metrics_util::debugging::{DebugValue, DebuggingRecorder};

    type Counter = (String, Vec<(String, String)>, u64);

    fn counters(recorder: &DebuggingRecorder, f: impl FnOnce()) -> Vec<Counter> {
        let snapshotter = recorder.snapshotter();
        ::metrics::with_local_recorder(recorder, f);

        let mut counters: Vec<_> = snapshotter
            .snapshot()
            .into_vec()
            .into_iter()
            .filter_map(|(composite, _, _, value)| {
                let key = composite.key();
                let labels = key
                    .labels()
                    .map(|label| (label.key().to_string(), label.value().to_string()))
                    .collect();
                match value {
                    DebugValue::Counter(count) => Some((key.name().to_string(), labels, count)),
                    _ => None,
                }
            })
            .collect();
        counters.sort();
        counters
    }

    fn labels(kind: &str, outcome: &str) -> Vec<(String, String)> {
        vec![
            ("kind".to_string(), kind.to_string()),
            ("outcome".to_string(), outcome.to_string()),
        ]
    }

    #[test]
    fn test_record_notification_labels() {
        let recorder = DebuggingRecorder::new();
        let counters = counters(&recorder, || {
            record_notification(NotificationKind::Request, &Outcome::Skipped);
            record_notification(NotificationKind::Request, &Outcome::Skipped);
            record_notification(
                NotificationKind::RequestError,
                &Outcome::Delegated { level: Severity::Error },
            );
        });

        assert_eq!(
            counters,
            vec![
                (NOTIFICATIONS_TOTAL.to_string(), labels("request", "skipped"), 2),
                (NOTIFICATIONS_TOTAL.to_string(), labels("request-error", "delegated"), 1),
            ]
        );
    }

    #[test]
    fn test_normalizer_counts_every_notification() {
        let normalizer = Normalizer::builder()
            .logger(MemorySink::new())
            .options(NormalizeOptions::default())
            .build()
            .unwrap();
        let recorder = DebuggingRecorder::new();
        let counters = counters(&recorder, || {
            normalizer.log(["boot"], "up");
            normalizer.log(["boot"], serde_json::Value::Null);
        });

        assert_eq!(
            counters,
            vec![(NOTIFICATIONS_TOTAL.to_string(), labels("log", "emitted"), 2)]
        );
    }
}
