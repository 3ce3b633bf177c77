use std::sync::Arc;
use std::time::Duration;

/// Structured, in-process event hook for observability.
///
/// This crate is a library; emitting logs directly (e.g. `println!`) is not
/// acceptable for production. Callers can provide an implementation that
/// forwards these events to `tracing`, `log`, metrics, or custom sinks.
pub trait StoreEventListener: std::fmt::Debug + Send + Sync + 'static {
    fn on_event(&self, event: StoreEvent);
}

/// Structured events emitted by the engine.
#[derive(Debug, Clone)]
pub enum StoreEvent {
    /// A new field id was issued and durably recorded.
    FieldAllocated {
        database: String,
        series: String,
        field: String,
        id: u64,
    },
    /// A write batch committed.
    SeriesWritten {
        database: String,
        series: String,
        points: u64,
    },
    /// A query scan finished and its result was yielded.
    ScanFinished {
        database: String,
        series: String,
        points: u64,
    },
}

#[derive(Debug)]
pub struct NoopEventListener;

impl StoreEventListener for NoopEventListener {
    #[inline]
    fn on_event(&self, _event: StoreEvent) {}
}

pub fn noop_event_listener() -> Arc<dyn StoreEventListener> {
    Arc::new(NoopEventListener)
}

/// Metrics instrumentation behind the `metrics` facade.
///
/// Library-safe: every recording call is effectively a no-op until the
/// embedding application installs a recorder.
pub mod store_metrics {
    use super::*;

    use ::metrics::{describe_counter, describe_histogram, Unit};

    // Counters are exposed as `<name>_total` by Prometheus-style exporters.
    pub const WRITE_POINTS: &str = "seriate_write_points";
    pub const WRITE_BATCHES: &str = "seriate_write_batches";
    pub const WRITE_DURATION_SECONDS: &str = "seriate_write_duration_seconds";

    pub const QUERY_POINTS: &str = "seriate_query_points";
    pub const QUERY_DURATION_SECONDS: &str = "seriate_query_duration_seconds";

    #[inline]
    pub fn record_write(duration: Duration, points: u64) {
        ::metrics::counter!(WRITE_BATCHES).increment(1);
        if points > 0 {
            ::metrics::counter!(WRITE_POINTS).increment(points);
        }
        ::metrics::histogram!(WRITE_DURATION_SECONDS).record(duration.as_secs_f64());
    }

    #[inline]
    pub fn record_query(duration: Duration, points: u64) {
        if points > 0 {
            ::metrics::counter!(QUERY_POINTS).increment(points);
        }
        ::metrics::histogram!(QUERY_DURATION_SECONDS).record(duration.as_secs_f64());
    }

    /// Registers metric descriptions with the installed recorder. Optional;
    /// calling it more than once is harmless.
    pub fn describe_all() {
        describe_counter!(
            WRITE_POINTS,
            Unit::Count,
            "Total number of points committed by write batches."
        );
        describe_counter!(
            WRITE_BATCHES,
            Unit::Count,
            "Total number of committed write batches."
        );
        describe_counter!(
            QUERY_POINTS,
            Unit::Count,
            "Total number of points assembled and yielded by queries."
        );

        describe_histogram!(
            WRITE_DURATION_SECONDS,
            Unit::Seconds,
            "End-to-end duration of write calls (id resolution + batch commit)."
        );
        describe_histogram!(
            QUERY_DURATION_SECONDS,
            Unit::Seconds,
            "End-to-end duration of query calls (scan + filter + yield)."
        );
    }
}
