//! Metrics recorder for health checks
//!
//! Records collection results and publish attempts through the `metrics`
//! facade. Without an installed recorder every call is a no-op.

use crate::collector::HealthMetrics;
use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

static METRICS_INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Initialize metric descriptions (call once at startup)
pub fn init_metrics() {
    if METRICS_INITIALIZED.swap(true, Ordering::SeqCst) {
        return; // Already initialized
    }

    // Collection
    describe_counter!(
        "model_health_collections_total",
        "Total number of model snapshots collected"
    );
    describe_gauge!(
        "model_health_elements",
        "Placed elements in the last collected model"
    );
    describe_gauge!(
        "model_health_warnings",
        "Active warnings in the last collected model"
    );
    describe_gauge!(
        "model_health_families",
        "Distinct families with at least one instance in the last collected model"
    );

    // Publishing
    describe_counter!(
        "model_health_publish_attempts_total",
        "Total number of publish attempts"
    );
    describe_counter!(
        "model_health_publish_failures_total",
        "Total number of publish attempts that failed"
    );
    describe_histogram!(
        "model_health_publish_duration_seconds",
        "Time from serialization to response"
    );
    describe_histogram!(
        "model_health_payload_bytes",
        "Size of the JSON payload sent to the ingestion endpoint"
    );
}

/// Record the result of one collection
pub fn record_collection(metrics: &HealthMetrics) {
    counter!("model_health_collections_total").increment(1);
    gauge!("model_health_elements").set(metrics.total_elements() as f64);
    gauge!("model_health_warnings").set(metrics.warning_count() as f64);
    gauge!("model_health_families").set(metrics.family_instance_counts().len() as f64);
}

/// Record a publish attempt that reached a 2xx response
pub fn record_publish_succeeded(status: u16, duration: Duration, payload_bytes: usize) {
    histogram!("model_health_publish_duration_seconds", "status" => status.to_string())
        .record(duration.as_secs_f64());
    histogram!("model_health_payload_bytes").record(payload_bytes as f64);
}

/// Record a failed publish attempt
pub fn record_publish_failed(reason: &str, duration: Duration) {
    counter!("model_health_publish_failures_total", "reason" => reason.to_string()).increment(1);
    histogram!("model_health_publish_duration_seconds", "status" => "error")
        .record(duration.as_secs_f64());
}

/// Times a single publish attempt
pub struct PublishTimer {
    start_time: Instant,
}

impl PublishTimer {
    /// Start tracking a new attempt
    pub fn start() -> Self {
        counter!("model_health_publish_attempts_total").increment(1);
        Self {
            start_time: Instant::now(),
        }
    }

    /// Mark the attempt as delivered
    pub fn complete(self, status: u16, payload_bytes: usize) -> Duration {
        let duration = self.start_time.elapsed();
        record_publish_succeeded(status, duration, payload_bytes);
        duration
    }

    /// Mark the attempt as failed
    pub fn fail(self, reason: &str) -> Duration {
        let duration = self.start_time.elapsed();
        record_publish_failed(reason, duration);
        duration
    }

    /// Get current duration
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}
