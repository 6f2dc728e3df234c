//! Metrics and observability module
//!
//! Instruments the health check itself, not the model.
//!
//! Key metrics exposed:
//! - Collections performed and the last collected counts
//! - Publish attempts, failures by reason
//! - Publish latency and payload size

pub mod exporter;
pub mod recorder;

pub use exporter::{install_recorder, render_metrics, MetricsError};
pub use recorder::{init_metrics, record_collection, PublishTimer};
