//! Model health metrics
//!
//! Collects summary statistics from a CAD document snapshot and pushes them
//! as JSON to a dashboard ingestion endpoint.

pub mod collector;
pub mod command;
pub mod config;
pub mod metrics;
pub mod model;
pub mod publisher;

pub use collector::{collect, HealthMetrics, MetricsCollector};
pub use command::{CommandError, CommandReport, ExternalCommand, ModelHealthCommand};
pub use config::{AppConfig, IngestionEndpoint};
pub use model::{DocumentSnapshot, ModelSnapshot};
pub use publisher::{PublishError, TelemetryPublisher};
