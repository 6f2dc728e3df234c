//! Metrics collection
//!
//! Walks a [`ModelSnapshot`](crate::model::ModelSnapshot) once and produces a
//! [`HealthMetrics`] record:
//! - total placed elements (types excluded)
//! - active warning count, as reported by the host
//! - instance count per family name

mod collector;
mod error;
mod types;

pub use collector::{collect, MetricsCollector};
pub use error::{CollectorError, CollectorResult, HealthError};
pub use types::{FamilyCounts, HealthMetrics};
