use crate::collector::error::CollectorResult;
use crate::collector::types::{FamilyCounts, HealthMetrics};
use crate::model::ModelSnapshot;

/// Computes [`HealthMetrics`] from a model snapshot. Holds no state.
pub struct MetricsCollector;

impl MetricsCollector {
    pub fn collect<M: ModelSnapshot + ?Sized>(model: &M) -> CollectorResult<HealthMetrics> {
        let elements = model.elements()?;
        let warnings = model.warnings()?;

        let total_elements = elements.iter().filter(|e| e.is_instance()).count() as u64;
        let families: FamilyCounts = elements.iter().filter_map(|e| e.family_name()).collect();

        tracing::debug!(
            "Collected {} elements, {} warnings, {} families from '{}'",
            total_elements,
            warnings.len(),
            families.len(),
            model.title()
        );

        Ok(HealthMetrics::new(
            total_elements,
            warnings.len() as u64,
            families,
        ))
    }
}

/// Shorthand for [`MetricsCollector::collect`].
pub fn collect<M: ModelSnapshot + ?Sized>(model: &M) -> CollectorResult<HealthMetrics> {
    MetricsCollector::collect(model)
}
