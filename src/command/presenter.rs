use crate::collector::HealthMetrics;

/// Shows the collected summary to the user before anything is published.
///
/// This is the host's UI; the crate itself only ships [`LogPresenter`].
pub trait SummaryPresenter {
    fn present(&self, title: &str, metrics: &HealthMetrics);
}

/// Writes the summary to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogPresenter;

impl SummaryPresenter for LogPresenter {
    fn present(&self, title: &str, metrics: &HealthMetrics) {
        tracing::info!(
            "Model health for '{}': {} elements, {} warnings, {} families",
            title,
            metrics.total_elements(),
            metrics.warning_count(),
            metrics.family_instance_counts().len()
        );
    }
}

impl<F> SummaryPresenter for F
where
    F: Fn(&str, &HealthMetrics),
{
    fn present(&self, title: &str, metrics: &HealthMetrics) {
        self(title, metrics)
    }
}
