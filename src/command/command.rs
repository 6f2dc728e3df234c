use crate::collector::{HealthMetrics, MetricsCollector};
use crate::command::error::CommandResult;
use crate::command::presenter::{LogPresenter, SummaryPresenter};
use crate::metrics::record_collection;
use crate::model::ModelSnapshot;
use crate::publisher::{payload, PublishReceipt, PublishStateMachine, TelemetryPublisher};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Entry point a host adapter invokes with the active document.
pub trait ExternalCommand {
    fn name(&self) -> &str;

    fn execute(&self, model: &dyn ModelSnapshot) -> CommandResult<CommandReport>;
}

/// Result of a successful invocation.
#[derive(Debug, Clone, Serialize)]
pub struct CommandReport {
    pub invocation_id: Uuid,
    pub metrics: HealthMetrics,
    pub receipt: PublishReceipt,
    pub completed_at: DateTime<Utc>,
}

/// Collect and encode without publishing. Returns the metrics and the exact
/// body that would be posted.
pub fn preview(model: &dyn ModelSnapshot) -> CommandResult<(HealthMetrics, String)> {
    let metrics = MetricsCollector::collect(model)?;
    let body = payload::encode_to_string(&metrics)?;
    Ok((metrics, body))
}

/// Collect, show the summary, publish. Strictly in that order.
pub struct ModelHealthCommand<P = LogPresenter> {
    publisher: TelemetryPublisher,
    presenter: P,
}

impl ModelHealthCommand<LogPresenter> {
    pub fn new(publisher: TelemetryPublisher) -> Self {
        Self {
            publisher,
            presenter: LogPresenter,
        }
    }
}

impl<P: SummaryPresenter> ModelHealthCommand<P> {
    pub fn with_presenter(publisher: TelemetryPublisher, presenter: P) -> Self {
        Self {
            publisher,
            presenter,
        }
    }

    pub fn publisher(&self) -> &TelemetryPublisher {
        &self.publisher
    }

    /// Run the command, reporting publish progress through `machine`.
    pub fn execute_tracked(
        &self,
        model: &dyn ModelSnapshot,
        machine: &PublishStateMachine,
    ) -> CommandResult<CommandReport> {
        let invocation_id = Uuid::new_v4();
        let span = tracing::info_span!("model_health", %invocation_id);
        let _guard = span.enter();

        tracing::info!("Collecting health metrics for '{}'", model.title());
        let metrics = MetricsCollector::collect(model)?;
        record_collection(&metrics);

        self.presenter.present(model.title(), &metrics);

        let receipt = self.publisher.publish_blocking_tracked(&metrics, machine)?;

        Ok(CommandReport {
            invocation_id,
            metrics,
            receipt,
            completed_at: Utc::now(),
        })
    }
}

impl<P: SummaryPresenter> ExternalCommand for ModelHealthCommand<P> {
    fn name(&self) -> &str {
        "ModelHealthMetrics"
    }

    fn execute(&self, model: &dyn ModelSnapshot) -> CommandResult<CommandReport> {
        self.execute_tracked(model, &PublishStateMachine::new())
    }
}
