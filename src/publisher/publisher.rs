use crate::collector::HealthMetrics;
use crate::config::{AppConfig, IngestionEndpoint};
use crate::metrics::PublishTimer;
use crate::publisher::error::{PublishError, PublishResult};
use crate::publisher::payload::{self, CONTENT_TYPE};
use crate::publisher::state_machine::PublishStateMachine;
use crate::publisher::types::{PublishEvent, PublishReceipt};
use std::time::Duration;

/// Pushes [`HealthMetrics`] to the dashboard ingestion endpoint.
///
/// Every call is a single attempt with its own HTTP client; nothing is
/// retried and nothing is kept between calls.
#[derive(Debug, Clone)]
pub struct TelemetryPublisher {
    endpoint: IngestionEndpoint,
    timeout: Duration,
}

impl TelemetryPublisher {
    pub fn new(endpoint: IngestionEndpoint, timeout: Duration) -> Self {
        Self { endpoint, timeout }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.endpoint.clone(), config.timeout)
    }

    pub fn endpoint(&self) -> &IngestionEndpoint {
        &self.endpoint
    }

    /// Serialize and post `metrics` once.
    pub async fn publish(&self, metrics: &HealthMetrics) -> PublishResult<PublishReceipt> {
        self.publish_tracked(metrics, &PublishStateMachine::new())
            .await
    }

    /// Like [`publish`](Self::publish), reporting progress through `machine`.
    pub async fn publish_tracked(
        &self,
        metrics: &HealthMetrics,
        machine: &PublishStateMachine,
    ) -> PublishResult<PublishReceipt> {
        machine.transition(PublishEvent::Start)?;
        let timer = PublishTimer::start();

        let body = match payload::encode(metrics) {
            Ok(body) => body,
            Err(e) => return Err(Self::fail(machine, timer, e.into())),
        };
        let payload_bytes = body.len();
        machine.transition(PublishEvent::Encoded {
            bytes: payload_bytes,
        })?;

        tracing::info!(
            "Publishing {} byte payload to {}",
            payload_bytes,
            self.endpoint.redacted()
        );

        let (status, response_body) = match self.send(body).await {
            Ok(response) => response,
            Err(e) => return Err(Self::fail(machine, timer, e)),
        };

        // Every response is reported; the machine decides whether it counts
        let state = machine.transition(PublishEvent::Responded { status })?;
        if !state.is_succeeded() {
            let err = PublishError::HttpStatus {
                status,
                body: response_body,
            };
            return Err(Self::record_failure(timer, err));
        }

        let elapsed = timer.complete(status, payload_bytes);
        tracing::info!("Ingestion endpoint accepted metrics (HTTP {}) in {:?}", status, elapsed);

        Ok(PublishReceipt {
            status,
            payload_bytes,
            elapsed,
        })
    }

    /// Blocking facade over [`publish`](Self::publish).
    ///
    /// The request runs on a dedicated worker thread with its own
    /// current-thread runtime, so this never blocks on the caller's runtime
    /// and is safe to call from a UI thread or from inside async code.
    pub fn publish_blocking(&self, metrics: &HealthMetrics) -> PublishResult<PublishReceipt> {
        self.publish_blocking_tracked(metrics, &PublishStateMachine::new())
    }

    pub fn publish_blocking_tracked(
        &self,
        metrics: &HealthMetrics,
        machine: &PublishStateMachine,
    ) -> PublishResult<PublishReceipt> {
        std::thread::scope(|scope| {
            let worker = std::thread::Builder::new()
                .name("model-health-publish".into())
                .spawn_scoped(scope, || {
                    let runtime = tokio::runtime::Builder::new_current_thread()
                        .enable_all()
                        .build()
                        .map_err(|e| PublishError::Worker(e.to_string()))?;
                    runtime.block_on(self.publish_tracked(metrics, machine))
                })
                .map_err(|e| PublishError::Worker(e.to_string()))?;

            worker
                .join()
                .map_err(|_| PublishError::Worker("publish worker panicked".into()))?
        })
    }

    /// Post once. Redirects are not followed, so a 3xx is returned as is.
    async fn send(&self, body: Vec<u8>) -> PublishResult<(u16, Option<String>)> {
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()?;

        let response = client
            .post(self.endpoint.request_url())
            .header(reqwest::header::CONTENT_TYPE, CONTENT_TYPE)
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok((status.as_u16(), None));
        }

        let body = response.text().await.ok().filter(|b| !b.is_empty());
        Ok((status.as_u16(), body))
    }

    fn fail(machine: &PublishStateMachine, timer: PublishTimer, err: PublishError) -> PublishError {
        if let Err(e) = machine.transition(PublishEvent::Failed {
            reason: err.to_string(),
        }) {
            tracing::warn!("Could not record publish failure: {}", e);
        }
        Self::record_failure(timer, err)
    }

    fn record_failure(timer: PublishTimer, err: PublishError) -> PublishError {
        timer.fail(err.reason());
        tracing::warn!("Publishing metrics failed: {}", err);
        err
    }
}
