mod support;

use axum::http::StatusCode;
use model_health::collector::{collect, HealthMetrics};
use model_health::command::{CommandError, ExternalCommand, ModelHealthCommand};
use model_health::config::{ApiKey, AppConfig, FileConfig};
use model_health::model::{DocumentSnapshot, Element, ModelWarning};
use model_health::publisher::{
    payload, PublishError, PublishState, PublishStateMachine, TelemetryPublisher, TransportCause,
};
use std::io::Write;
use std::time::Duration;
use support::{unreachable_endpoint, Dashboard};

const TIMEOUT: Duration = Duration::from_secs(5);

fn doors_and_windows() -> DocumentSnapshot {
    let doors = (0..3).map(|id| Element::family_instance(id, "Door").with_category("Doors"));
    let windows = (3..10).map(|id| Element::family_instance(id, "Window").with_category("Windows"));
    let types = (100..104).map(Element::element_type);

    DocumentSnapshot::new("Office Tower")
        .with_elements(doors.chain(windows).chain(types))
        .with_warnings([
            ModelWarning::new("Highlighted walls overlap").with_elements([1, 2]),
            ModelWarning::new("There are identical instances in the same place").with_elements([4]),
        ])
}

/// Empty model produces the minimal body and is delivered once
#[tokio::test]
async fn test_empty_model_is_published() {
    let dashboard = Dashboard::start(StatusCode::OK, "").await;
    let publisher = TelemetryPublisher::new(dashboard.endpoint(), TIMEOUT);

    let metrics = collect(&DocumentSnapshot::new("Empty")).unwrap();
    let receipt = publisher.publish(&metrics).await.unwrap();

    assert_eq!(receipt.status, 200);

    let received = dashboard.received();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].content_type.as_deref(), Some("application/json"));
    assert_eq!(
        String::from_utf8(received[0].body.clone()).unwrap(),
        r#"{"TotalElements":0,"Warnings":0,"Families":{}}"#
    );
    assert_eq!(receipt.payload_bytes, received[0].body.len());
}

/// Doors and windows arrive with their family counts
#[tokio::test]
async fn test_family_counts_are_published() {
    let dashboard = Dashboard::start(StatusCode::OK, "").await;
    let publisher = TelemetryPublisher::new(dashboard.endpoint(), TIMEOUT);

    let metrics = collect(&doors_and_windows()).unwrap();
    assert_eq!(metrics.total_elements(), 10);
    assert_eq!(metrics.warning_count(), 2);

    publisher.publish(&metrics).await.unwrap();

    let received = dashboard.received();
    let delivered: HealthMetrics = payload::decode(&received[0].body).unwrap();
    assert_eq!(delivered, metrics);
    assert_eq!(delivered.family_count("Door"), Some(3));
    assert_eq!(delivered.family_count("Window"), Some(7));
}

/// The configured access key travels as the `key` query parameter
#[tokio::test]
async fn test_api_key_is_sent() {
    let dashboard = Dashboard::start(StatusCode::OK, "").await;
    let endpoint = dashboard.endpoint().with_api_key(ApiKey::new("abc+123=="));
    let publisher = TelemetryPublisher::new(endpoint, TIMEOUT);

    publisher.publish(&HealthMetrics::default()).await.unwrap();

    let received = dashboard.received();
    assert_eq!(received[0].query.get("key").map(String::as_str), Some("abc+123=="));
}

#[tokio::test]
async fn test_any_2xx_is_success() {
    for status in [StatusCode::CREATED, StatusCode::ACCEPTED, StatusCode::NO_CONTENT] {
        let dashboard = Dashboard::start(status, "").await;
        let publisher = TelemetryPublisher::new(dashboard.endpoint(), TIMEOUT);

        let receipt = publisher.publish(&HealthMetrics::default()).await.unwrap();
        assert_eq!(receipt.status, status.as_u16());
    }
}

/// HTTP 500 is reported with its body and never retried
#[tokio::test]
async fn test_server_error_is_reported_without_retry() {
    let dashboard = Dashboard::start(StatusCode::INTERNAL_SERVER_ERROR, "dataset is locked").await;
    let publisher = TelemetryPublisher::new(dashboard.endpoint(), TIMEOUT);
    let machine = PublishStateMachine::new();

    let err = publisher
        .publish_tracked(&HealthMetrics::default(), &machine)
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), Some(500));
    assert_eq!(err.body(), Some("dataset is locked"));
    assert_eq!(err.cause(), None);
    assert_eq!(dashboard.received().len(), 1);
    assert_eq!(
        machine.current_state(),
        PublishState::Failed {
            error: "HTTP 500".into()
        }
    );
}

/// A 3xx is a failed attempt; the redirect is never followed
#[tokio::test]
async fn test_redirect_is_not_followed() {
    for status in [
        StatusCode::MOVED_PERMANENTLY,
        StatusCode::FOUND,
        StatusCode::SEE_OTHER,
        StatusCode::TEMPORARY_REDIRECT,
    ] {
        let dashboard = Dashboard::start_redirect(status).await;
        let endpoint = dashboard.endpoint().with_api_key(ApiKey::new("do-not-forward"));
        let publisher = TelemetryPublisher::new(endpoint, TIMEOUT);
        let machine = PublishStateMachine::new();

        let err = publisher
            .publish_tracked(&HealthMetrics::default(), &machine)
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), Some(status.as_u16()));
        assert_eq!(dashboard.received().len(), 1);
        assert_eq!(dashboard.received()[0].query.get("key").map(String::as_str), Some("do-not-forward"));
        assert!(matches!(machine.current_state(), PublishState::Failed { .. }));
    }
}

#[tokio::test]
async fn test_client_error_without_body() {
    let dashboard = Dashboard::start(StatusCode::NOT_FOUND, "").await;
    let publisher = TelemetryPublisher::new(dashboard.endpoint(), TIMEOUT);

    let err = publisher.publish(&HealthMetrics::default()).await.unwrap_err();

    assert!(matches!(err, PublishError::HttpStatus { status: 404, .. }));
    assert_eq!(err.body(), None);
}

/// Nothing listening on the port
#[tokio::test]
async fn test_connection_failure_is_reported() {
    let publisher = TelemetryPublisher::new(unreachable_endpoint(), TIMEOUT);

    let err = publisher.publish(&HealthMetrics::default()).await.unwrap_err();

    assert_eq!(err.cause(), Some(TransportCause::Connect));
    assert_eq!(err.status_code(), None);
}

#[tokio::test]
async fn test_slow_endpoint_times_out() {
    let dashboard =
        Dashboard::start_with_delay(StatusCode::OK, "", Duration::from_secs(3)).await;
    let publisher = TelemetryPublisher::new(dashboard.endpoint(), Duration::from_millis(300));

    let err = publisher.publish(&HealthMetrics::default()).await.unwrap_err();

    assert_eq!(err.cause(), Some(TransportCause::Timeout));
}

/// Full command through the blocking facade
#[tokio::test]
async fn test_command_execute_end_to_end() {
    let dashboard = Dashboard::start(StatusCode::OK, "").await;
    let command = ModelHealthCommand::new(TelemetryPublisher::new(dashboard.endpoint(), TIMEOUT));

    let report = tokio::task::spawn_blocking(move || command.execute(&doors_and_windows()))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(report.receipt.status, 200);
    assert_eq!(report.metrics.total_elements(), 10);

    let received = dashboard.received();
    assert_eq!(received.len(), 1);
    assert_eq!(payload::decode(&received[0].body).unwrap(), report.metrics);
}

#[tokio::test]
async fn test_command_reports_publish_failure() {
    let dashboard = Dashboard::start(StatusCode::INTERNAL_SERVER_ERROR, "").await;
    let command = ModelHealthCommand::new(TelemetryPublisher::new(dashboard.endpoint(), TIMEOUT));

    let result = tokio::task::spawn_blocking(move || command.execute(&doors_and_windows()))
        .await
        .unwrap();

    match result {
        Err(CommandError::Publish(err)) => assert_eq!(err.status_code(), Some(500)),
        other => panic!("Expected publish failure, got {other:?}"),
    }
}

#[tokio::test]
async fn test_closed_model_publishes_nothing() {
    let dashboard = Dashboard::start(StatusCode::OK, "").await;
    let command = ModelHealthCommand::new(TelemetryPublisher::new(dashboard.endpoint(), TIMEOUT));

    let mut model = doors_and_windows();
    model.close();

    let result = tokio::task::spawn_blocking(move || command.execute(&model))
        .await
        .unwrap();

    assert!(matches!(result, Err(CommandError::Collect(_))));
    assert!(dashboard.received().is_empty());
}

/// Snapshot and config loaded from disk, as the CLI does
#[tokio::test]
async fn test_file_based_invocation() {
    let dashboard = Dashboard::start(StatusCode::OK, "").await;

    let mut config_file = tempfile::NamedTempFile::new().unwrap();
    writeln!(config_file, "endpoint = \"{}\"", dashboard.url()).unwrap();
    writeln!(config_file, "api_key = \"file-key\"").unwrap();
    writeln!(config_file, "timeout_secs = 5").unwrap();

    let mut model_file = tempfile::NamedTempFile::new().unwrap();
    model_file
        .write_all(serde_json::to_string(&doors_and_windows()).unwrap().as_bytes())
        .unwrap();

    let file = FileConfig::load(config_file.path()).unwrap();
    let config = AppConfig::resolve(file, |_| None).unwrap();
    let model = DocumentSnapshot::from_file(model_file.path()).unwrap();
    let command = ModelHealthCommand::new(TelemetryPublisher::from_config(&config));

    let report = tokio::task::spawn_blocking(move || command.execute(&model))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(report.metrics.family_count("Window"), Some(7));

    let received = dashboard.received();
    assert_eq!(received[0].query.get("key").map(String::as_str), Some("file-key"));
}
