//! In-process stand-in for the dashboard ingestion endpoint.

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use model_health::config::IngestionEndpoint;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct ReceivedRequest {
    pub content_type: Option<String>,
    pub query: HashMap<String, String>,
    pub body: Vec<u8>,
}

#[derive(Clone)]
struct DashboardState {
    status: StatusCode,
    response_body: String,
    delay: Duration,
    redirect_to: Option<String>,
    received: Arc<Mutex<Vec<ReceivedRequest>>>,
}

pub struct Dashboard {
    pub addr: SocketAddr,
    received: Arc<Mutex<Vec<ReceivedRequest>>>,
}

impl Dashboard {
    pub async fn start(status: StatusCode, response_body: &str) -> Self {
        Self::start_with_delay(status, response_body, Duration::ZERO).await
    }

    pub async fn start_with_delay(status: StatusCode, response_body: &str, delay: Duration) -> Self {
        Self::spawn(status, response_body, delay, None).await
    }

    /// Answers the POST with `status` and a `Location` pointing at a GET
    /// route that would return 200.
    pub async fn start_redirect(status: StatusCode) -> Self {
        Self::spawn(status, "", Duration::ZERO, Some("/moved".to_string())).await
    }

    async fn spawn(
        status: StatusCode,
        response_body: &str,
        delay: Duration,
        redirect_to: Option<String>,
    ) -> Self {
        let received = Arc::new(Mutex::new(Vec::new()));
        let state = DashboardState {
            status,
            response_body: response_body.to_string(),
            delay,
            redirect_to,
            received: received.clone(),
        };

        let app = Router::new()
            .route("/rows", post(ingest))
            .route("/moved", get(moved))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, received }
    }

    pub fn url(&self) -> String {
        format!("http://{}/rows", self.addr)
    }

    pub fn endpoint(&self) -> IngestionEndpoint {
        IngestionEndpoint::parse(&self.url()).unwrap()
    }

    pub fn received(&self) -> Vec<ReceivedRequest> {
        self.received.lock().clone()
    }
}

async fn ingest(
    State(state): State<DashboardState>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    state.received.lock().push(ReceivedRequest {
        content_type: headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        query,
        body: body.to_vec(),
    });

    if !state.delay.is_zero() {
        tokio::time::sleep(state.delay).await;
    }

    match &state.redirect_to {
        Some(location) => (
            state.status,
            [(header::LOCATION, location.clone())],
            state.response_body.clone(),
        )
            .into_response(),
        None => (state.status, state.response_body.clone()).into_response(),
    }
}

async fn moved(State(state): State<DashboardState>, body: Bytes) -> StatusCode {
    state.received.lock().push(ReceivedRequest {
        content_type: None,
        query: HashMap::new(),
        body: body.to_vec(),
    });
    StatusCode::OK
}

/// An endpoint on a local port nothing listens on.
pub fn unreachable_endpoint() -> IngestionEndpoint {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    IngestionEndpoint::parse(&format!("http://127.0.0.1:{port}/rows")).unwrap()
}
