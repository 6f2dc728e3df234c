use thiserror::Error;

#[derive(Error, Debug)]
pub enum PayloadError {
    #[error("Family name must not be empty")]
    EmptyFamilyName,

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Transport-level failure classes, reported when no HTTP response arrived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportCause {
    Connect,
    Timeout,
    Request,
    Other,
}

impl std::fmt::Display for TransportCause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TransportCause::Connect => "connection failure",
            TransportCause::Timeout => "timeout",
            TransportCause::Request => "request error",
            TransportCause::Other => "transport error",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum PublishError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] PayloadError),

    #[error("Ingestion endpoint returned HTTP {status}")]
    HttpStatus { status: u16, body: Option<String> },

    #[error("{cause}: {message}")]
    Transport {
        cause: TransportCause,
        message: String,
    },

    #[error("Publish worker failed: {0}")]
    Worker(String),

    #[error("Invalid state transition: {0}")]
    InvalidStateTransition(String),
}

impl PublishError {
    /// HTTP status, when the endpoint answered at all.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            PublishError::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Response body, when the endpoint sent a non-empty one.
    pub fn body(&self) -> Option<&str> {
        match self {
            PublishError::HttpStatus { body, .. } => body.as_deref(),
            _ => None,
        }
    }

    pub fn cause(&self) -> Option<TransportCause> {
        match self {
            PublishError::Transport { cause, .. } => Some(*cause),
            _ => None,
        }
    }

    /// Short label used for the failure counter.
    pub fn reason(&self) -> &'static str {
        match self {
            PublishError::Serialization(_) => "serialization",
            PublishError::HttpStatus { .. } => "http_status",
            PublishError::Transport { cause, .. } => match cause {
                TransportCause::Connect => "connect",
                TransportCause::Timeout => "timeout",
                TransportCause::Request => "request",
                TransportCause::Other => "transport",
            },
            PublishError::Worker(_) => "worker",
            PublishError::InvalidStateTransition(_) => "state",
        }
    }
}

impl From<reqwest::Error> for PublishError {
    fn from(err: reqwest::Error) -> Self {
        let cause = if err.is_connect() {
            TransportCause::Connect
        } else if err.is_timeout() {
            TransportCause::Timeout
        } else if err.is_request() || err.is_builder() {
            TransportCause::Request
        } else {
            TransportCause::Other
        };

        PublishError::Transport {
            cause,
            message: err.to_string(),
        }
    }
}

pub type PayloadResult<T> = Result<T, PayloadError>;
pub type PublishResult<T> = Result<T, PublishError>;
