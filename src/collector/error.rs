use thiserror::Error;

#[derive(Error, Debug)]
pub enum CollectorError {
    #[error("Model unavailable: {0}")]
    ModelUnavailable(String),
}

impl From<crate::model::ModelError> for CollectorError {
    fn from(err: crate::model::ModelError) -> Self {
        match err {
            crate::model::ModelError::Unavailable(reason) => CollectorError::ModelUnavailable(reason),
            other => CollectorError::ModelUnavailable(other.to_string()),
        }
    }
}

/// Raised when a metrics record read from the wire breaks its invariants.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum HealthError {
    #[error("Family '{0}' has a zero instance count")]
    ZeroFamilyCount(String),

    #[error("Family name must not be empty")]
    EmptyFamilyName,
}

pub type CollectorResult<T> = Result<T, CollectorError>;
