use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("No ingestion endpoint configured (set `endpoint` or MODEL_HEALTH_ENDPOINT)")]
    MissingEndpoint,

    #[error("Invalid ingestion endpoint '{url}': {reason}")]
    InvalidEndpoint { url: String, reason: String },

    #[error("Invalid timeout: {0}")]
    InvalidTimeout(String),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;
