//! Ingestion endpoint configuration
//!
//! Resolved once at process start from an optional TOML file, with
//! environment variables taking precedence.

mod error;
mod types;

pub use error::{ConfigError, ConfigResult};
pub use types::{
    ApiKey, AppConfig, FileConfig, IngestionEndpoint, DEFAULT_TIMEOUT_SECS, ENV_API_KEY,
    ENV_ENDPOINT, ENV_TIMEOUT_SECS,
};
