use crate::config::error::{ConfigError, ConfigResult};
use reqwest::Url;
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::time::Duration;

pub const ENV_ENDPOINT: &str = "MODEL_HEALTH_ENDPOINT";
pub const ENV_API_KEY: &str = "MODEL_HEALTH_API_KEY";
pub const ENV_TIMEOUT_SECS: &str = "MODEL_HEALTH_TIMEOUT_SECS";

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Opaque access key for the ingestion service. Never logged.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// Where metrics are pushed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestionEndpoint {
    url: Url,
    api_key: Option<ApiKey>,
}

impl IngestionEndpoint {
    pub fn parse(url: &str) -> ConfigResult<Self> {
        let parsed = Url::parse(url).map_err(|e| ConfigError::InvalidEndpoint {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidEndpoint {
                url: url.to_string(),
                reason: format!("unsupported scheme '{}'", parsed.scheme()),
            });
        }

        Ok(Self {
            url: parsed,
            api_key: None,
        })
    }

    pub fn with_api_key(mut self, key: ApiKey) -> Self {
        self.api_key = Some(key);
        self
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn api_key(&self) -> Option<&ApiKey> {
        self.api_key.as_ref()
    }

    /// URL the payload is posted to, with the access key as the `key`
    /// query parameter when one is configured separately.
    pub fn request_url(&self) -> Url {
        let mut url = self.url.clone();
        if let Some(key) = &self.api_key {
            url.query_pairs_mut().append_pair("key", key.expose());
        }
        url
    }

    /// Endpoint rendered without any credentials, for logs.
    pub fn redacted(&self) -> String {
        format!(
            "{}://{}{}",
            self.url.scheme(),
            self.url.host_str().unwrap_or_default(),
            self.url.path()
        )
    }
}

/// On-disk configuration, every field optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub endpoint: Option<String>,

    #[serde(default)]
    pub api_key: Option<ApiKey>,

    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl FileConfig {
    pub fn from_toml(contents: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub endpoint: IngestionEndpoint,
    pub timeout: Duration,
}

impl AppConfig {
    pub fn new(endpoint: IngestionEndpoint) -> Self {
        Self {
            endpoint,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Load the optional config file and apply process environment overrides.
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        let file = match path {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };
        Self::resolve(file, |name| std::env::var(name).ok())
    }

    /// Merge file values with overrides looked up through `env`.
    pub fn resolve<F>(file: FileConfig, env: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let endpoint = env(ENV_ENDPOINT)
            .or(file.endpoint)
            .ok_or(ConfigError::MissingEndpoint)?;

        let api_key = env(ENV_API_KEY).map(ApiKey::new).or(file.api_key);

        let timeout_secs = match env(ENV_TIMEOUT_SECS) {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|e| ConfigError::InvalidTimeout(format!("{raw}: {e}")))?,
            None => file.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
        };
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout(
                "timeout must be at least one second".into(),
            ));
        }

        let mut endpoint = IngestionEndpoint::parse(&endpoint)?;
        if let Some(key) = api_key {
            endpoint = endpoint.with_api_key(key);
        }

        Ok(Self {
            endpoint,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}
