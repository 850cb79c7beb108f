use crate::client_errors::{ClientError, ClientResult, RetryConfig};
use crate::validation::ValidationPolicy;
use crate::GridConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const ENV_BASE_URL: &str = "WM_CLIENT_BASE_URL";
pub const ENV_TIMEOUT_MS: &str = "WM_CLIENT_TIMEOUT_MS";
pub const ENV_NAV_DELAY_MS: &str = "WM_CLIENT_NAV_DELAY_MS";

/// Comprehensive configuration for the shape editor and project form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub grid: GridConfig,
    pub server: ServerConfig,
    pub request: RequestConfig,
    pub navigation: NavigationConfig,
    pub validation: ValidationPolicy,
    pub display: DisplayConfig,
}

/// Where the web application lives
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Scheme, host and port; paths below are joined onto it
    pub base_url: String,
    /// POST target of the create-project form
    pub create_project_path: String,
    /// Page shown once a project was created
    pub current_project_path: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            create_project_path: "/project".to_string(),
            current_project_path: "/current-project".to_string(),
        }
    }
}

/// HTTP request behaviour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestConfig {
    /// Give up waiting for a response after this long (ms)
    pub timeout_ms: u64,
    /// Retry requests that failed before reaching the server (DNS or
    /// connect errors). Timeouts and broken responses are never retried,
    /// since the server may already have acted on the POST.
    pub enable_retry: bool,
    /// Maximum attempts per submission, including the first
    pub max_retry_attempts: u32,
    /// Base delay for retry backoff (ms)
    pub retry_base_delay_ms: u64,
    /// Backoff multiplier for retries
    pub retry_backoff_multiplier: f32,
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 10_000,
            enable_retry: false,
            max_retry_attempts: 3,
            retry_base_delay_ms: 200,
            retry_backoff_multiplier: 2.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Pause between the success toast and leaving the page (ms)
    pub delay_ms: u64,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self { delay_ms: 500 }
    }
}

/// Display and output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Log a snapshot of the whole grid after every toggle
    pub log_snapshots: bool,
    /// Colored terminal output
    pub use_color: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            log_snapshots: true,
            use_color: true,
        }
    }
}

impl ClientConfig {
    /// Load configuration from file
    pub fn from_file(path: impl AsRef<Path>) -> ClientResult<Self> {
        let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            ClientError::Config(format!("cannot read {}: {}", path.as_ref().display(), e))
        })?;
        serde_json::from_str(&contents)
            .map_err(|e| ClientError::Config(format!("invalid config file: {}", e)))
    }

    /// Save configuration to file
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> ClientResult<()> {
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| ClientError::Config(e.to_string()))?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Defaults with environment overrides applied
    pub fn from_env() -> ClientResult<Self> {
        let mut config = Self::default();
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// File (or defaults), then environment overrides, then validation
    pub fn load(path: Option<&Path>) -> ClientResult<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    pub fn apply_env_overrides(&mut self) -> ClientResult<()> {
        if let Ok(base_url) = std::env::var(ENV_BASE_URL) {
            self.server.base_url = base_url;
        }
        if let Some(timeout_ms) = env_millis(ENV_TIMEOUT_MS)? {
            self.request.timeout_ms = timeout_ms;
        }
        if let Some(delay_ms) = env_millis(ENV_NAV_DELAY_MS)? {
            self.navigation.delay_ms = delay_ms;
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request.timeout_ms)
    }

    pub fn navigation_delay(&self) -> Duration {
        Duration::from_millis(self.navigation.delay_ms)
    }

    pub fn retry_config(&self) -> RetryConfig {
        if !self.request.enable_retry {
            return RetryConfig::disabled();
        }
        RetryConfig {
            max_attempts: self.request.max_retry_attempts,
            base_delay_ms: self.request.retry_base_delay_ms,
            backoff_multiplier: self.request.retry_backoff_multiplier,
            ..RetryConfig::default()
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> ClientResult<()> {
        if self.grid.is_empty() {
            return Err(ClientError::Config("Grid dimensions must be positive".into()));
        }

        let base_url = &self.server.base_url;
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ClientError::Config(format!(
                "Base URL must start with http:// or https://, got '{}'",
                base_url
            )));
        }

        for path in [
            &self.server.create_project_path,
            &self.server.current_project_path,
        ] {
            if !path.starts_with('/') {
                return Err(ClientError::Config(format!(
                    "Server paths must start with '/', got '{}'",
                    path
                )));
            }
        }

        if self.request.timeout_ms == 0 {
            return Err(ClientError::Config("Request timeout must be positive".into()));
        }

        if self.request.enable_retry && self.request.max_retry_attempts == 0 {
            return Err(ClientError::Config("Max retry attempts must be positive".into()));
        }

        Ok(())
    }
}

fn env_millis(name: &str) -> ClientResult<Option<u64>> {
    match std::env::var(name) {
        Ok(value) => value
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|_| ClientError::Config(format!("{} must be a number of milliseconds", name))),
        Err(_) => Ok(None),
    }
}
