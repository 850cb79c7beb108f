use crate::grid::GridError;
use crate::project_form::FieldId;
use log::warn;
use rand::Rng;
use std::fmt;

/// Custom error types for shape editor and project form operations
#[derive(Debug, Clone, PartialEq)]
pub enum ClientError {
    /// Grid dimension or coordinate errors
    Grid(GridError),
    /// Client-side validation rejected these fields; nothing was sent
    Validation(Vec<FieldId>),
    /// The request never produced an HTTP response
    Transport(String),
    /// No response within the configured request timeout
    Timeout { after_ms: u64 },
    /// The server answered but refused the submission
    Rejected {
        status: u16,
        message: String,
        field: Option<FieldId>,
    },
    /// The response body could not be decoded
    Decode(String),
    /// The submission was cancelled before a response arrived
    Cancelled,
    /// Another submission from the same component is still pending
    AlreadyInFlight,
    /// The model index has no following wizard step to navigate to
    NoNextModel { model_index: usize },
    /// Configuration errors
    Config(String),
}

impl ClientError {
    /// Transport failures and timeouts may succeed on another attempt;
    /// rejections and local errors never will.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ClientError::Transport(_) | ClientError::Timeout { .. })
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::Grid(err) => write!(f, "{}", err),
            ClientError::Validation(fields) => {
                let names: Vec<&str> = fields.iter().map(|field| field.element_id()).collect();
                write!(f, "Invalid form fields: {}", names.join(", "))
            }
            ClientError::Transport(msg) => write!(f, "Request failed: {}", msg),
            ClientError::Timeout { after_ms } => {
                write!(f, "No response from server after {} ms", after_ms)
            }
            ClientError::Rejected {
                status, message, ..
            } => write!(f, "Server rejected the request ({}): {}", status, message),
            ClientError::Decode(msg) => write!(f, "Unreadable server response: {}", msg),
            ClientError::Cancelled => write!(f, "Request cancelled"),
            ClientError::AlreadyInFlight => write!(f, "A submission is already in progress"),
            ClientError::NoNextModel { model_index } => {
                write!(f, "Model {} has no following step", model_index)
            }
            ClientError::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for ClientError {}

impl From<GridError> for ClientError {
    fn from(err: GridError) -> Self {
        ClientError::Grid(err)
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        ClientError::Config(err.to_string())
    }
}

/// Result type alias for client operations
pub type ClientResult<T> = Result<T, ClientError>;

/// Retry configuration for transport failures
#[derive(Debug, Clone)]
pub struct RetryConfig {
    pub max_attempts: u32,
    pub base_delay_ms: u64,
    pub backoff_multiplier: f32,
    /// Upper bound of the random delay added to each backoff step
    pub jitter_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_ms: 100,
            backoff_multiplier: 2.0,
            jitter_ms: 50,
        }
    }
}

impl RetryConfig {
    /// A single attempt, no retries
    pub fn disabled() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    fn delay_ms(&self, attempt: u32) -> u64 {
        let base = self.base_delay_ms as f32 * self.backoff_multiplier.powi((attempt - 1) as i32);
        let jitter = if self.jitter_ms > 0 {
            rand::thread_rng().gen_range(0..=self.jitter_ms)
        } else {
            0
        };
        base as u64 + jitter
    }
}

/// Retry an operation with exponential backoff while its error is retryable
pub fn retry_with_backoff<T, F>(operation: F, config: &RetryConfig) -> ClientResult<T>
where
    F: FnMut() -> ClientResult<T>,
{
    retry_with_backoff_if(operation, config, ClientError::is_retryable)
}

/// Retry an operation with exponential backoff while `should_retry` accepts its error
pub fn retry_with_backoff_if<T, E, F, P>(
    mut operation: F,
    config: &RetryConfig,
    should_retry: P,
) -> Result<T, E>
where
    E: fmt::Display,
    F: FnMut() -> Result<T, E>,
    P: Fn(&E) -> bool,
{
    let max_attempts = config.max_attempts.max(1);
    let mut attempt = 1;

    loop {
        match operation() {
            Ok(result) => return Ok(result),
            Err(error) if should_retry(&error) && attempt < max_attempts => {
                warn!(
                    "⚠️ Request failed on attempt {}/{}: {}",
                    attempt, max_attempts, error
                );
                std::thread::sleep(std::time::Duration::from_millis(config.delay_ms(attempt)));
                attempt += 1;
            }
            Err(error) => return Err(error),
        }
    }
}
