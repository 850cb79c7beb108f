// HTTP seam towards the web application

use crate::client_errors::{retry_with_backoff_if, ClientError, ClientResult, RetryConfig};
use log::{debug, warn};
use serde::Deserialize;
use std::fmt;
use std::time::Duration;

pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Status line and body of a server response, including error statuses
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The structured error the server put in the body, if any
    pub fn error_body(&self) -> ErrorBody {
        serde_json::from_str(&self.body).unwrap_or_default()
    }

    /// Best human-readable explanation of a failed reply
    pub fn error_message(&self) -> String {
        let parsed = self.error_body();
        if let Some(message) = parsed.error.or(parsed.message) {
            return message;
        }
        let body = self.body.trim();
        if !body.is_empty() && body.len() <= MAX_RAW_MESSAGE_LEN && !body.starts_with('<') {
            return body.to_string();
        }
        format!("HTTP {}", self.status)
    }
}

/// Longer bodies are usually whole error pages, not messages
const MAX_RAW_MESSAGE_LEN: usize = 200;

/// `{"error": "...", "field": "..."}` as sent by the server on rejection
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ErrorBody {
    pub error: Option<String>,
    pub message: Option<String>,
    /// Wire key or element id of the offending field
    pub field: Option<String>,
}

/// Performs one POST against the server.
///
/// Any response the server produced is an `Ok(HttpReply)`, whatever its
/// status; only failures to obtain a response are errors.
pub trait Transport: Send + Sync {
    fn post(&self, path: &str, content_type: &str, body: &str) -> ClientResult<HttpReply>;
}

/// Blocking transport backed by a `ureq` agent
pub struct UreqTransport {
    base_url: String,
    agent: ureq::Agent,
    retry: RetryConfig,
}

impl UreqTransport {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            agent,
            retry: RetryConfig::disabled(),
        }
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    pub fn from_config(config: &crate::ClientConfig) -> Self {
        Self::new(config.server.base_url.clone(), config.request_timeout())
            .with_retry(config.retry_config())
    }

    pub fn url_for(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    fn post_once(&self, url: &str, content_type: &str, body: &str) -> Result<HttpReply, Attempt> {
        let response = self
            .agent
            .post(url)
            .set("Content-Type", content_type)
            .set("Accept", JSON_CONTENT_TYPE)
            .send_string(body);

        match response {
            Ok(response) => read_reply(response),
            Err(ureq::Error::Status(status, response)) => {
                warn!("⚠️ {} answered HTTP {}", url, status);
                read_reply(response)
            }
            Err(ureq::Error::Transport(transport)) => Err(Attempt {
                before_send: is_connect_failure(transport.kind()),
                error: ClientError::Transport(transport.to_string()),
            }),
        }
    }
}

/// A failed POST attempt
struct Attempt {
    error: ClientError,
    /// The request never reached the server, so sending it again is safe
    before_send: bool,
}

impl fmt::Display for Attempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)
    }
}

/// DNS and connect failures happen before any byte of the request is sent.
/// Anything later may have reached the server already.
fn is_connect_failure(kind: ureq::ErrorKind) -> bool {
    matches!(kind, ureq::ErrorKind::Dns | ureq::ErrorKind::ConnectionFailed)
}

fn read_reply(response: ureq::Response) -> Result<HttpReply, Attempt> {
    let status = response.status();
    let body = response.into_string().map_err(|e| Attempt {
        error: ClientError::Transport(format!("failed to read response body: {}", e)),
        before_send: false,
    })?;
    Ok(HttpReply { status, body })
}

impl Transport for UreqTransport {
    /// POST is not idempotent: only attempts that never reached the server
    /// are retried.
    fn post(&self, path: &str, content_type: &str, body: &str) -> ClientResult<HttpReply> {
        let url = self.url_for(path);
        debug!("📤 POST {} ({} bytes, {})", url, body.len(), content_type);
        retry_with_backoff_if(
            || self.post_once(&url, content_type, body),
            &self.retry,
            |attempt: &Attempt| attempt.before_send,
        )
        .map_err(|attempt| attempt.error)
    }
}
