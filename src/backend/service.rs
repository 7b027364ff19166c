use std::collections::BTreeMap;
use std::fmt;

use async_trait::async_trait;

/// Message shown when the backend failed without a usable error body.
pub const GENERIC_SERVER_ERROR: &str = "An unexpected server error occurred.";

/// Errors that can occur while talking to the dilemma backend.
#[derive(Debug)]
pub enum BackendError {
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// Backend returned a non-2xx status. `message` is the parsed `error`
    /// body, or a fallback when the body had none.
    Api { status: u16, message: String },
    /// 2xx response whose body carried an application-level `error` field.
    Logical(String),
    /// Failed to parse a success response body.
    Parse(String),
}

impl BackendError {
    /// The single human-readable string the UI displays for this error.
    ///
    /// All failure classes collapse into one inline message; nothing is
    /// fatal and nothing is retried automatically.
    pub fn user_message(&self) -> String {
        match self {
            BackendError::Network(msg) => msg.clone(),
            BackendError::Api { message, .. } => message.clone(),
            BackendError::Logical(message) => message.clone(),
            BackendError::Parse(_) => GENERIC_SERVER_ERROR.to_string(),
        }
    }
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendError::Network(msg) => write!(f, "network error: {msg}"),
            BackendError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            BackendError::Logical(msg) => write!(f, "backend error: {msg}"),
            BackendError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for BackendError {}

/// The three operations the dilemma backend exposes.
///
/// `HttpBackend` is the real implementation; tests substitute a stub.
#[async_trait]
pub trait DilemmaService: Send + Sync {
    /// `GET /api/test` — returns the backend's status message.
    async fn fetch_status(&self) -> Result<String, BackendError>;

    /// `POST /api/dilemma` — asks the backend to generate a new dilemma.
    async fn generate_dilemma(&self) -> Result<String, BackendError>;

    /// `POST /api/analyze/comparative` — analyzes `dilemma` under every
    /// ethical framework the backend knows, one analysis text per framework.
    async fn analyze_comparative(
        &self,
        dilemma: &str,
    ) -> Result<BTreeMap<String, String>, BackendError>;
}
