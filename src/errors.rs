/*!
 * Error types for the nexo translation crate.
 *
 * Provider errors are per-backend and are absorbed by the fallback loop;
 * translation errors are what callers of the orchestrator see.
 */

use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when talking to a single translation backend
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProviderError {
    /// Error when building or sending the request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Non-success status returned by the API
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The attempt did not finish within its timeout
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// Error related to rate limiting or exhausted quota
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// HTTP 200 whose body carries the backend's own error status
    #[error("API reported error status {status} in a successful response: {message}")]
    EmbeddedError {
        /// Status reported inside the body
        status: String,
        /// Error details reported inside the body
        message: String,
    },

    /// The backend answered but the translated text was empty
    #[error("API returned an empty translation")]
    EmptyTranslation,
}

impl ProviderError {
    /// Map a non-success HTTP status and its body to an error
    pub fn from_status(status_code: u16, body: &str) -> Self {
        let message = summarize_body(body);
        match status_code {
            401 | 403 => Self::AuthenticationError(message),
            // DeepL uses 456 for an exhausted character quota
            429 | 456 => Self::RateLimitExceeded(message),
            _ => Self::ApiError { status_code, message },
        }
    }

    /// Stable short code for diagnostics and logs
    pub fn code(&self) -> &'static str {
        match self {
            Self::RequestFailed(_) => "request_failed",
            Self::ParseError(_) => "parse_error",
            Self::ApiError { .. } => "http_status",
            Self::ConnectionError(_) => "connection",
            Self::Timeout(_) => "timeout",
            Self::RateLimitExceeded(_) => "rate_limited",
            Self::AuthenticationError(_) => "authentication",
            Self::EmbeddedError { .. } => "embedded_error",
            Self::EmptyTranslation => "empty_translation",
        }
    }
}

/// Keep error bodies short enough for a log line
fn summarize_body(body: &str) -> String {
    const MAX_CHARS: usize = 200;
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "empty response body".to_string();
    }
    if trimmed.chars().count() <= MAX_CHARS {
        trimmed.to_string()
    } else {
        let head: String = trimmed.chars().take(MAX_CHARS).collect();
        format!("{}...", head)
    }
}

/// One failed provider attempt, kept for diagnostics
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderFailure {
    /// Identifier of the provider that failed
    pub provider: String,
    /// Why it failed
    pub error: ProviderError,
}

impl ProviderFailure {
    pub fn new(provider: impl Into<String>, error: ProviderError) -> Self {
        Self {
            provider: provider.into(),
            error,
        }
    }

    /// Stable failure code of the underlying error
    pub fn code(&self) -> &'static str {
        self.error.code()
    }
}

impl std::fmt::Display for ProviderFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}]: {}", self.provider, self.code(), self.error)
    }
}

/// Errors that can occur during translation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TranslationError {
    /// The request was rejected before any provider was contacted
    #[error("Invalid translation request: {0}")]
    InvalidRequest(String),

    /// Every enabled provider failed, or none was enabled
    #[error("All translation providers failed ({} attempted)", .failures.len())]
    AllProvidersFailed {
        /// Failures in the order the providers were tried
        failures: Vec<ProviderFailure>,
    },
}

impl TranslationError {
    /// Human readable summary of every attempt, for logs
    pub fn diagnostics(&self) -> String {
        match self {
            Self::InvalidRequest(reason) => reason.clone(),
            Self::AllProvidersFailed { failures } if failures.is_empty() => {
                "no translation provider is enabled".to_string()
            }
            Self::AllProvidersFailed { failures } => failures
                .iter()
                .map(|f| f.to_string())
                .collect::<Vec<_>>()
                .join("; "),
        }
    }
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from translation
    #[error("Translation error: {0}")]
    Translation(#[from] TranslationError),

    /// The overall deadline expired before translation finished
    #[error("Translation did not finish within {0:?}")]
    DeadlineExceeded(Duration),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
