//! Error types for the Lightbox client.
//!
//! Argument and precondition failures are fatal to the operation that raised
//! them; classified HTTP outcomes are data (see [`crate::response`]) and only
//! become errors when a caller decides they should.

use thiserror::Error;

/// Main error type for the Lightbox client library.
#[derive(Debug, Error)]
pub enum LightboxError {
    // Input validation errors (fatal, no retry)
    #[error("Argument error in {context}: {message}")]
    Argument { context: String, message: String },

    #[error("No {subject} found in {resource_type} {resource_name:?} with id {resource_id}")]
    Precondition {
        subject: &'static str,
        resource_type: &'static str,
        resource_name: String,
        resource_id: u64,
    },

    #[error("You entered {input:?}. Exiting.")]
    UserAbort { input: String },

    // Network errors
    #[error("Network error: {message}")]
    Network {
        message: String,
        /// Optional cause description
        cause: Option<String>,
    },

    #[error("Request timed out")]
    Timeout,

    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("{resource_type} not found: id {id}")]
    NotFound { resource_type: &'static str, id: u64 },

    // Serialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    // Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    // Interactive prompt errors
    #[error("Failed to read confirmation input: {message}")]
    Prompt { message: String },

    // Generic errors
    #[error("{0}")]
    Other(String),
}

/// Result type alias for Lightbox operations.
pub type Result<T> = std::result::Result<T, LightboxError>;

impl From<reqwest::Error> for LightboxError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LightboxError::Timeout
        } else {
            LightboxError::Network {
                message: err.to_string(),
                cause: err.url().map(|u| u.to_string()),
            }
        }
    }
}

impl From<serde_json::Error> for LightboxError {
    fn from(err: serde_json::Error) -> Self {
        LightboxError::Json {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

impl LightboxError {
    /// Build an argument error naming the call that rejected its input.
    pub fn argument(context: impl Into<String>, message: impl Into<String>) -> Self {
        LightboxError::Argument {
            context: context.into(),
            message: message.into(),
        }
    }

    /// Whether this error terminates a pipeline run outright.
    ///
    /// Argument, precondition, and abort errors have no meaningful partial
    /// continuation; network-level failures are left to the caller.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            LightboxError::Argument { .. }
                | LightboxError::Precondition { .. }
                | LightboxError::UserAbort { .. }
                | LightboxError::Config { .. }
        )
    }
}
