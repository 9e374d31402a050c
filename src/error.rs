//! Error types for the load-more kit
//!
//! Defines the error hierarchy for the whole crate. All public APIs return
//! `Result<T, Error>` where `Error` is defined here.

use thiserror::Error;

/// The main error type for the load-more kit
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    /// Invalid or missing configuration
    #[error("Configuration error: {message}")]
    Config {
        /// What is wrong with the configuration
        message: String,
    },

    /// YAML parsing failed
    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// JSON parsing failed
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Security Errors
    // ============================================================================
    /// The security token is missing, expired, or forged
    #[error("Invalid security token: {message}")]
    InvalidToken {
        /// Rejection reason, kept server-side
        message: String,
    },

    /// The request carried an action this endpoint does not handle
    #[error("Unknown action: {action}")]
    UnknownAction {
        /// The unrecognized action identifier
        action: String,
    },

    // ============================================================================
    // Rendering Errors
    // ============================================================================
    /// Rendering failed
    #[error("Render error: {message}")]
    Render {
        /// What failed to render
        message: String,
    },

    /// A template referenced a variable no post provides
    #[error("Undefined variable in template: {variable}")]
    UndefinedVariable {
        /// The unresolved variable name(s)
        variable: String,
    },

    /// No template exists for the post's format
    #[error("No template registered for format '{format}'")]
    MissingTemplate {
        /// The format without a template
        format: String,
    },

    // ============================================================================
    // Transport Errors
    // ============================================================================
    /// The HTTP request itself failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with an unexpected status
    #[error("HTTP {status}: {body}")]
    HttpStatus {
        /// Response status code
        status: u16,
        /// Response body, possibly truncated
        body: String,
    },

    /// The response body was not a recognizable envelope
    #[error("Malformed response envelope: {message}")]
    MalformedEnvelope {
        /// Parse failure detail
        message: String,
    },

    /// A URL failed to parse
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // I/O Errors
    // ============================================================================
    /// Filesystem access failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    /// Catch-all for errors with no dedicated variant
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid token error
    pub fn invalid_token(message: impl Into<String>) -> Self {
        Self::InvalidToken {
            message: message.into(),
        }
    }

    /// Create a render error
    pub fn render(message: impl Into<String>) -> Self {
        Self::Render {
            message: message.into(),
        }
    }

    /// Create an undefined variable error
    pub fn undefined_var(variable: impl Into<String>) -> Self {
        Self::UndefinedVariable {
            variable: variable.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create a malformed envelope error
    pub fn malformed_envelope(message: impl Into<String>) -> Self {
        Self::MalformedEnvelope {
            message: message.into(),
        }
    }

    /// Check if this error is retryable by the client controller
    ///
    /// Transport-level failures leave the control in Ready so the user may
    /// click again; everything else is terminal for the request.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Http(_) | Error::MalformedEnvelope { .. } => true,
            Error::HttpStatus { status, .. } => is_retryable_status(*status),
            _ => false,
        }
    }
}

/// Check if an HTTP status code is retryable
fn is_retryable_status(status: u16) -> bool {
    matches!(status, 429 | 500 | 502 | 503 | 504)
}

/// Result type alias for the load-more kit
pub type Result<T> = std::result::Result<T, Error>;
