// src/errors.rs

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    // Validation errors, caught before any network call
    #[error("Validation error: {0}")]
    Validation(String),

    // Advisory stock check failed; a blocking warning, not a server fault
    #[error("Stock conflict: {0}")]
    StockConflict(String),

    // Auth errors: 401/403 from the backend; callers must force a re-login
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    // Any other non-2xx response, carrying the server-provided message
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    // Transport-level failures (DNS, TLS, timeouts, connection resets)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    // Response body did not match the expected shape
    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// True for failures that must end the session instead of being retried.
    pub fn requires_logout(&self) -> bool {
        matches!(self, AppError::Unauthorized(_))
    }
}

// Convenience alias
pub type AppResult<T> = Result<T, AppError>;
