use thiserror::Error;

/// Common error types used across the application.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Store error (HTTP {status}): {detail}")]
    Store { status: u16, detail: String },

    #[error("Gateway error: {message}")]
    Gateway { code: Option<i64>, message: String },

    #[error("Decode error: {0}")]
    Decode(String),
}
