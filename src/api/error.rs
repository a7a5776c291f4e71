//! Schemes API-specific error types.

/// Errors that can occur during schemes API operations.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// HTTP request could not be completed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// API answered with a non-success status
    #[error("API error (status {status}): {message}")]
    Status { status: u16, message: String },

    /// Response body did not match the expected shape
    #[error("Failed to decode API response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Base URL or path could not be turned into a request URL
    #[error("Invalid request URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// Returns the HTTP status carried by the error, if any.
    ///
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
