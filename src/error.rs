//! Application-wide error types.
//!
//! This module defines the main error type hierarchy for the application,
//! allowing for type-safe error handling throughout the codebase.

pub use crate::api::ApiError;
pub use crate::config::ConfigError;
pub use crate::session::SessionError;
pub use crate::state::StateError;

/// Main application error type.
///
/// This is the top-level error type that encompasses all error types
/// in the application.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Schemes API-related errors
    #[allow(dead_code)]
    #[error("Schemes API error: {0}")]
    Api(#[from] ApiError),

    /// Session persistence errors
    #[allow(dead_code)]
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    /// State management errors
    #[allow(dead_code)]
    #[error("State error: {0}")]
    State(#[from] StateError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Terminal/UI errors
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Logger initialization errors
    #[error("Logger error: {0}")]
    Logger(String),
}

/// Convenience type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_from_config_error() {
        let app_error: AppError = ConfigError::FilePathNotSet.into();
        assert!(matches!(app_error, AppError::Config(_)));
        assert!(app_error.to_string().contains("Configuration error"));
    }

    #[test]
    fn test_app_error_from_api_error() {
        let api_error = ApiError::Status {
            status: 500,
            message: "boom".to_string(),
        };
        let app_error: AppError = api_error.into();
        assert!(matches!(app_error, AppError::Api(_)));
        assert!(app_error.to_string().contains("Schemes API error"));
    }

    #[test]
    fn test_app_error_from_session_error() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let app_error: AppError = SessionError::Encode(source).into();
        assert!(matches!(app_error, AppError::Session(_)));
    }

    #[test]
    fn test_app_error_from_state_error() {
        let app_error: AppError = StateError::UserNotSignedIn.into();
        assert!(matches!(app_error, AppError::State(_)));
        assert!(app_error.to_string().contains("State error"));
    }

    #[test]
    fn test_app_error_from_io_error() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let app_error: AppError = io_error.into();
        assert!(matches!(app_error, AppError::Io(_)));
        assert!(app_error.to_string().contains("I/O error"));
    }

    #[test]
    fn test_app_error_terminal() {
        let error = AppError::Terminal("raw mode unavailable".to_string());
        assert!(error.to_string().contains("raw mode unavailable"));
    }
}
