//! Session storage-specific error types.

use std::path::PathBuf;

/// Errors that can occur while persisting session identities.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Failed to write the session file
    #[error("Failed to write session store {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to read the session file
    #[error("Failed to read session store {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to encode a profile or the store contents
    #[error("Failed to encode session data: {0}")]
    Encode(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_error_display() {
        let error = SessionError::WriteFailed {
            path: PathBuf::from("/tmp/session.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let error_str = error.to_string();
        assert!(error_str.contains("/tmp/session.json"));
        assert!(error_str.contains("denied"));
    }
}
