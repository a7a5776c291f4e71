//! State management-specific error types.

/// Errors that can occur during state operations.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    /// Action needs a signed-in user
    #[error("No user is signed in")]
    UserNotSignedIn,

    /// Action needs a signed-in administrator
    #[error("No administrator is signed in")]
    AdminNotSignedIn,

    /// Page name outside the known set
    #[error("Unknown page: {0}")]
    UnknownPage(String),

    /// Form contents cannot be submitted
    #[error("Invalid form: {0}")]
    InvalidForm(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_error_display() {
        let error = StateError::UserNotSignedIn;
        assert!(error.to_string().contains("user"));

        let error = StateError::AdminNotSignedIn;
        assert!(error.to_string().contains("administrator"));

        let error = StateError::UnknownPage("settings".to_string());
        assert!(error.to_string().contains("Unknown page"));
        assert!(error.to_string().contains("settings"));

        let error = StateError::InvalidForm("Name is required".to_string());
        assert!(error.to_string().contains("Name is required"));
    }
}
