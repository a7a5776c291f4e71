//! Chat transcript types.

use chrono::{DateTime, Local};

pub const CHAT_GREETING: &str = "Hello! I'm your AI assistant for government schemes. Ask me anything about available schemes, eligibility criteria, or application processes.";

pub const CHAT_FAILED: &str =
    "Sorry, I encountered an error. Please check your backend connection and try again.";

/// One line of the assistant conversation.
///
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct ChatMessage {
    pub text: String,
    pub from_user: bool,
    pub timestamp: DateTime<Local>,
}

impl ChatMessage {
    pub fn user(text: &str) -> Self {
        ChatMessage {
            text: text.to_owned(),
            from_user: true,
            timestamp: Local::now(),
        }
    }

    pub fn assistant(text: &str) -> Self {
        ChatMessage {
            text: text.to_owned(),
            from_user: false,
            timestamp: Local::now(),
        }
    }

    /// Returns the hour and minute the message was written.
    ///
    pub fn time_label(&self) -> String {
        self.timestamp.format("%H:%M").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_message_authors() {
        assert!(ChatMessage::user("hi").from_user);
        assert!(!ChatMessage::assistant(CHAT_GREETING).from_user);
    }

    #[test]
    fn test_time_label_format() {
        let label = ChatMessage::user("hi").time_label();
        assert_eq!(label.len(), 5);
        assert_eq!(&label[2..3], ":");
    }
}
