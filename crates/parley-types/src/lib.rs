//! Core types and structures for parley
//!
//! This crate provides the transcript and wire types shared between the
//! chat client, the reply service, and the app shell.

use serde::{Deserialize, Serialize};

// ============================================================================
// Constants
// ============================================================================

/// Rendered in place of a reply when the service answered without one
pub const NO_REPLY_PLACEHOLDER: &str = "(error: no reply)";

/// Rendered in place of a reply when the exchange itself failed
pub const SERVER_ERROR_PLACEHOLDER: &str = "(server error)";

// ============================================================================
// Transcript Types
// ============================================================================

/// Who authored a transcript entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Bot,
}

impl Role {
    /// Label shown next to an entry when rendering
    pub fn label(&self) -> &'static str {
        match self {
            Role::User => "You",
            Role::Bot => "Bot",
        }
    }
}

/// A single transcript entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub text: String,
}

impl Message {
    /// Build a user entry. Callers must have trimmed the text already;
    /// user entries are never empty.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    /// Build a bot entry
    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            role: Role::Bot,
            text: text.into(),
        }
    }
}

// ============================================================================
// Wire Types
// ============================================================================

/// Request body posted to the reply service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AskRequest {
    pub message: String,
}

/// Body of a successful reply service response. A missing `reply` is a
/// soft error, handled by the client rather than the transport.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyEnvelope {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub reply: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_serialize_lowercase() {
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"user\"");
        assert_eq!(serde_json::to_string(&Role::Bot).unwrap(), "\"bot\"");
    }

    #[test]
    fn envelope_tolerates_missing_reply() {
        let envelope: ReplyEnvelope = serde_json::from_str("{}").unwrap();
        assert_eq!(envelope.reply, None);

        let envelope: ReplyEnvelope = serde_json::from_str(r#"{"reply":"hi"}"#).unwrap();
        assert_eq!(envelope.reply.as_deref(), Some("hi"));
    }

    #[test]
    fn ask_request_wire_shape() {
        let json = serde_json::to_string(&AskRequest {
            message: "Hello".to_string(),
        })
        .unwrap();
        assert_eq!(json, r#"{"message":"Hello"}"#);
    }
}
