//! Error response DTO.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Error payload returned when a request cannot be satisfied.
///
/// Carries a human-readable summary plus an ordered list of sub-messages,
/// one per violated constraint. Not-found responses carry no payload at all.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub message: String,
    pub messages: Vec<String>,
}

impl ErrorResponse {
    /// Creates an error response with an empty sub-message list.
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
            messages: Vec::new(),
        }
    }

    /// Replaces the sub-message list.
    pub fn with_messages(mut self, messages: Vec<String>) -> Self {
        self.messages = messages;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_both_fields() {
        let payload = ErrorResponse::new("Validation failed")
            .with_messages(vec!["name: too short".to_string()]);
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["message"], "Validation failed");
        assert_eq!(json["messages"][0], "name: too short");
    }

    #[test]
    fn messages_default_to_empty_list() {
        let json = serde_json::to_value(ErrorResponse::new("Bad request")).unwrap();
        assert!(json["messages"].as_array().unwrap().is_empty());
    }
}
