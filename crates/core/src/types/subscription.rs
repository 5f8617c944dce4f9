//! Newsletter subscription payloads.

use serde::{Deserialize, Serialize};

/// Body of `POST /api/subscribe`.
///
/// The address is sent as typed; format validity is the backend's call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscribeRequest {
    pub email: String,
}

/// Response of `POST /api/subscribe`. Unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscribeResponse {
    /// Message to show the subscriber, if the backend sent one.
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_request_shape() {
        let body = serde_json::to_value(SubscribeRequest {
            email: "you@example.com".to_string(),
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({ "email": "you@example.com" }));
    }

    #[test]
    fn test_response_message_optional() {
        let with: SubscribeResponse = serde_json::from_str(r#"{"message":"Welcome!"}"#).unwrap();
        assert_eq!(with.message.as_deref(), Some("Welcome!"));

        let without: SubscribeResponse = serde_json::from_str(r#"{"ok":true}"#).unwrap();
        assert_eq!(without.message, None);
    }
}
