use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::{ApiData, ApiError};


/// Message type of every [`TokenUpdateNotification`] sent to web clients.
pub const TOKEN_UPDATE_MESSAGE_TYPE: &str = "token-update";


/// Notifies connected web clients that tokens on the current map have changed.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub enum TokenUpdateNotification {
    #[serde(rename = "tokensAdded")]
    TokensAdded(Vec<String>),

    #[serde(rename = "tokensRemoved")]
    TokensRemoved(Vec<String>),

    #[serde(rename = "tokensChanged")]
    TokensChanged(Vec<String>),
}

impl TokenUpdateNotification {
    pub fn token_ids(&self) -> &[String] {
        match self {
            Self::TokensAdded(ids) | Self::TokensRemoved(ids) | Self::TokensChanged(ids) => ids,
        }
    }

    /// Wraps the notification into the envelope that is sent to all web client sessions.
    pub fn to_message(&self) -> Result<Value, ApiError> {
        let data = self.to_json().map_err(|error| {
            ApiError::with_cause("failed to serialize token update notification", error)
        })?;

        Ok(json!({
            "messageType": TOKEN_UPDATE_MESSAGE_TYPE,
            "data": data,
        }))
    }
}



#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn serializes_as_single_key_object() {
        let notification = TokenUpdateNotification::TokensAdded(vec![
            "7F0000010F1E3B5E0A000000AC100002".to_string(),
        ]);

        assert_eq!(
            notification.to_json().unwrap(),
            json!({ "tokensAdded": ["7F0000010F1E3B5E0A000000AC100002"] })
        );
    }

    #[test]
    fn builds_message_envelope() {
        let notification =
            TokenUpdateNotification::TokensRemoved(vec!["a".to_string(), "b".to_string()]);

        assert_eq!(
            notification.to_message().unwrap(),
            json!({
                "messageType": "token-update",
                "data": { "tokensRemoved": ["a", "b"] },
            })
        );
        assert_eq!(notification.token_ids().len(), 2);
    }

    #[test]
    fn deserializes_from_client_payload() {
        let notification: TokenUpdateNotification =
            serde_json::from_str(r#"{"tokensChanged":["c"]}"#).unwrap();

        assert_eq!(
            notification,
            TokenUpdateNotification::TokensChanged(vec!["c".to_string()])
        );
    }
}
