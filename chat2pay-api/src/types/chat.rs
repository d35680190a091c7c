//! Persisted chat history types.

use super::product::Product;
use super::serde_helpers::{null_as_default, string_or_number};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// The shopper
    User,
    /// The shopping assistant
    Assistant,
}

impl fmt::Display for ChatRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatRole::User => write!(f, "user"),
            ChatRole::Assistant => write!(f, "assistant"),
        }
    }
}

/// A stored chat message.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChatMessage {
    /// Message id
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    /// Author
    pub role: ChatRole,
    /// Message text
    pub content: String,
    /// Product cards attached by the assistant, kept as raw JSON
    #[serde(default)]
    pub products: Option<Value>,
    /// Creation time
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl ChatMessage {
    /// Decodes the attached product cards. Missing or malformed attachments
    /// yield an empty list.
    pub fn product_cards(&self) -> Vec<Product> {
        self.products
            .as_ref()
            .and_then(|v| Vec::<Product>::deserialize(v).ok())
            .unwrap_or_default()
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ChatHistory {
    #[serde(default, deserialize_with = "null_as_default")]
    pub(crate) messages: Vec<ChatMessage>,
}

/// Message to persist in the signed-in customer's history.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewChatMessage {
    /// Author
    pub role: ChatRole,
    /// Message text
    pub content: String,
    /// Product cards to store with the message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub products: Option<Value>,
}

impl NewChatMessage {
    /// A message written by the shopper.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
            products: None,
        }
    }

    /// An assistant reply, optionally carrying product cards.
    pub fn assistant(content: impl Into<String>, products: Option<Value>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
            products,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_product_cards() {
        let msg: ChatMessage = serde_json::from_value(json!({
            "id": "m1",
            "role": "assistant",
            "content": "Here you go",
            "products": [{"id": "p", "merchant_id": "m", "name": "Tea", "price": 1}],
            "created_at": "2024-01-01T00:00:00Z"
        }))
        .unwrap();
        assert_eq!(msg.role, ChatRole::Assistant);
        assert_eq!(msg.product_cards().len(), 1);

        let msg: ChatMessage = serde_json::from_value(json!({
            "id": 2, "role": "user", "content": "hi", "products": {"weird": true}
        }))
        .unwrap();
        assert!(msg.product_cards().is_empty());
    }

    #[test]
    fn test_new_message_body() {
        assert_eq!(
            serde_json::to_value(NewChatMessage::user("hello")).unwrap(),
            json!({"role": "user", "content": "hello"})
        );
        assert_eq!(ChatRole::Assistant.to_string(), "assistant");
    }
}
