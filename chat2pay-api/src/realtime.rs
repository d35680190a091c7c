//! Realtime chat: socket construction and frame interpretation.

use crate::Chat2Pay;
use crate::types::{NewChatMessage, Product};
use chat2pay_core::{ChatCallbacks, ChatConnectConfig, ChatSocket, Result};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

/// Interpretation of one assistant frame.
///
/// The assistant streams either plain text or a JSON array of product cards.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatFrame {
    /// Product cards, with the array as received
    Products {
        /// Decoded cards
        products: Vec<Product>,
        /// The JSON array as sent
        raw: Value,
    },
    /// Anything else, verbatim
    Text(String),
}

impl ChatFrame {
    /// Classifies a frame. Text that is not a JSON array of products is
    /// returned unchanged as [`ChatFrame::Text`].
    ///
    /// ```rust
    /// use chat2pay_api::ChatFrame;
    ///
    /// assert_eq!(ChatFrame::parse("hello"), ChatFrame::Text("hello".into()));
    /// assert!(matches!(ChatFrame::parse("[]"), ChatFrame::Products { .. }));
    /// ```
    pub fn parse(text: &str) -> Self {
        if !text.trim_start().starts_with('[') {
            return Self::Text(text.to_string());
        }
        let Ok(raw) = serde_json::from_str::<Value>(text) else {
            return Self::Text(text.to_string());
        };
        match Vec::<Product>::deserialize(&raw) {
            Ok(products) => Self::Products { products, raw },
            Err(e) => {
                debug!(error = %e, "Array frame is not a product list");
                Self::Text(text.to_string())
            }
        }
    }

    /// Whether the frame carries product cards.
    pub fn is_products(&self) -> bool {
        matches!(self, Self::Products { .. })
    }

    /// Converts the frame into an assistant message for the stored history.
    /// Product frames take `caption` as their text.
    pub fn into_message(self, caption: &str) -> NewChatMessage {
        match self {
            Self::Products { raw, .. } => NewChatMessage::assistant(caption, Some(raw)),
            Self::Text(text) => NewChatMessage::assistant(text, None),
        }
    }
}

impl Chat2Pay {
    /// Creates an idle chat socket using this client's transport settings.
    pub fn chat_socket(&self) -> ChatSocket {
        ChatSocket::new(self.socket_config().clone())
    }

    /// Opens the realtime chat for `user_id` on a new socket.
    ///
    /// The returned socket owns the connection: dropping it or calling
    /// [`ChatSocket::disconnect`] stops delivery and any pending reconnect.
    ///
    /// # Errors
    ///
    /// Fails only when the target URL is invalid; connection failures are
    /// reported through `callbacks`.
    pub async fn connect_chat(&self, user_id: &str, callbacks: ChatCallbacks) -> Result<ChatSocket> {
        let socket = self.chat_socket();
        socket
            .connect(ChatConnectConfig::new(
                self.ws_base_url(),
                user_id,
                callbacks,
            ))
            .await?;
        Ok(socket)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_product_array() {
        let text = json!([{"id": "p1", "merchant_id": "m1", "name": "Tea", "price": 12000}]).to_string();
        let frame = ChatFrame::parse(&text);
        let ChatFrame::Products { products, .. } = &frame else {
            panic!("expected products, got {frame:?}");
        };
        assert_eq!(products[0].name, "Tea");

        let message = frame.into_message("Found these");
        assert_eq!(message.content, "Found these");
        assert!(message.products.unwrap().is_array());
    }

    #[test]
    fn test_non_product_json_is_text() {
        assert_eq!(ChatFrame::parse("[1, 2]"), ChatFrame::Text("[1, 2]".into()));
        assert_eq!(ChatFrame::parse("[broken"), ChatFrame::Text("[broken".into()));
        assert_eq!(
            ChatFrame::parse(r#"{"id":"p1"}"#),
            ChatFrame::Text(r#"{"id":"p1"}"#.into())
        );
    }

    #[test]
    fn test_text_message() {
        let message = ChatFrame::parse("Halo!").into_message("unused");
        assert_eq!(message.content, "Halo!");
        assert!(message.products.is_none());
        assert!(!ChatFrame::parse("Halo!").is_products());
    }
}
