//! Persisted chat history of the signed-in customer.

use crate::constants::endpoints;
use crate::types::ChatMessage;
use crate::types::NewChatMessage;
use crate::types::chat::ChatHistory;
use crate::Chat2Pay;
use chat2pay_core::{ReadOptions, RequestOptions, Result};
use tracing::{debug, instrument};

impl Chat2Pay {
    /// Fetches the stored conversation, oldest first.
    ///
    /// A failed envelope or a missing payload yields an empty history rather
    /// than an error; transport and HTTP errors still propagate.
    #[instrument(skip(self))]
    pub async fn fetch_chat_history(&self) -> Result<Vec<ChatMessage>> {
        let envelope = self
            .get_envelope::<ChatHistory>(endpoints::CHAT_HISTORY, ReadOptions::default())
            .await?;
        if !envelope.status {
            debug!(error = ?envelope.error, "Chat history unavailable");
            return Ok(Vec::new());
        }
        Ok(envelope.data.map(|h| h.messages).unwrap_or_default())
    }

    /// Appends a message to the stored conversation.
    pub async fn save_chat_message(&self, message: &NewChatMessage) -> Result<()> {
        self.http()
            .post(
                endpoints::CHAT_MESSAGES,
                RequestOptions::default().with_json(message)?,
            )
            .await?;
        Ok(())
    }

    /// Deletes the stored conversation.
    pub async fn clear_chat_history(&self) -> Result<()> {
        self.http()
            .delete(endpoints::CHAT_HISTORY, ReadOptions::default())
            .await?;
        Ok(())
    }
}
