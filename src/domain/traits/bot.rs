use async_trait::async_trait;
use crate::domain::entities::OutgoingMessage;
use crate::application::errors::BotError;

/// Bot trait - abstraction over the WhatsApp transport
#[async_trait]
pub trait Bot: Send + Sync {
    /// Start the bot and begin listening for messages
    async fn start(&self) -> Result<(), BotError>;

    /// Send a message into a conversation, returning the transport's message id
    async fn send(&self, chat_id: &str, message: OutgoingMessage) -> Result<String, BotError>;

    /// Send plain text
    async fn send_message(&self, chat_id: &str, text: &str) -> Result<String, BotError> {
        self.send(chat_id, OutgoingMessage::text(text)).await
    }

    /// React to a message with an emoji
    async fn react(&self, chat_id: &str, message_id: &str, emoji: &str) -> Result<(), BotError>;

    /// Remove participants from a group; requires the bot to be a group admin
    async fn remove_participants(&self, group_id: &str, participants: &[String]) -> Result<(), BotError>;

    /// Whether `user_id` administers `group_id`
    async fn is_group_admin(&self, group_id: &str, user_id: &str) -> Result<bool, BotError>;

    /// Saved or push name of a contact, if known
    async fn contact_name(&self, user_id: &str) -> Result<Option<String>, BotError>;

    /// Get bot info
    fn bot_info(&self) -> BotInfo;
}

/// Bot information
#[derive(Debug, Clone)]
pub struct BotInfo {
    pub id: String,
    pub name: String,
    pub number: String,
}
