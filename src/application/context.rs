//! Per-invocation context handed to command handlers

use std::fmt;
use std::sync::Arc;

use crate::application::errors::BotError;
use crate::domain::entities::{CommandRegistry, Message, OutgoingMessage};
use crate::domain::traits::Bot;

/// Everything a handler needs to answer one command.
///
/// Built fresh for every invocation; `registry` is the frozen snapshot the
/// command was resolved against.
#[derive(Clone)]
pub struct CommandContext {
    /// Originating conversation
    pub from: String,
    /// Originating participant
    pub sender: String,
    pub args: Vec<String>,
    pub is_group: bool,
    pub is_admin: bool,
    /// Id of the triggering message, quoted by replies
    pub quoted: Option<String>,
    pub prefix: String,
    pub registry: Arc<CommandRegistry>,
    bot: Arc<dyn Bot>,
}

impl CommandContext {
    pub fn new(
        message: &Message,
        args: Vec<String>,
        prefix: impl Into<String>,
        registry: Arc<CommandRegistry>,
        bot: Arc<dyn Bot>,
    ) -> Self {
        Self {
            from: message.chat_id.clone(),
            sender: message.sender_id().to_string(),
            args,
            is_group: message.is_group(),
            is_admin: false,
            quoted: Some(message.id.clone()),
            prefix: prefix.into(),
            registry,
            bot,
        }
    }

    pub fn with_admin(mut self, is_admin: bool) -> Self {
        self.is_admin = is_admin;
        self
    }

    pub fn bot(&self) -> &dyn Bot {
        self.bot.as_ref()
    }

    /// Argument at `index`, if present
    pub fn arg(&self, index: usize) -> Option<&str> {
        self.args.get(index).map(String::as_str)
    }

    /// Send a quoted text reply into the originating conversation
    pub async fn reply(&self, text: impl Into<String>) -> Result<String, BotError> {
        self.send(OutgoingMessage::text(text)).await
    }

    /// Send a quoted message into the originating conversation
    pub async fn send(&self, message: OutgoingMessage) -> Result<String, BotError> {
        self.bot
            .send(&self.from, message.quoting(self.quoted.clone()))
            .await
    }
}

impl fmt::Debug for CommandContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandContext")
            .field("from", &self.from)
            .field("sender", &self.sender)
            .field("args", &self.args)
            .field("is_group", &self.is_group)
            .field("is_admin", &self.is_admin)
            .field("prefix", &self.prefix)
            .finish_non_exhaustive()
    }
}
