//! Console adapter for development/testing

use async_trait::async_trait;
use crate::application::errors::BotError;
use crate::application::messaging::MessageParser;
use crate::domain::entities::{Attachment, Message, OutgoingMessage, User};
use crate::domain::traits::{Bot, BotInfo};

/// Conversation id used for every console event
pub const CONSOLE_CHAT: &str = "console@s.whatsapp.net";

/// Console bot adapter for local development.
///
/// Outgoing messages are printed with their navigation rows so that a
/// row can be picked with `select <id>`.
pub struct ConsoleAdapter {
    info: BotInfo,
    prefix: String,
}

impl ConsoleAdapter {
    pub fn new(name: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            info: BotInfo {
                id: "bot@s.whatsapp.net".to_string(),
                name: name.into(),
                number: "console".to_string(),
            },
            prefix: prefix.into(),
        }
    }

    /// Input help shown when the console session starts
    pub fn banner(&self) -> String {
        format!(
            "{} console. Type {}meu to open the menu, `select <id>` to tap a row, `react <emoji>` to react.",
            self.info.name, self.prefix
        )
    }

    pub async fn read_line(&self, prompt: &str) -> Option<String> {
        use std::io::Write;
        print!("{}", prompt);
        std::io::stdout().flush().ok()?;
        let line = tokio::task::spawn_blocking(|| {
            let mut input = String::new();
            match std::io::stdin().read_line(&mut input) {
                Ok(0) | Err(_) => None,
                Ok(_) => Some(input),
            }
        })
        .await
        .ok()??;
        Some(line.trim().to_string())
    }

    /// Turn one console line into an event.
    ///
    /// `select <id>` taps a navigation row, `react <emoji>` reacts to the
    /// previous message, anything else is a text or command message.
    pub fn parse_line(parser: &MessageParser, line: &str) -> Message {
        let sender = Some(User::new(CONSOLE_CHAT).with_push_name("console"));
        if let Some(id) = line.strip_prefix("select ") {
            return parser.parse_selection(CONSOLE_CHAT, id.trim(), sender);
        }
        if let Some(emoji) = line.strip_prefix("react ") {
            return parser
                .parse_reaction(CONSOLE_CHAT, emoji.trim(), "console-last", Some(CONSOLE_CHAT.to_string()))
                .with_sender_opt(sender);
        }
        parser.parse(CONSOLE_CHAT, line, sender)
    }
}

#[async_trait]
impl Bot for ConsoleAdapter {
    async fn start(&self) -> Result<(), BotError> {
        tracing::info!("Starting console bot (dev mode)");
        println!("{}", self.banner());
        Ok(())
    }

    async fn send(&self, _chat_id: &str, message: OutgoingMessage) -> Result<String, BotError> {
        match &message.attachment {
            Some(Attachment::Image { url }) => println!("[BOT] [image] {}", url),
            Some(Attachment::Audio { url, .. }) => println!("[BOT] [audio] {}", url),
            None => {}
        }
        if !message.text.is_empty() {
            println!("[BOT] {}", message.text);
        }
        if let Some(nav) = &message.navigation {
            println!("  [{}] {}", nav.button_text, nav.title);
            for row in nav.rows() {
                println!("    {} -> select {}", row.title, row.row_id);
            }
        }
        Ok(uuid::Uuid::new_v4().to_string())
    }

    async fn react(&self, _chat_id: &str, _message_id: &str, emoji: &str) -> Result<(), BotError> {
        println!("[BOT] reacted {}", emoji);
        Ok(())
    }

    async fn remove_participants(&self, group_id: &str, participants: &[String]) -> Result<(), BotError> {
        println!("[BOT] removed {} from {}", participants.join(", "), group_id);
        Ok(())
    }

    async fn is_group_admin(&self, _group_id: &str, _user_id: &str) -> Result<bool, BotError> {
        Ok(true)
    }

    async fn contact_name(&self, _user_id: &str) -> Result<Option<String>, BotError> {
        Ok(None)
    }

    fn bot_info(&self) -> BotInfo {
        self.info.clone()
    }
}
