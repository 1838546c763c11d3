//! Message parser - Turns raw transport events into structured messages

use crate::domain::entities::{Content, MembershipAction, Message, MessageType, User};

/// Parses incoming events into structured Message objects
pub struct MessageParser {
    command_prefix: String,
}

impl MessageParser {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            command_prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.command_prefix
    }

    /// Parse a text message
    pub fn parse(&self, chat_id: impl Into<String>, text: impl Into<String>, sender: Option<User>) -> Message {
        let text = text.into();
        let chat_id = chat_id.into();

        if !self.command_prefix.is_empty() && text.starts_with(&self.command_prefix) {
            return self.parse_command(chat_id, &text, sender);
        }

        Message::new(chat_id, Content::Text(text))
            .with_message_type(MessageType::Text)
            .with_sender_opt(sender)
    }

    /// Parse a command message
    fn parse_command(&self, chat_id: String, text: &str, sender: Option<User>) -> Message {
        let cmd_text = &text[self.command_prefix.len()..];

        let mut parts = cmd_text.split_whitespace();
        let name = parts.next().unwrap_or("").to_lowercase();
        let args = parts.map(|s| s.to_string()).collect();

        Message::new(chat_id, Content::Command { name, args })
            .with_message_type(MessageType::Command)
            .with_sender_opt(sender)
    }

    /// Parse a list-row selection
    pub fn parse_selection(&self, chat_id: impl Into<String>, selection_id: impl Into<String>, sender: Option<User>) -> Message {
        Message::from_selection(chat_id, selection_id).with_sender_opt(sender)
    }

    /// Parse a reaction on an earlier message
    pub fn parse_reaction(
        &self,
        chat_id: impl Into<String>,
        emoji: impl Into<String>,
        target: impl Into<String>,
        participant: Option<String>,
    ) -> Message {
        let content = Content::Reaction {
            emoji: emoji.into(),
            target: target.into(),
            participant,
        };
        Message::new(chat_id, content).with_message_type(MessageType::Reaction)
    }

    /// Parse a group membership update; unknown actions yield `Content::Empty`
    pub fn parse_membership(&self, group_id: impl Into<String>, action: &str, participants: Vec<String>) -> Message {
        let content = match MembershipAction::parse(action) {
            Some(action) => Content::Membership { action, participants },
            None => Content::Empty,
        };
        Message::new(group_id, content).with_message_type(MessageType::Membership)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_prefixed_command() {
        let parser = MessageParser::new(".");
        let msg = parser.parse("chat", ".Time  kenya  now", None);
        assert_eq!(
            msg.content,
            Content::Command { name: "time".into(), args: vec!["kenya".into(), "now".into()] }
        );
        assert_eq!(msg.message_type, MessageType::Command);
    }

    #[test]
    fn multi_char_prefix() {
        let parser = MessageParser::new("!!");
        let msg = parser.parse("chat", "!!meu", None);
        assert!(matches!(msg.content, Content::Command { ref name, .. } if name == "meu"));
    }

    #[test]
    fn plain_text_is_not_a_command() {
        let parser = MessageParser::new(".");
        let msg = parser.parse("chat", "hello .meu", None);
        assert_eq!(msg.content.text(), Some("hello .meu"));
    }

    #[test]
    fn unknown_membership_action_is_empty() {
        let parser = MessageParser::new(".");
        let msg = parser.parse_membership("g@g.us", "invite", vec![]);
        assert_eq!(msg.content, Content::Empty);
    }
}
