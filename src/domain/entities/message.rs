use super::User;
use chrono::{DateTime, Utc};

/// Suffix carried by every group conversation JID
pub const GROUP_SUFFIX: &str = "@g.us";

/// Type of incoming event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageType {
    Text,
    Command,
    Selection,
    Reaction,
    Membership,
    Other(String),
}

impl MessageType {
    pub fn as_str(&self) -> &str {
        match self {
            MessageType::Text => "text",
            MessageType::Command => "command",
            MessageType::Selection => "selection",
            MessageType::Reaction => "reaction",
            MessageType::Membership => "membership",
            MessageType::Other(s) => s,
        }
    }
}

/// Group membership change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MembershipAction {
    Add,
    Remove,
    Promote,
    Demote,
}

impl MembershipAction {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "add" => Some(Self::Add),
            "remove" => Some(Self::Remove),
            "promote" => Some(Self::Promote),
            "demote" => Some(Self::Demote),
            _ => None,
        }
    }
}

/// Message content
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    Text(String),
    Command { name: String, args: Vec<String> },
    /// Identifier of a navigation row the user tapped
    Selection(String),
    Reaction {
        emoji: String,
        /// Id of the message that was reacted to
        target: String,
        participant: Option<String>,
    },
    Membership {
        action: MembershipAction,
        participants: Vec<String>,
    },
    Empty,
}

impl Content {
    pub fn text(&self) -> Option<&str> {
        match self {
            Content::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_command(&self) -> bool {
        matches!(self, Content::Command { .. })
    }
}

/// Represents an incoming event from the transport
#[derive(Debug, Clone)]
pub struct Message {
    pub id: String,
    pub chat_id: String,
    pub sender: Option<User>,
    pub content: Content,
    pub message_type: MessageType,
    pub timestamp: DateTime<Utc>,
    pub platform: String,
    pub raw: Option<serde_json::Value>,
}

impl Message {
    pub fn new(chat_id: impl Into<String>, content: Content) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            chat_id: chat_id.into(),
            sender: None,
            content,
            message_type: MessageType::Text,
            timestamp: Utc::now(),
            platform: "unknown".to_string(),
            raw: None,
        }
    }

    pub fn from_text(chat_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(chat_id, Content::Text(text.into()))
    }

    pub fn from_command(chat_id: impl Into<String>, name: impl Into<String>, args: Vec<String>) -> Self {
        let mut msg = Self::new(chat_id, Content::Command { name: name.into(), args });
        msg.message_type = MessageType::Command;
        msg
    }

    pub fn from_selection(chat_id: impl Into<String>, selection_id: impl Into<String>) -> Self {
        let mut msg = Self::new(chat_id, Content::Selection(selection_id.into()));
        msg.message_type = MessageType::Selection;
        msg
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_sender(mut self, user: User) -> Self {
        self.sender = Some(user);
        self
    }

    pub fn with_sender_opt(mut self, user: Option<User>) -> Self {
        if let Some(u) = user {
            self.sender = Some(u);
        }
        self
    }

    pub fn with_message_type(mut self, mt: MessageType) -> Self {
        self.message_type = mt;
        self
    }

    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = platform.into();
        self
    }

    pub fn with_raw(mut self, raw: serde_json::Value) -> Self {
        self.raw = Some(raw);
        self
    }

    pub fn is_group(&self) -> bool {
        self.chat_id.contains(GROUP_SUFFIX)
    }

    /// Participant that produced the event, falling back to the conversation itself
    pub fn sender_id(&self) -> &str {
        self.sender
            .as_ref()
            .map(|u| u.id.as_str())
            .unwrap_or(&self.chat_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_detection() {
        assert!(Message::from_text("1203630@g.us", "hi").is_group());
        assert!(!Message::from_text("2547000@s.whatsapp.net", "hi").is_group());
    }

    #[test]
    fn sender_falls_back_to_chat() {
        let msg = Message::from_text("2547000@s.whatsapp.net", "hi");
        assert_eq!(msg.sender_id(), "2547000@s.whatsapp.net");

        let msg = msg.with_sender(User::new("111@s.whatsapp.net"));
        assert_eq!(msg.sender_id(), "111@s.whatsapp.net");
    }
}
