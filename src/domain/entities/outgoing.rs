use serde::{Deserialize, Serialize};

use super::NavigationPayload;

/// Media attached to an outgoing message, referenced by URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Attachment {
    Image { url: String },
    /// Sent as a voice note when `ptt` is set
    Audio { url: String, mimetype: String, ptt: bool },
}

/// A message to be delivered into one conversation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutgoingMessage {
    /// Body text, or the caption when an attachment is present
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachment: Option<Attachment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub navigation: Option<NavigationPayload>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mentions: Vec<String>,
    /// Id of the message being replied to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quoted: Option<String>,
}

impl OutgoingMessage {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachment = Some(attachment);
        self
    }

    pub fn with_navigation(mut self, navigation: NavigationPayload) -> Self {
        self.navigation = Some(navigation);
        self
    }

    pub fn with_mention(mut self, jid: impl Into<String>) -> Self {
        self.mentions.push(jid.into());
        self
    }

    pub fn quoting(mut self, message_id: Option<String>) -> Self {
        self.quoted = message_id;
        self
    }
}
