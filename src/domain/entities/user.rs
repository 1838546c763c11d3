use std::fmt;

/// A WhatsApp participant, identified by JID (`<number>@s.whatsapp.net`)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct User {
    pub id: String,
    pub push_name: Option<String>,
    pub is_bot: bool,
}

impl User {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            push_name: None,
            is_bot: false,
        }
    }

    pub fn with_push_name(mut self, name: impl Into<String>) -> Self {
        self.push_name = Some(name.into());
        self
    }

    /// Local part of the JID (the phone number for regular accounts)
    pub fn local_part(&self) -> &str {
        jid_local_part(&self.id)
    }

    pub fn display_name(&self) -> String {
        match self.push_name.as_deref() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => self.local_part().to_string(),
        }
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Everything before the `@` of a JID, or the whole string when there is none
pub fn jid_local_part(jid: &str) -> &str {
    jid.split('@').next().unwrap_or(jid)
}
