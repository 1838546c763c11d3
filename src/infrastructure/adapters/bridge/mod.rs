//! HTTP bridge adapter
//!
//! Talks JSON to a gateway process that owns the WhatsApp session. The
//! gateway exposes a long-poll `updates` endpoint for incoming events and a
//! handful of action endpoints.

use std::sync::RwLock;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize};

use crate::application::errors::BotError;
use crate::application::messaging::MessageParser;
use crate::domain::entities::{Message, OutgoingMessage, User};
use crate::domain::traits::{Bot, BotInfo};

/// One queued update from the gateway
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Update {
    pub update_id: i64,
    pub event: BridgeEvent,
}

/// Incoming event as delivered by the gateway
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BridgeEvent {
    Message {
        id: String,
        chat: String,
        sender: Option<String>,
        push_name: Option<String>,
        text: String,
    },
    Selection {
        id: String,
        chat: String,
        sender: Option<String>,
        selected_id: String,
    },
    Reaction {
        chat: String,
        target: String,
        participant: Option<String>,
        emoji: String,
    },
    Participants {
        chat: String,
        action: String,
        participants: Vec<String>,
    },
}

impl BridgeEvent {
    /// Convert into a domain message
    pub fn into_message(self, parser: &MessageParser) -> Message {
        let message = match self {
            BridgeEvent::Message { id, chat, sender, push_name, text } => {
                let user = sender.map(|s| match push_name {
                    Some(name) => User::new(s).with_push_name(name),
                    None => User::new(s),
                });
                parser.parse(chat, text, user).with_id(id)
            }
            BridgeEvent::Selection { id, chat, sender, selected_id } => parser
                .parse_selection(chat, selected_id, sender.map(User::new))
                .with_id(id),
            BridgeEvent::Reaction { chat, target, participant, emoji } => {
                let sender = participant.clone().map(User::new);
                parser
                    .parse_reaction(chat, emoji, target, participant)
                    .with_sender_opt(sender)
            }
            BridgeEvent::Participants { chat, action, participants } => {
                parser.parse_membership(chat, &action, participants)
            }
        };
        message.with_platform("whatsapp")
    }
}

/// Gateway-backed bot adapter
pub struct BridgeAdapter {
    base_url: String,
    token: Option<String>,
    client: Client,
    /// Placeholder identity until `start` fetches the real one
    info: RwLock<BotInfo>,
}

impl BridgeAdapter {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
            client: Client::new(),
            info: RwLock::new(BotInfo {
                id: "unknown".to_string(),
                name: "wabot".to_string(),
                number: "unknown".to_string(),
            }),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn execute(&self, request: RequestBuilder) -> Result<reqwest::Response, BotError> {
        let response = self
            .authorized(request)
            .send()
            .await
            .map_err(|e| BotError::Network(e.to_string()))?;

        match response.status() {
            status if status.is_success() => Ok(response),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                let body = response.text().await.unwrap_or_default();
                Err(BotError::PermissionDenied(format!("not authorized: {}", body)))
            }
            StatusCode::NOT_FOUND => Err(BotError::NotFound(response.url().path().to_string())),
            status => Err(BotError::Network(format!("Gateway error: {}", status))),
        }
    }

    async fn json<T: for<'de> Deserialize<'de>>(&self, request: RequestBuilder) -> Result<T, BotError> {
        self.execute(request)
            .await?
            .json()
            .await
            .map_err(|e| BotError::Parse(e.to_string()))
    }

    /// Fetch the bot's own identity from the gateway
    pub async fn fetch_bot_info(&self) -> Result<BotInfo, BotError> {
        #[derive(Deserialize)]
        struct Me {
            id: String,
            name: String,
        }

        let me: Me = self.json(self.client.get(self.url("/me"))).await?;
        let info = BotInfo {
            number: crate::domain::entities::user::jid_local_part(&me.id).to_string(),
            id: me.id,
            name: me.name,
        };
        *self.info.write().unwrap_or_else(|e| e.into_inner()) = info.clone();
        Ok(info)
    }

    /// Long-poll for updates after `offset`
    pub async fn get_updates(&self, offset: i64, timeout: u64) -> Result<Vec<Update>, BotError> {
        #[derive(Deserialize)]
        struct Response {
            result: Vec<Update>,
        }

        let request = self
            .client
            .get(self.url("/updates"))
            .query(&[("offset", offset.to_string()), ("timeout", timeout.to_string())]);
        let data: Response = self.json(request).await?;
        Ok(data.result)
    }

    /// Get the next update offset
    pub fn get_next_offset(updates: &[Update], current: i64) -> i64 {
        updates
            .iter()
            .map(|u| u.update_id + 1)
            .max()
            .unwrap_or(current)
    }
}

#[async_trait]
impl Bot for BridgeAdapter {
    async fn start(&self) -> Result<(), BotError> {
        tracing::info!("Starting bridge bot via {}", self.base_url);
        let info = self.fetch_bot_info().await?;
        tracing::info!("Gateway session belongs to {} ({})", info.name, info.id);
        Ok(())
    }

    async fn send(&self, chat_id: &str, message: OutgoingMessage) -> Result<String, BotError> {
        #[derive(Serialize)]
        struct SendRequest<'a> {
            chat: &'a str,
            #[serde(flatten)]
            message: OutgoingMessage,
        }

        #[derive(Deserialize)]
        struct Response {
            id: String,
        }

        let request = self
            .client
            .post(self.url("/messages"))
            .json(&SendRequest { chat: chat_id, message });
        let data: Response = self.json(request).await?;
        Ok(data.id)
    }

    async fn react(&self, chat_id: &str, message_id: &str, emoji: &str) -> Result<(), BotError> {
        let body = serde_json::json!({
            "chat": chat_id,
            "message_id": message_id,
            "emoji": emoji,
        });
        self.execute(self.client.post(self.url("/reactions")).json(&body)).await?;
        Ok(())
    }

    async fn remove_participants(&self, group_id: &str, participants: &[String]) -> Result<(), BotError> {
        let body = serde_json::json!({
            "action": "remove",
            "participants": participants,
        });
        let url = self.url(&format!("/groups/{}/participants", group_id));
        self.execute(self.client.post(url).json(&body)).await?;
        Ok(())
    }

    async fn is_group_admin(&self, group_id: &str, user_id: &str) -> Result<bool, BotError> {
        #[derive(Deserialize)]
        struct Admins {
            admins: Vec<String>,
        }

        let url = self.url(&format!("/groups/{}/admins", group_id));
        let data: Admins = self.json(self.client.get(url)).await?;
        Ok(data.admins.iter().any(|a| a == user_id))
    }

    async fn contact_name(&self, user_id: &str) -> Result<Option<String>, BotError> {
        #[derive(Deserialize)]
        struct Contact {
            name: Option<String>,
        }

        let url = self.url(&format!("/contacts/{}", user_id));
        match self.json::<Contact>(self.client.get(url)).await {
            Ok(contact) => Ok(contact.name.filter(|n| !n.is_empty())),
            Err(BotError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn bot_info(&self) -> BotInfo {
        self.info.read().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Content, MembershipAction};

    #[test]
    fn decodes_tagged_events() {
        let raw = r#"[
            {"update_id": 7, "event": {"type": "message", "id": "m1", "chat": "g@g.us", "sender": "1@s.whatsapp.net", "push_name": "Ann", "text": ".time kenya"}},
            {"update_id": 8, "event": {"type": "selection", "id": "m2", "chat": "g@g.us", "sender": null, "selected_id": ".sticker-menu"}},
            {"update_id": 9, "event": {"type": "participants", "chat": "g@g.us", "action": "add", "participants": ["bot@s.whatsapp.net"]}}
        ]"#;
        let updates: Vec<Update> = serde_json::from_str(raw).unwrap();
        assert_eq!(BridgeAdapter::get_next_offset(&updates, 0), 10);

        let parser = MessageParser::new(".");
        let mut messages = updates.into_iter().map(|u| u.event.into_message(&parser));

        let first = messages.next().unwrap();
        assert_eq!(first.id, "m1");
        assert_eq!(first.sender.as_ref().unwrap().display_name(), "Ann");
        assert!(first.content.is_command());

        let second = messages.next().unwrap();
        assert_eq!(second.content, Content::Selection(".sticker-menu".into()));
        assert_eq!(second.sender_id(), "g@g.us");

        let third = messages.next().unwrap();
        assert!(matches!(third.content, Content::Membership { action: MembershipAction::Add, .. }));
    }

    #[test]
    fn offset_unchanged_without_updates() {
        assert_eq!(BridgeAdapter::get_next_offset(&[], 42), 42);
    }
}
