//! Shared fixtures for integration tests

#![allow(dead_code)]

use std::sync::{Arc, Mutex, Once};
use std::time::Instant;

use async_trait::async_trait;

use wabot_plugins::application::errors::BotError;
use wabot_plugins::application::messaging::MessageParser;
use wabot_plugins::application::services::{CommandService, MessageService};
use wabot_plugins::domain::entities::{Message, OutgoingMessage, User};
use wabot_plugins::domain::traits::{Bot, BotInfo, SettingsStore};
use wabot_plugins::infrastructure::config::Config;
use wabot_plugins::infrastructure::storage::MemoryStore;
use wabot_plugins::plugins;

pub const GROUP: &str = "120363000000000000@g.us";
pub const MEMBER: &str = "254700000001@s.whatsapp.net";
pub const BOT_ID: &str = "254799999999@s.whatsapp.net";

static INIT: Once = Once::new();

pub fn ensure_init() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    });
}

/// Bot that records every outgoing action
pub struct RecordingBot {
    pub sent: Mutex<Vec<(String, OutgoingMessage)>>,
    pub reactions: Mutex<Vec<(String, String)>>,
    pub removed: Mutex<Vec<(String, Vec<String>)>>,
    pub admin: bool,
    pub removal_denied: bool,
}

impl RecordingBot {
    pub fn new(admin: bool) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            reactions: Mutex::new(Vec::new()),
            removed: Mutex::new(Vec::new()),
            admin,
            removal_denied: false,
        }
    }

    pub fn denying_removal() -> Self {
        Self {
            removal_denied: true,
            ..Self::new(true)
        }
    }

    pub fn sent(&self) -> Vec<(String, OutgoingMessage)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn texts(&self) -> Vec<String> {
        self.sent().into_iter().map(|(_, m)| m.text).collect()
    }

    pub fn last(&self) -> OutgoingMessage {
        self.sent().pop().map(|(_, m)| m).expect("nothing was sent")
    }

    pub fn removed(&self) -> Vec<(String, Vec<String>)> {
        self.removed.lock().unwrap().clone()
    }
}

#[async_trait]
impl Bot for RecordingBot {
    async fn start(&self) -> Result<(), BotError> {
        Ok(())
    }

    async fn send(&self, chat_id: &str, message: OutgoingMessage) -> Result<String, BotError> {
        let mut sent = self.sent.lock().unwrap();
        sent.push((chat_id.to_string(), message));
        Ok(format!("out-{}", sent.len()))
    }

    async fn react(&self, _chat_id: &str, message_id: &str, emoji: &str) -> Result<(), BotError> {
        self.reactions
            .lock()
            .unwrap()
            .push((message_id.to_string(), emoji.to_string()));
        Ok(())
    }

    async fn remove_participants(&self, group_id: &str, participants: &[String]) -> Result<(), BotError> {
        if self.removal_denied {
            return Err(BotError::PermissionDenied("not authorized".into()));
        }
        self.removed
            .lock()
            .unwrap()
            .push((group_id.to_string(), participants.to_vec()));
        Ok(())
    }

    async fn is_group_admin(&self, _group_id: &str, _user_id: &str) -> Result<bool, BotError> {
        Ok(self.admin)
    }

    async fn contact_name(&self, _user_id: &str) -> Result<Option<String>, BotError> {
        Ok(Some("Ann".to_string()))
    }

    fn bot_info(&self) -> BotInfo {
        BotInfo {
            id: BOT_ID.to_string(),
            name: "Mercedes".to_string(),
            number: "254799999999".to_string(),
        }
    }
}

/// Full pipeline wired with the built-in plugins
pub struct Harness {
    pub bot: Arc<RecordingBot>,
    pub store: Arc<MemoryStore>,
    pub service: MessageService,
    pub parser: MessageParser,
}

impl Harness {
    pub fn new(bot: RecordingBot) -> Self {
        ensure_init();
        let config = Config::default();
        let store = Arc::new(MemoryStore::new());
        let shared: Arc<dyn SettingsStore> = store.clone();

        let manager = plugins::default_plugins(&config, shared, Instant::now()).unwrap();
        let commands = CommandService::new(manager.build_registry(), config.bot.prefix.clone());

        let bot = Arc::new(bot);
        let service = MessageService::new(bot.clone(), commands, Arc::new(manager));

        Self {
            bot,
            store,
            service,
            parser: MessageParser::new(config.bot.prefix),
        }
    }

    pub async fn text(&self, chat: &str, text: &str) {
        let msg = self.parser.parse(chat, text, Some(User::new(MEMBER)));
        self.service.process(msg).await;
    }

    pub async fn select(&self, chat: &str, id: &str) {
        let msg = self.parser.parse_selection(chat, id, Some(User::new(MEMBER)));
        self.service.process(msg).await;
    }

    pub async fn event(&self, msg: Message) {
        self.service.process(msg).await;
    }
}
