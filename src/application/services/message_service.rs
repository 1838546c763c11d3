use std::sync::Arc;

use crate::application::errors::CommandError;
use crate::application::messaging::{InteractionRouter, RouteOutcome};
use crate::domain::entities::{Content, Message};
use crate::domain::traits::Bot;
use crate::plugins::PluginManager;

use super::CommandService;

/// Service for processing incoming events.
///
/// Every event is handled to completion; nothing that fails in a handler,
/// the router or a plugin hook escapes `process`.
pub struct MessageService {
    bot: Arc<dyn Bot>,
    commands: CommandService,
    router: InteractionRouter,
    plugins: Arc<PluginManager>,
}

impl MessageService {
    pub fn new(bot: Arc<dyn Bot>, commands: CommandService, plugins: Arc<PluginManager>) -> Self {
        let router = InteractionRouter::new(commands.table(), commands.prefix());
        Self {
            bot,
            commands,
            router,
            plugins,
        }
    }

    pub fn bot(&self) -> &Arc<dyn Bot> {
        &self.bot
    }

    pub fn commands(&self) -> &CommandService {
        &self.commands
    }

    /// Process one incoming event
    pub async fn process(&self, message: Message) {
        tracing::debug!("[{}] Processing {} event", message.chat_id, message.message_type.as_str());

        match &message.content {
            Content::Command { .. } => self.run_command(&message).await,
            Content::Selection(id) => {
                if let RouteOutcome::Routed { pattern } = self.router.route(&message, id, Arc::clone(&self.bot)).await {
                    tracing::debug!("[{}] Routed to {}", message.chat_id, pattern);
                }
            }
            _ => {}
        }

        self.plugins.broadcast(&message, self.bot.as_ref()).await;
    }

    async fn run_command(&self, message: &Message) {
        let is_admin = self.sender_is_admin(message).await;

        match self.commands.dispatch(message, Arc::clone(&self.bot), is_admin).await {
            Ok(_) => {}
            Err(CommandError::NotFound(name)) => {
                tracing::debug!("[{}] Unknown command: {}", message.chat_id, name);
            }
            Err(e) => {
                tracing::error!("[{}] Command failed: {}", message.chat_id, e);
            }
        }
    }

    async fn sender_is_admin(&self, message: &Message) -> bool {
        if !message.is_group() {
            return false;
        }
        match self.bot.is_group_admin(&message.chat_id, message.sender_id()).await {
            Ok(is_admin) => is_admin,
            Err(e) => {
                tracing::warn!("[{}] Admin lookup failed: {}", message.chat_id, e);
                false
            }
        }
    }
}
