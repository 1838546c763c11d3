use std::sync::Arc;

use crate::application::context::CommandContext;
use crate::application::errors::CommandError;
use crate::application::messaging::{run_handler, HandlerTable};
use crate::domain::entities::{Command, CommandRegistry, Content, Message};
use crate::domain::traits::Bot;

/// Service for resolving and executing typed commands
pub struct CommandService {
    table: Arc<HandlerTable>,
    prefix: String,
}

impl CommandService {
    /// Freeze `registry` into the snapshot every handler will see
    pub fn new(registry: CommandRegistry, prefix: impl Into<String>) -> Self {
        Self {
            table: Arc::new(HandlerTable::new(Arc::new(registry))),
            prefix: prefix.into(),
        }
    }

    pub fn registry(&self) -> &Arc<CommandRegistry> {
        self.table.registry()
    }

    pub fn table(&self) -> Arc<HandlerTable> {
        Arc::clone(&self.table)
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn find(&self, name: &str) -> Option<&Command> {
        self.table.by_name(name)
    }

    /// Run the command carried by `message`.
    ///
    /// Returns `Ok(false)` when the message is not a command. Unknown names
    /// yield `CommandError::NotFound`; handler failures are returned to the
    /// caller, never raised.
    pub async fn dispatch(&self, message: &Message, bot: Arc<dyn Bot>, is_admin: bool) -> Result<bool, CommandError> {
        let Content::Command { name, args } = &message.content else {
            return Ok(false);
        };

        let cmd = self
            .find(name)
            .ok_or_else(|| CommandError::NotFound(name.clone()))?
            .clone();

        if let Some(emoji) = &cmd.descriptor.react {
            if let Err(e) = bot.react(&message.chat_id, &message.id, emoji).await {
                tracing::warn!("Failed to react to {}: {}", message.id, e);
            }
        }

        tracing::info!("[{}] Command {} args={:?}", message.chat_id, cmd.pattern(), args);
        let ctx = CommandContext::new(message, args.clone(), self.prefix.clone(), Arc::clone(self.registry()), bot)
            .with_admin(is_admin);

        run_handler(cmd, ctx).await?;
        Ok(true)
    }
}
