//! Plugin trait definitions

use async_trait::async_trait;

use crate::application::errors::BotError;
use crate::domain::entities::{Command, CommandRegistry, Message};
use crate::domain::traits::Bot;

/// Core plugin trait that all plugins must implement
#[async_trait]
pub trait Plugin: Send + Sync {
    /// Unique identifier for the plugin
    fn name(&self) -> &str;

    /// Human-readable description
    fn description(&self) -> &str;

    /// Commands contributed by this plugin.
    ///
    /// `registered` holds every command contributed by plugins registered
    /// earlier, so a plugin registered last can see the whole set.
    fn commands(&self, registered: &CommandRegistry) -> Vec<Command>;

    /// Observe every incoming event after command and selection handling
    async fn on_event(&self, _event: &Message, _bot: &dyn Bot) -> Result<(), BotError> {
        Ok(())
    }
}
