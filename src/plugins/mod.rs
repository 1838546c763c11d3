//! Plugin system for wabot
//!
//! Plugins contribute commands and observe incoming events

pub mod clock;
pub mod manager;
pub mod menu;
pub mod moderation;
pub mod trait_def;

use std::sync::Arc;
use std::time::Instant;

pub use clock::ClockPlugin;
pub use manager::{PluginInfo, PluginManager};
pub use menu::{MenuPlugin, MenuSettings};
pub use moderation::ModerationPlugin;
pub use trait_def::Plugin;

use crate::application::errors::BotError;
use crate::domain::traits::SettingsStore;
use crate::infrastructure::config::Config;

/// Register the built-in plugins.
///
/// The menu plugin goes last so that its sub-menu commands cover every
/// category contributed before it.
pub fn default_plugins(
    config: &Config,
    store: Arc<dyn SettingsStore>,
    started_at: Instant,
) -> Result<PluginManager, BotError> {
    let mut manager = PluginManager::new();
    manager.register(ClockPlugin::new(config.bot.prefix.clone())).map_err(BotError::Plugin)?;
    manager
        .register(ModerationPlugin::new(
            store,
            config.moderation.banned_emojis.clone(),
            config.bot.prefix.clone(),
        ))
        .map_err(BotError::Plugin)?;
    manager
        .register(MenuPlugin::new(MenuSettings::from_config(config), started_at))
        .map_err(BotError::Plugin)?;
    Ok(manager)
}
