//! Plugin manager - handles plugin registration and event fan-out

use std::sync::Arc;

use tracing::{error, info};

use crate::domain::entities::{CommandRegistry, Message};
use crate::domain::traits::Bot;
use crate::plugins::trait_def::Plugin;

/// Manages all plugins for the bot, in registration order
#[derive(Default)]
pub struct PluginManager {
    plugins: Vec<Arc<dyn Plugin>>,
}

impl PluginManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a plugin
    pub fn register<P: Plugin + 'static>(&mut self, plugin: P) -> Result<(), String> {
        let name = plugin.name().to_string();

        if self.has_plugin(&name) {
            return Err(format!("Plugin '{}' already registered", name));
        }

        info!("Registering plugin: {}", name);
        self.plugins.push(Arc::new(plugin));
        Ok(())
    }

    /// Collect every plugin's commands into one registry
    pub fn build_registry(&self) -> CommandRegistry {
        let mut registry = CommandRegistry::new();
        for plugin in &self.plugins {
            let commands = plugin.commands(&registry);
            info!("Plugin '{}' contributed {} commands", plugin.name(), commands.len());
            registry.extend(commands);
        }
        registry
    }

    /// Deliver an event to every plugin; failures are logged and skipped
    pub async fn broadcast(&self, event: &Message, bot: &dyn Bot) {
        for plugin in &self.plugins {
            if let Err(e) = plugin.on_event(event, bot).await {
                error!("Plugin '{}' error: {}", plugin.name(), e);
            }
        }
    }

    /// List all registered plugins
    pub fn list_plugins(&self) -> Vec<PluginInfo> {
        self.plugins
            .iter()
            .map(|plugin| PluginInfo {
                name: plugin.name().to_string(),
                description: plugin.description().to_string(),
            })
            .collect()
    }

    /// Check if a plugin exists
    pub fn has_plugin(&self, name: &str) -> bool {
        self.plugins.iter().any(|p| p.name() == name)
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}

/// Plugin information for listing
#[derive(Debug, Clone, serde::Serialize)]
pub struct PluginInfo {
    pub name: String,
    pub description: String,
}
