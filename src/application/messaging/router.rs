//! Interaction router - resolves navigation selections to command handlers

use std::collections::HashMap;
use std::sync::Arc;

use crate::application::context::CommandContext;
use crate::application::errors::CommandError;
use crate::domain::entities::navigation::CATEGORY_MENU_SUFFIX;
use crate::domain::entities::{Command, CommandRegistry, Message};
use crate::domain::traits::Bot;

/// Name-to-handler index over one registry snapshot.
///
/// Built once per snapshot. When two commands claim the same key the one
/// registered first keeps it.
#[derive(Debug)]
pub struct HandlerTable {
    registry: Arc<CommandRegistry>,
    /// Full pattern strings only
    by_pattern: HashMap<String, usize>,
    /// Full patterns, pattern tokens and aliases
    by_name: HashMap<String, usize>,
}

impl HandlerTable {
    pub fn new(registry: Arc<CommandRegistry>) -> Self {
        let mut by_pattern = HashMap::new();
        let mut by_name = HashMap::new();

        for (index, command) in registry.all().enumerate() {
            let descriptor = &command.descriptor;
            if descriptor.pattern.is_empty() {
                continue;
            }
            by_pattern.entry(descriptor.pattern.clone()).or_insert(index);
            for name in descriptor.names() {
                by_name.entry(name.to_string()).or_insert(index);
            }
        }

        Self { registry, by_pattern, by_name }
    }

    pub fn registry(&self) -> &Arc<CommandRegistry> {
        &self.registry
    }

    pub fn by_pattern(&self, pattern: &str) -> Option<&Command> {
        self.by_pattern.get(pattern).and_then(|&i| self.registry.get(i))
    }

    pub fn by_name(&self, name: &str) -> Option<&Command> {
        self.by_name.get(name).and_then(|&i| self.registry.get(i))
    }
}

/// Outcome of routing one selection event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteOutcome {
    /// No handler matched; nothing was invoked
    Unhandled,
    /// The handler registered under `pattern` was invoked
    Routed { pattern: String },
}

/// Stateless router for selection events
pub struct InteractionRouter {
    table: Arc<HandlerTable>,
    prefix: String,
}

impl InteractionRouter {
    pub fn new(table: Arc<HandlerTable>, prefix: impl Into<String>) -> Self {
        Self {
            table,
            prefix: prefix.into(),
        }
    }

    /// Find the handler for a selection id; first matching rule wins.
    ///
    /// 1. Ids ending in `-menu` match a full pattern after removing the prefix.
    /// 2. Prefixed ids match a pattern, pattern token or alias.
    /// 3. Anything else is unhandled.
    pub fn resolve(&self, selection_id: &str) -> Option<&Command> {
        if selection_id.ends_with(CATEGORY_MENU_SUFFIX) {
            let pattern = if self.prefix.is_empty() {
                selection_id.to_string()
            } else {
                selection_id.replacen(&self.prefix, "", 1)
            };
            return self.table.by_pattern(&pattern);
        }

        let name = selection_id.strip_prefix(self.prefix.as_str())?;
        self.table.by_name(name)
    }

    /// Resolve and invoke. Handler failures are logged and swallowed.
    pub async fn route(&self, event: &Message, selection_id: &str, bot: Arc<dyn Bot>) -> RouteOutcome {
        let Some(command) = self.resolve(selection_id) else {
            tracing::debug!("[{}] Unhandled selection: {}", event.chat_id, selection_id);
            return RouteOutcome::Unhandled;
        };

        let pattern = command.pattern().to_string();
        let ctx = CommandContext::new(event, Vec::new(), self.prefix.clone(), Arc::clone(self.table.registry()), bot);

        tracing::info!("[{}] Selection {} -> {}", event.chat_id, selection_id, pattern);
        if let Err(e) = run_handler(command.clone(), ctx).await {
            tracing::error!("Selection handler '{}' failed: {}", pattern, e);
        }

        RouteOutcome::Routed { pattern }
    }
}

/// Run a handler on its own task so that a panic is reported as an error
/// instead of unwinding into the caller
pub async fn run_handler(command: Command, ctx: CommandContext) -> Result<(), CommandError> {
    let pattern = command.pattern().to_string();
    match tokio::spawn(async move { command.invoke(ctx).await }).await {
        Ok(result) => result,
        Err(e) => Err(CommandError::ExecutionFailed(format!("handler '{}' aborted: {}", pattern, e))),
    }
}
