use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::application::context::CommandContext;
use crate::application::errors::CommandError;

/// Separator used to pack alternative names into a single pattern
pub const PATTERN_SEPARATOR: char = '|';

/// Static description of one registered command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandDescriptor {
    pub pattern: String,
    pub aliases: Vec<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub usage: Option<String>,
    /// Emoji reaction sent on the triggering message before the handler runs
    pub react: Option<String>,
    pub suppress_from_menu: bool,
}

impl CommandDescriptor {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            aliases: Vec::new(),
            category: None,
            description: None,
            usage: None,
            react: None,
            suppress_from_menu: false,
        }
    }

    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases = aliases.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    pub fn with_usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = Some(usage.into());
        self
    }

    pub fn with_react(mut self, emoji: impl Into<String>) -> Self {
        self.react = Some(emoji.into());
        self
    }

    pub fn hidden(mut self) -> Self {
        self.suppress_from_menu = true;
        self
    }

    /// First `|`-separated token of the pattern
    pub fn primary_name(&self) -> &str {
        self.pattern
            .split(PATTERN_SEPARATOR)
            .next()
            .unwrap_or(&self.pattern)
    }

    /// Every name this command answers to: the full pattern, each pattern
    /// token, then the aliases, in that order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        let tokens = self
            .pattern
            .contains(PATTERN_SEPARATOR)
            .then(|| self.pattern.split(PATTERN_SEPARATOR))
            .into_iter()
            .flatten();

        std::iter::once(self.pattern.as_str())
            .chain(tokens)
            .chain(self.aliases.iter().map(String::as_str))
            .filter(|name| !name.is_empty())
    }

    pub fn matches(&self, input: &str) -> bool {
        self.names().any(|name| name == input)
    }
}

/// Async body of a command
#[async_trait]
pub trait CommandHandler: Send + Sync {
    async fn handle(&self, ctx: CommandContext) -> Result<(), CommandError>;
}

/// A descriptor bound to its handler
#[derive(Clone)]
pub struct Command {
    pub descriptor: CommandDescriptor,
    handler: Arc<dyn CommandHandler>,
}

impl Command {
    pub fn new<H: CommandHandler + 'static>(descriptor: CommandDescriptor, handler: H) -> Self {
        Self {
            descriptor,
            handler: Arc::new(handler),
        }
    }

    pub fn from_shared(descriptor: CommandDescriptor, handler: Arc<dyn CommandHandler>) -> Self {
        Self { descriptor, handler }
    }

    pub fn pattern(&self) -> &str {
        &self.descriptor.pattern
    }

    pub async fn invoke(&self, ctx: CommandContext) -> Result<(), CommandError> {
        self.handler.handle(ctx).await
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("descriptor", &self.descriptor)
            .finish_non_exhaustive()
    }
}

/// Ordered, append-only list of registered commands
#[derive(Debug, Default, Clone)]
pub struct CommandRegistry {
    commands: Vec<Command>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, command: Command) {
        tracing::debug!("Registered command: {}", command.pattern());
        self.commands.push(command);
    }

    pub fn extend(&mut self, commands: impl IntoIterator<Item = Command>) {
        for command in commands {
            self.register(command);
        }
    }

    pub fn get(&self, index: usize) -> Option<&Command> {
        self.commands.get(index)
    }

    /// Linear scan in registration order; the dispatch path uses `HandlerTable`
    pub fn find(&self, input: &str) -> Option<&Command> {
        self.commands.iter().find(|c| c.descriptor.matches(input))
    }

    pub fn all(&self) -> impl Iterator<Item = &Command> {
        self.commands.iter()
    }

    pub fn descriptors(&self) -> impl Iterator<Item = &CommandDescriptor> {
        self.commands.iter().map(|c| &c.descriptor)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
