//! Application layer errors

use thiserror::Error;

/// Transport-level marker for a privileged action the bot is not allowed to perform
const NOT_AUTHORIZED: &str = "not authorized";

/// General bot errors
#[derive(Error, Debug)]
pub enum BotError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Plugin error: {0}")]
    Plugin(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl BotError {
    /// Whether the transport refused an action for lack of privileges
    pub fn is_permission_denied(&self) -> bool {
        match self {
            BotError::PermissionDenied(_) => true,
            other => other.to_string().to_lowercase().contains(NOT_AUTHORIZED),
        }
    }
}

/// Command execution errors
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Command not found: {0}")]
    NotFound(String),

    #[error("Execution failed: {0}")]
    ExecutionFailed(String),

    #[error(transparent)]
    Bot(#[from] BotError),
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Parse error: {0}")]
    Parse(String),
}
