//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use crate::application::errors::ConfigError;

/// Emojis that get a participant removed when the filter is on
pub const DEFAULT_BANNED_EMOJIS: &[&str] = &[
    "😠", "🖕", "👎", "💩", "🤮", "👊", "🔫", "💣", "🗑️", "❌", "🚫", "⛔", "💔", "🤬", "😡", "🥊",
];

/// Bot configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub bot: BotConfig,
    #[serde(default)]
    pub menu: MenuConfig,
    #[serde(default)]
    pub moderation: ModerationConfig,
    pub adapters: AdaptersConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct BotConfig {
    pub name: String,
    pub prefix: String,
    pub owner_name: String,
    /// Shown in the menu header, e.g. `public` or `private`
    pub mode: String,
    pub developer: String,
    pub version: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct MenuConfig {
    pub image_url: String,
    pub audio_url: Option<String>,
    pub audio_delay_ms: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ModerationConfig {
    pub banned_emojis: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct AdaptersConfig {
    pub bridge: Option<BridgeConfig>,
    pub console: Option<ConsoleConfig>,
}

/// HTTP gateway in front of the WhatsApp session
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct BridgeConfig {
    pub enabled: bool,
    pub base_url: Option<String>,
    pub token: Option<String>,
    /// Long-poll timeout in seconds
    pub poll_timeout: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ConsoleConfig {
    pub enabled: bool,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            image_url: "https://url.bwmxmd.online/Adams.zjrmnw18.jpeg".to_string(),
            audio_url: None,
            audio_delay_ms: 1000,
        }
    }
}

impl Default for ModerationConfig {
    fn default() -> Self {
        Self {
            banned_emojis: DEFAULT_BANNED_EMOJIS.iter().map(|e| e.to_string()).collect(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bot: BotConfig {
                name: "Mercedes".to_string(),
                prefix: ".".to_string(),
                owner_name: "Marisel".to_string(),
                mode: "public".to_string(),
                developer: "Marisel".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            menu: MenuConfig::default(),
            moderation: ModerationConfig::default(),
            adapters: AdaptersConfig {
                bridge: Some(BridgeConfig {
                    enabled: false,
                    base_url: None,
                    token: None,
                    poll_timeout: 30,
                }),
                console: Some(ConsoleConfig {
                    enabled: true,
                }),
            },
        }
    }
}

impl Config {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .map_err(|e| ConfigError::Parse(format!("Failed to read config: {}", e)))?;

        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bot.prefix.is_empty() {
            return Err(ConfigError::InvalidValue("bot.prefix must not be empty".to_string()));
        }
        if let Some(bridge) = self.bridge() {
            if bridge.base_url.as_deref().unwrap_or("").is_empty() {
                return Err(ConfigError::MissingField("adapters.bridge.base-url".to_string()));
            }
        }
        Ok(())
    }

    /// Bridge settings, when the bridge adapter is enabled
    pub fn bridge(&self) -> Option<&BridgeConfig> {
        self.adapters.bridge.as_ref().filter(|b| b.enabled)
    }

    pub fn load_env() -> Self {
        let mut config = Config::default();
        config.apply_env();
        config
    }

    /// Overlay environment variables onto the loaded values
    pub fn apply_env(&mut self) {
        if let Ok(url) = std::env::var("BRIDGE_URL") {
            let bridge = self.adapters.bridge.get_or_insert(BridgeConfig {
                enabled: true,
                base_url: None,
                token: None,
                poll_timeout: 30,
            });
            bridge.base_url = Some(url);
            bridge.enabled = true;
        }

        if let Ok(token) = std::env::var("BRIDGE_TOKEN") {
            if let Some(ref mut bridge) = self.adapters.bridge {
                bridge.token = Some(token);
            }
        }

        if let Ok(prefix) = std::env::var("BOT_PREFIX") {
            if !prefix.is_empty() {
                self.bot.prefix = prefix;
            }
        }

        if let Ok(owner) = std::env::var("OWNER_NAME") {
            self.bot.owner_name = owner;
        }
    }
}
