//! Menu plugin - top-level command menu and per-category sub-menus

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;

use crate::application::context::CommandContext;
use crate::application::errors::{BotError, CommandError};
use crate::application::menu::classifier::CATEGORY_GLYPHS;
use crate::application::menu::{build_menu, build_sub_menu, normalize, stylize, MenuHeader, MenuModel};
use crate::domain::entities::navigation::CATEGORY_MENU_SUFFIX;
use crate::domain::entities::user::jid_local_part;
use crate::domain::entities::{Attachment, Command, CommandDescriptor, CommandHandler, CommandRegistry, OutgoingMessage};
use crate::infrastructure::config::Config;
use crate::plugins::trait_def::Plugin;

/// Name of the top-level menu command
pub const MENU_COMMAND: &str = "meu";
pub const MENU_ALIAS: &str = "allmeu";
const MENU_CATEGORY: &str = "menu";

/// Static presentation settings for the menu
#[derive(Debug, Clone)]
pub struct MenuSettings {
    pub brand: String,
    pub owner: String,
    pub mode: String,
    pub developer: String,
    pub version: String,
    pub image_url: String,
    pub audio_url: Option<String>,
    pub audio_delay: Duration,
}

impl MenuSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            brand: config.bot.name.clone(),
            owner: config.bot.owner_name.clone(),
            mode: config.bot.mode.clone(),
            developer: config.bot.developer.clone(),
            version: config.bot.version.clone(),
            image_url: config.menu.image_url.clone(),
            audio_url: config.menu.audio_url.clone().filter(|u| !u.is_empty()),
            audio_delay: Duration::from_millis(config.menu.audio_delay_ms),
        }
    }

    pub fn header(&self, user: &str, runtime: Duration, prefix: &str, plugins: usize) -> MenuHeader {
        MenuHeader {
            brand: self.brand.clone(),
            user: jid_local_part(user).to_string(),
            runtime: format_uptime(runtime),
            mode: self.mode.clone(),
            prefix: prefix.to_string(),
            owner: self.owner.clone(),
            plugins,
            developer: self.developer.clone(),
            version: self.version.clone(),
        }
    }

    /// Footer shown under every sub-menu
    pub fn footer(&self) -> String {
        format!("{} BOT", self.brand.to_uppercase())
    }
}

/// `3725s` -> `1h 2m 5s`
pub fn format_uptime(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
}

pub struct MenuPlugin {
    settings: Arc<MenuSettings>,
    started_at: Instant,
}

impl MenuPlugin {
    pub fn new(settings: MenuSettings, started_at: Instant) -> Self {
        Self {
            settings: Arc::new(settings),
            started_at,
        }
    }

    /// Categories that get a `<category>-menu` command: every key of the
    /// glyph table plus every named category already registered
    fn sub_menu_categories(registered: &CommandRegistry) -> BTreeSet<String> {
        let mut categories: BTreeSet<String> = CATEGORY_GLYPHS.iter().map(|(key, _)| key.to_string()).collect();
        categories.extend(
            registered
                .descriptors()
                .filter_map(|d| d.category.as_deref())
                .map(normalize)
                .filter(|key| !key.is_empty()),
        );
        categories
    }
}

impl Plugin for MenuPlugin {
    fn name(&self) -> &str {
        "menu"
    }

    fn description(&self) -> &str {
        "Command menu with category navigation"
    }

    fn commands(&self, registered: &CommandRegistry) -> Vec<Command> {
        let mut commands = vec![Command::new(
            CommandDescriptor::new(MENU_COMMAND)
                .with_aliases([MENU_ALIAS])
                .with_description("Show all bot commands")
                .with_category(MENU_CATEGORY)
                .with_react("👌"),
            MainMenu {
                settings: Arc::clone(&self.settings),
                started_at: self.started_at,
            },
        )];

        for category in Self::sub_menu_categories(registered) {
            commands.push(Command::new(
                CommandDescriptor::new(format!("{}{}", category, CATEGORY_MENU_SUFFIX))
                    .with_description(format!("Show {} commands", category))
                    .with_category(MENU_CATEGORY),
                SubMenu {
                    category,
                    footer: self.settings.footer(),
                },
            ));
        }

        commands
    }
}

struct MainMenu {
    settings: Arc<MenuSettings>,
    started_at: Instant,
}

impl MainMenu {
    async fn show(&self, ctx: &CommandContext) -> Result<(), BotError> {
        let header = self.settings.header(&ctx.sender, self.started_at.elapsed(), &ctx.prefix, ctx.registry.len());
        let menu = build_menu(ctx.registry.descriptors(), &ctx.prefix, &header);

        let message = OutgoingMessage::text(menu.text)
            .with_attachment(Attachment::Image { url: self.settings.image_url.clone() })
            .with_navigation(menu.navigation)
            .with_mention(ctx.sender.clone());
        ctx.send(message).await?;

        if let Some(url) = &self.settings.audio_url {
            tokio::time::sleep(self.settings.audio_delay).await;
            let voice = OutgoingMessage::default()
                .with_attachment(Attachment::Audio {
                    url: url.clone(),
                    mimetype: "audio/mp4".to_string(),
                    ptt: true,
                })
                .with_mention(ctx.sender.clone());
            ctx.send(voice).await?;
        }

        Ok(())
    }
}

#[async_trait]
impl CommandHandler for MainMenu {
    async fn handle(&self, ctx: CommandContext) -> Result<(), CommandError> {
        if let Err(e) = self.show(&ctx).await {
            tracing::error!("Menu error: {}", e);
            ctx.reply(format!(
                "❌ {}: Failed to show menu. Try again.\n{}: {}",
                stylize("Error"),
                stylize("Details"),
                e
            ))
            .await?;
        }
        Ok(())
    }
}

struct SubMenu {
    category: String,
    footer: String,
}

#[async_trait]
impl CommandHandler for SubMenu {
    async fn handle(&self, ctx: CommandContext) -> Result<(), CommandError> {
        let model = MenuModel::aggregate(ctx.registry.descriptors());

        let Some(commands) = model.commands(&self.category) else {
            ctx.reply(format!("❌ {}: Category \"{}\" not found.", stylize("Error"), self.category))
                .await?;
            return Ok(());
        };

        let menu = build_sub_menu(&self.category, commands, &ctx.prefix, &self.footer, MENU_COMMAND);
        let message = OutgoingMessage::text(menu.text).with_navigation(menu.navigation);

        if let Err(e) = ctx.send(message).await {
            tracing::error!("Sub-menu error: {}", e);
            ctx.reply(format!(
                "❌ {}: Failed to show {} menu. Try again.",
                stylize("Error"),
                self.category
            ))
            .await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uptime_format() {
        assert_eq!(format_uptime(Duration::from_secs(0)), "0h 0m 0s");
        assert_eq!(format_uptime(Duration::from_secs(3725)), "1h 2m 5s");
        assert_eq!(format_uptime(Duration::from_secs(90_061)), "25h 1m 1s");
    }

    #[test]
    fn registers_sub_menus_for_table_and_registered_categories() {
        let plugin = MenuPlugin::new(MenuSettings::from_config(&Config::default()), Instant::now());

        let mut registered = CommandRegistry::new();
        registered.register(Command::new(
            CommandDescriptor::new("quote").with_category("Quotes Menu"),
            SubMenu { category: String::new(), footer: String::new() },
        ));
        registered.register(Command::new(
            CommandDescriptor::new("blank").with_category("   "),
            SubMenu { category: String::new(), footer: String::new() },
        ));

        let commands = plugin.commands(&registered);
        let patterns: Vec<&str> = commands.iter().map(|c| c.pattern()).collect();

        assert_eq!(patterns[0], MENU_COMMAND);
        assert!(patterns.contains(&"quotes-menu"));
        assert!(patterns.contains(&"sticker-menu"));
        assert!(patterns.contains(&"menu-menu"));
        assert!(!patterns.contains(&"-menu"));
        assert!(commands.iter().all(|c| c.descriptor.category.as_deref() == Some("menu")));
    }
}
