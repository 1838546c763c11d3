//! Moderation plugin - removes group participants who react with banned emojis

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Local;
use tokio::sync::RwLock;

use crate::application::context::CommandContext;
use crate::application::errors::{BotError, CommandError};
use crate::domain::entities::user::jid_local_part;
use crate::domain::entities::{
    Command, CommandDescriptor, CommandHandler, CommandRegistry, Content, MembershipAction, Message, OutgoingMessage,
};
use crate::domain::traits::{Bot, SettingsStore};
use crate::plugins::trait_def::Plugin;

const CATEGORY: &str = "moderation";

/// Banned emoji list shared by every group
pub type BannedEmojis = Arc<RwLock<Vec<String>>>;

pub struct ModerationPlugin {
    store: Arc<dyn SettingsStore>,
    banned: BannedEmojis,
    prefix: String,
}

impl ModerationPlugin {
    pub fn new(store: Arc<dyn SettingsStore>, banned: Vec<String>, prefix: impl Into<String>) -> Self {
        Self {
            store,
            banned: Arc::new(RwLock::new(banned)),
            prefix: prefix.into(),
        }
    }

    pub fn banned(&self) -> BannedEmojis {
        Arc::clone(&self.banned)
    }

    async fn on_reaction(
        &self,
        event: &Message,
        emoji: &str,
        participant: Option<&str>,
        bot: &dyn Bot,
    ) -> Result<(), BotError> {
        if !event.is_group() || !self.store.group(&event.chat_id).await.bad_react_filter {
            return Ok(());
        }
        if !self.banned.read().await.iter().any(|e| e == emoji) {
            return Ok(());
        }

        let group = event.chat_id.as_str();
        let user = participant.unwrap_or_else(|| event.sender_id()).to_string();

        if let Err(e) = self.remove(group, &user, emoji, bot).await {
            tracing::error!("Error removing user {} from {}: {}", user, group, e);
            if e.is_permission_denied() {
                bot.send_message(
                    group,
                    "❌ Failed to remove user!\n\nI need admin permissions to remove users who use bad emojis.",
                )
                .await?;
            }
        }
        Ok(())
    }

    async fn remove(&self, group: &str, user: &str, emoji: &str, bot: &dyn Bot) -> Result<(), BotError> {
        bot.remove_participants(group, &[user.to_string()]).await?;

        let name = match bot.contact_name(user).await {
            Ok(Some(name)) => name,
            Ok(None) => jid_local_part(user).to_string(),
            Err(e) => {
                tracing::warn!("Contact lookup failed for {}: {}", user, e);
                jid_local_part(user).to_string()
            }
        };

        let time = Local::now().format("%-I:%M:%S %p").to_string();
        let notice = OutgoingMessage::text(removal_notice(&name, emoji, &time)).with_mention(user);
        bot.send(group, notice).await?;

        tracing::info!("Removed user {} from group {} for bad reaction: {}", user, group, emoji);
        Ok(())
    }

    async fn on_membership(
        &self,
        event: &Message,
        action: MembershipAction,
        participants: &[String],
        bot: &dyn Bot,
    ) -> Result<(), BotError> {
        let me = bot.bot_info().id;
        if action != MembershipAction::Add || !participants.iter().any(|p| *p == me) {
            return Ok(());
        }

        self.store.group(&event.chat_id).await;
        bot.send_message(&event.chat_id, &welcome_message(&self.prefix)).await?;
        Ok(())
    }
}

#[async_trait]
impl Plugin for ModerationPlugin {
    fn name(&self) -> &str {
        "moderation"
    }

    fn description(&self) -> &str {
        "Immediate removal for bad emoji reactions"
    }

    fn commands(&self, _registered: &CommandRegistry) -> Vec<Command> {
        vec![
            Command::new(
                CommandDescriptor::new("badreact")
                    .with_aliases(["reactfilter", "emojifilter"])
                    .with_description("Configure immediate removal for bad reactions")
                    .with_category(CATEGORY)
                    .with_usage(format!("{}badreact [on/off/list]", self.prefix)),
                BadReact {
                    store: Arc::clone(&self.store),
                    banned: self.banned(),
                },
            ),
            Command::new(
                CommandDescriptor::new("addbademoji")
                    .with_aliases(["bademojiadd"])
                    .with_description("Add emoji to the banned list")
                    .with_category(CATEGORY)
                    .with_usage(format!("{}addbademoji 😡", self.prefix)),
                AddBadEmoji { banned: self.banned() },
            ),
            Command::new(
                CommandDescriptor::new("removebademoji")
                    .with_aliases(["bademojiremove"])
                    .with_description("Remove emoji from the banned list")
                    .with_category(CATEGORY)
                    .with_usage(format!("{}removebademoji 😡", self.prefix)),
                RemoveBadEmoji { banned: self.banned() },
            ),
        ]
    }

    async fn on_event(&self, event: &Message, bot: &dyn Bot) -> Result<(), BotError> {
        match &event.content {
            Content::Reaction { emoji, participant, .. } => {
                self.on_reaction(event, emoji, participant.as_deref(), bot).await
            }
            Content::Membership { action, participants } => {
                self.on_membership(event, *action, participants, bot).await
            }
            _ => Ok(()),
        }
    }
}

/// Reply and return `false` unless the command came from a group admin
async fn require_group_admin(ctx: &CommandContext) -> Result<bool, CommandError> {
    if !ctx.is_group {
        ctx.reply("❌ This command only works in groups").await?;
        return Ok(false);
    }
    if !ctx.is_admin {
        ctx.reply("❌ Only admins can use this command").await?;
        return Ok(false);
    }
    Ok(true)
}

struct BadReact {
    store: Arc<dyn SettingsStore>,
    banned: BannedEmojis,
}

#[async_trait]
impl CommandHandler for BadReact {
    async fn handle(&self, ctx: CommandContext) -> Result<(), CommandError> {
        if !require_group_admin(&ctx).await? {
            return Ok(());
        }

        match ctx.arg(0) {
            Some("on") => {
                self.store.set_bad_react_filter(&ctx.from, true).await;
                ctx.reply("*STRICT MODE ENABLED*\n\n⚠️ Users will be *IMMEDIATELY REMOVED* for using any bad emoji reactions!")
                    .await?;
            }
            Some("off") => {
                self.store.set_bad_react_filter(&ctx.from, false).await;
                ctx.reply("❌ Bad reaction filtering disabled.").await?;
            }
            Some("list") => {
                let list = self.banned.read().await.join(" ");
                ctx.reply(format!(
                    "🚫 *BAD EMOJIS THAT GET USERS REMOVED:*\n\n{}\n\n⚠️ Reacting with any of these will result in immediate removal!",
                    list
                ))
                .await?;
            }
            _ => {
                let enabled = self.store.group(&ctx.from).await.bad_react_filter;
                let count = self.banned.read().await.len();
                ctx.reply(status_report(&ctx.prefix, enabled, count)).await?;
            }
        }
        Ok(())
    }
}

struct AddBadEmoji {
    banned: BannedEmojis,
}

#[async_trait]
impl CommandHandler for AddBadEmoji {
    async fn handle(&self, ctx: CommandContext) -> Result<(), CommandError> {
        if !require_group_admin(&ctx).await? {
            return Ok(());
        }
        let Some(emoji) = ctx.arg(0) else {
            ctx.reply("❌ Please provide an emoji to add").await?;
            return Ok(());
        };

        let reply = {
            let mut banned = self.banned.write().await;
            if banned.iter().any(|e| e == emoji) {
                format!("❌ {} is already in the banned emoji list!", emoji)
            } else {
                banned.push(emoji.to_string());
                format!(
                    "✅ Added {} to banned emoji list!\n\n⚠️ Users reacting with this emoji will now be immediately removed!",
                    emoji
                )
            }
        };
        ctx.reply(reply).await?;
        Ok(())
    }
}

struct RemoveBadEmoji {
    banned: BannedEmojis,
}

#[async_trait]
impl CommandHandler for RemoveBadEmoji {
    async fn handle(&self, ctx: CommandContext) -> Result<(), CommandError> {
        if !require_group_admin(&ctx).await? {
            return Ok(());
        }
        let Some(emoji) = ctx.arg(0) else {
            ctx.reply("❌ Please provide an emoji to remove").await?;
            return Ok(());
        };

        let reply = {
            let mut banned = self.banned.write().await;
            match banned.iter().position(|e| e == emoji) {
                Some(index) => {
                    banned.remove(index);
                    format!(
                        "Removed {} from banned emoji list!\n\nUsers can now react with this emoji without being removed.",
                        emoji
                    )
                }
                None => format!("❌ {} is not in the banned emoji list!", emoji),
            }
        };
        ctx.reply(reply).await?;
        Ok(())
    }
}

pub fn removal_notice(name: &str, emoji: &str, time: &str) -> String {
    format!(
        "⚡ *USER REMOVED IMMEDIATELY!*\n\n\
         👤 *User:* {}\n\
         🚫 *Violation:* Used banned emoji {}\n\
         ⏰ *Time:* {}\n\n\
         ⚠️ *Warning:* Bad reactions are not tolerated in this group!",
        name, emoji, time
    )
}

pub fn status_report(prefix: &str, enabled: bool, banned_count: usize) -> String {
    let status = if enabled { "🟢 ENABLED" } else { "🔴 DISABLED" };
    format!(
        "*STRICT REACTION FILTER*\n\n\
         Status: {status}\n\
         Action: *IMMEDIATE REMOVAL*\n\
         Bad Emojis: {banned_count} emojis\n\n\
         *Commands:*\n\
         • {prefix}badreact on - Enable strict filtering\n\
         • {prefix}badreact off - Disable filtering\n\
         • {prefix}badreact list - Show banned emojis\n\n\
         ⚠️ *WARNING:* Any user reacting with bad emojis will be *IMMEDIATELY REMOVED* from the group!"
    )
}

fn welcome_message(prefix: &str) -> String {
    format!(
        "🤖 *Bot Joined Group*\n\n\
         ⚡ *Strict Reaction Filter Available*\n\n\
         Use *{prefix}badreact on* to enable immediate removal of users who react with bad emojis!\n\
         Use *{prefix}badreact list* to see banned emojis.\n\n\
         ⚠️ *Warning:* When enabled, users will be *IMMEDIATELY REMOVED* for bad reactions!"
    )
}
