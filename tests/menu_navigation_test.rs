//! Menu and navigation integration tests
//! Run with: cargo test --test menu_navigation_test

mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;

use common::{Harness, RecordingBot, GROUP, MEMBER};
use wabot_plugins::application::context::CommandContext;
use wabot_plugins::application::errors::CommandError;
use wabot_plugins::application::menu::{build_menu, MenuHeader};
use wabot_plugins::application::messaging::{HandlerTable, InteractionRouter, RouteOutcome};
use wabot_plugins::domain::entities::{
    Attachment, Command, CommandDescriptor, CommandHandler, CommandRegistry, Message,
};
use wabot_plugins::domain::traits::Bot;
use wabot_plugins::infrastructure::config::Config;
use wabot_plugins::plugins::{ClockPlugin, MenuPlugin, MenuSettings, Plugin, PluginManager};

struct Counting(Arc<AtomicUsize>);

#[async_trait]
impl CommandHandler for Counting {
    async fn handle(&self, _ctx: CommandContext) -> Result<(), CommandError> {
        self.0.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

struct Failing;

#[async_trait]
impl CommandHandler for Failing {
    async fn handle(&self, _ctx: CommandContext) -> Result<(), CommandError> {
        Err(CommandError::ExecutionFailed("boom".into()))
    }
}

struct Panicking;

#[async_trait]
impl CommandHandler for Panicking {
    async fn handle(&self, _ctx: CommandContext) -> Result<(), CommandError> {
        panic!("handler bug");
    }
}

/// Plugin with one named and one blank category
struct Quotes;

impl Plugin for Quotes {
    fn name(&self) -> &str {
        "quotes"
    }

    fn description(&self) -> &str {
        "Quote commands"
    }

    fn commands(&self, _registered: &CommandRegistry) -> Vec<Command> {
        let calls = Arc::new(AtomicUsize::new(0));
        vec![
            Command::new(
                CommandDescriptor::new("quote").with_category("Quotes Menu"),
                Counting(calls.clone()),
            ),
            Command::new(CommandDescriptor::new("blank").with_category("   "), Counting(calls)),
        ]
    }
}

fn header() -> MenuHeader {
    MenuHeader {
        brand: "Mercedes".into(),
        user: "254700000001".into(),
        runtime: "0h 0m 1s".into(),
        mode: "public".into(),
        prefix: ".".into(),
        owner: "Marisel".into(),
        plugins: 3,
        developer: "Marisel".into(),
        version: "0.1.0".into(),
    }
}

fn router(registry: CommandRegistry) -> InteractionRouter {
    InteractionRouter::new(Arc::new(HandlerTable::new(Arc::new(registry))), ".")
}

#[tokio::test]
async fn typed_menu_command_sends_image_navigation_and_mention() {
    let h = Harness::new(RecordingBot::new(false));
    h.text(GROUP, ".meu").await;

    let sent = h.bot.sent();
    assert_eq!(sent.len(), 1);
    let (chat, menu) = &sent[0];
    assert_eq!(chat, GROUP);
    assert!(matches!(menu.attachment, Some(Attachment::Image { .. })));
    assert_eq!(menu.mentions, vec![MEMBER.to_string()]);
    assert!(menu.quoted.is_some());
    assert!(menu.text.contains("│ .time\n"));

    let nav = menu.navigation.as_ref().unwrap();
    assert_eq!(nav.title, "MERCEDES MENU");
    let ids: Vec<&str> = nav.rows().map(|r| r.row_id.as_str()).collect();
    assert_eq!(ids, vec![".menu-menu", ".moderation-menu", ".utility-menu"]);

    let reactions = h.bot.reactions.lock().unwrap().clone();
    assert_eq!(reactions.len(), 1);
    assert_eq!(reactions[0].1, "👌");
}

#[tokio::test]
async fn menu_alias_reaches_the_same_handler() {
    let h = Harness::new(RecordingBot::new(false));
    h.text(GROUP, ".ALLMEU").await;
    assert!(h.bot.last().navigation.is_some());
}

#[tokio::test]
async fn category_selection_opens_sub_menu() {
    let h = Harness::new(RecordingBot::new(false));
    h.select(GROUP, ".utility-menu").await;

    let sub = h.bot.last();
    assert!(sub.text.contains("• .gmt\n• .mytime\n• .time\n"));
    assert!(sub.text.ends_with("*Total Commands*: 3"));

    let nav = sub.navigation.unwrap();
    assert_eq!(nav.footer, "MERCEDES BOT");
    let rows: Vec<_> = nav.rows().collect();
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[0].row_id, ".gmt");
    assert_eq!(rows[3].title, "🔙 Back to Main Menu");
    assert_eq!(rows[3].row_id, ".meu");
}

#[tokio::test]
async fn command_selection_runs_command_by_alias() {
    let h = Harness::new(RecordingBot::new(false));
    h.select(GROUP, ".worldtime").await;
    assert!(h.bot.last().text.starts_with("🕒 *Current World Times*"));

    h.select(GROUP, ".meu").await;
    assert!(h.bot.last().navigation.is_some());
}

#[tokio::test]
async fn empty_category_reports_not_found() {
    let h = Harness::new(RecordingBot::new(false));
    h.select(GROUP, ".sticker-menu").await;
    assert_eq!(h.bot.texts(), vec!["❌ ᴇʀʀᴏʀ: Category \"sticker\" not found.".to_string()]);
}

#[tokio::test]
async fn unknown_selection_is_ignored() {
    let h = Harness::new(RecordingBot::new(false));
    h.select(GROUP, ".nothing-menu").await;
    h.select(GROUP, "no-prefix").await;
    h.text(GROUP, ".nosuchcommand").await;
    assert!(h.bot.sent().is_empty());
}

#[tokio::test]
async fn category_selection_invokes_handler_exactly_once() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut registry = CommandRegistry::new();
    registry.register(Command::new(CommandDescriptor::new("sticker-menu"), Counting(calls.clone())));
    registry.register(Command::new(CommandDescriptor::new("sticker-menu"), Counting(calls.clone())));

    let bot: Arc<dyn Bot> = Arc::new(RecordingBot::new(false));
    let event = Message::from_selection(GROUP, ".sticker-menu");
    let outcome = router(registry).route(&event, ".sticker-menu", bot).await;

    assert_eq!(outcome, RouteOutcome::Routed { pattern: "sticker-menu".into() });
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn menu_ids_match_full_pattern_only() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut registry = CommandRegistry::new();
    registry.register(Command::new(
        CommandDescriptor::new("stickers").with_aliases(["sticker-menu"]),
        Counting(calls.clone()),
    ));

    let bot: Arc<dyn Bot> = Arc::new(RecordingBot::new(false));
    let event = Message::from_selection(GROUP, ".sticker-menu");
    let outcome = router(registry).route(&event, ".sticker-menu", bot).await;

    assert_eq!(outcome, RouteOutcome::Unhandled);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn failing_and_panicking_handlers_are_contained() {
    let mut registry = CommandRegistry::new();
    registry.register(Command::new(CommandDescriptor::new("broken"), Failing));
    registry.register(Command::new(CommandDescriptor::new("crash"), Panicking));
    let router = router(registry);
    let bot: Arc<dyn Bot> = Arc::new(RecordingBot::new(false));

    let event = Message::from_selection(GROUP, ".broken");
    let outcome = router.route(&event, ".broken", bot.clone()).await;
    assert_eq!(outcome, RouteOutcome::Routed { pattern: "broken".into() });

    let event = Message::from_selection(GROUP, ".crash");
    let outcome = router.route(&event, ".crash", bot).await;
    assert_eq!(outcome, RouteOutcome::Routed { pattern: "crash".into() });
}

#[test]
fn menu_rendering_is_deterministic() {
    let descriptors = vec![
        CommandDescriptor::new("time").with_category("Utility Menu"),
        CommandDescriptor::new("sticker").with_category("sticker"),
        CommandDescriptor::new("gmt").with_category("UTILITY"),
    ];
    let first = build_menu(&descriptors, ".", &header());
    let second = build_menu(descriptors.iter().rev(), ".", &header());
    assert_eq!(first, second);

    for row in first.navigation.rows() {
        assert!(row.row_id.starts_with('.'));
        assert!(row.row_id.ends_with("-menu"));
    }
    assert_eq!(first.navigation.sections.len(), 1);
}

#[test]
fn empty_registry_renders_header_only() {
    let menu = build_menu(&Vec::<CommandDescriptor>::new(), ".", &header());
    assert!(menu.navigation.sections.is_empty());
    assert!(menu.text.ends_with("*┗──────────────⊷*"));
}

#[test]
fn every_menu_row_resolves_to_a_handler() {
    let mut manager = PluginManager::new();
    manager.register(ClockPlugin::new(".")).unwrap();
    manager.register(Quotes).unwrap();
    manager
        .register(MenuPlugin::new(MenuSettings::from_config(&Config::default()), Instant::now()))
        .unwrap();
    let registry = manager.build_registry();

    let menu = build_menu(registry.descriptors(), ".", &header());
    let router = router(registry);

    let ids: Vec<&str> = menu.navigation.rows().map(|r| r.row_id.as_str()).collect();
    assert!(ids.contains(&".quotes-menu"));
    assert!(!ids.contains(&".-menu"));
    for id in ids {
        assert!(router.resolve(id).is_some(), "row {} has no handler", id);
    }
}
