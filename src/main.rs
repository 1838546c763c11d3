use std::sync::Arc;
use std::time::{Duration, Instant};

use clap::{Parser, Subcommand};

use wabot_plugins::application::menu::build_menu;
use wabot_plugins::application::messaging::MessageParser;
use wabot_plugins::application::services::{ChatWorkers, CommandService, MessageService};
use wabot_plugins::domain::traits::{Bot, SettingsStore};
use wabot_plugins::infrastructure::adapters::bridge::BridgeAdapter;
use wabot_plugins::infrastructure::adapters::console::ConsoleAdapter;
use wabot_plugins::infrastructure::config::Config;
use wabot_plugins::infrastructure::storage::MemoryStore;
use wabot_plugins::plugins::{self, MenuSettings, PluginManager};

#[derive(Parser)]
#[command(name = "wabot")]
#[command(about = "A plugin-driven WhatsApp bot", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.yaml")]
    config: String,

    /// Command prefix (overrides config)
    #[arg(short, long)]
    prefix: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the bot
    Run,
    /// Show version
    Version,
    /// Generate default config
    InitConfig,
    /// Print the main menu for the built-in plugins
    Menu,
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run => {
            let config = load_config(&cli.config, cli.prefix);
            run_bot(config);
        }
        Commands::Version => {
            println!("wabot v{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::InitConfig => {
            init_config();
        }
        Commands::Menu => {
            let config = load_config(&cli.config, cli.prefix);
            print_menu(&config);
        }
    }
}

fn load_config(config_path: &str, prefix_override: Option<String>) -> Config {
    let mut config = if std::path::Path::new(config_path).exists() {
        Config::load(config_path).unwrap_or_else(|e| {
            tracing::warn!("Failed to load config: {}, using defaults", e);
            Config::load_env()
        })
    } else {
        Config::load_env()
    };
    config.apply_env();

    if let Some(prefix) = prefix_override.filter(|p| !p.is_empty()) {
        config.bot.prefix = prefix;
    }
    config
}

fn build_plugins(config: &Config) -> Option<PluginManager> {
    let store: Arc<dyn SettingsStore> = Arc::new(MemoryStore::new());
    match plugins::default_plugins(config, store, Instant::now()) {
        Ok(manager) => Some(manager),
        Err(e) => {
            tracing::error!("Failed to register plugins: {}", e);
            None
        }
    }
}

fn run_bot(config: Config) {
    tracing::info!("Starting wabot: {}", config.bot.name);

    let Some(plugin_manager) = build_plugins(&config) else {
        return;
    };
    let registry = plugin_manager.build_registry();
    tracing::info!(
        "Plugin system initialized with {} plugins and {} commands",
        plugin_manager.len(),
        registry.len()
    );

    let commands = CommandService::new(registry, config.bot.prefix.clone());
    let plugin_manager = Arc::new(plugin_manager);

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!("Failed to start runtime: {}", e);
            return;
        }
    };

    match config.bridge() {
        Some(bridge) => {
            let Some(base_url) = bridge.base_url.clone() else {
                tracing::error!("Bridge adapter enabled without a base-url");
                return;
            };
            let poll_timeout = bridge.poll_timeout;
            let token = bridge.token.clone();
            rt.block_on(async {
                let bot = Arc::new(BridgeAdapter::new(base_url, token));
                run_bridge_bot(bot, commands, plugin_manager, poll_timeout).await;
            });
        }
        None => {
            // Run console bot (dev mode)
            rt.block_on(async {
                let bot = Arc::new(ConsoleAdapter::new(config.bot.name.clone(), config.bot.prefix.clone()));
                run_console_bot(bot, commands, plugin_manager).await;
            });
        }
    }
}

async fn run_bridge_bot(
    bot: Arc<BridgeAdapter>,
    commands: CommandService,
    plugin_manager: Arc<PluginManager>,
    poll_timeout: u64,
) {
    if let Err(e) = bot.start().await {
        tracing::error!("Failed to start bot: {}", e);
        return;
    }

    let info = bot.bot_info();
    tracing::info!("Bot started: {} ({})", info.name, info.number);

    let parser = MessageParser::new(commands.prefix());
    let service = MessageService::new(bot.clone(), commands, plugin_manager);
    let workers = ChatWorkers::new(Arc::new(service));
    let mut offset: i64 = 0;

    tracing::info!("Starting message loop...");

    loop {
        match bot.get_updates(offset, poll_timeout).await {
            Ok(updates) => {
                if !updates.is_empty() {
                    tracing::info!("Received {} updates", updates.len());
                }
                offset = BridgeAdapter::get_next_offset(&updates, offset);
                for update in updates {
                    workers.submit(update.event.into_message(&parser));
                }
            }
            Err(e) => {
                tracing::error!("Error getting updates: {}", e);
                tokio::time::sleep(Duration::from_secs(5)).await;
            }
        }
    }
}

async fn run_console_bot(bot: Arc<ConsoleAdapter>, commands: CommandService, plugin_manager: Arc<PluginManager>) {
    if let Err(e) = bot.start().await {
        tracing::error!("Failed to start bot: {}", e);
        return;
    }

    let info = bot.bot_info();
    tracing::info!("Bot started: {}", info.name);

    let parser = MessageParser::new(commands.prefix());
    let service = MessageService::new(bot.clone(), commands, plugin_manager);
    let workers = ChatWorkers::new(Arc::new(service));

    while let Some(input) = bot.read_line("> ").await {
        if input.is_empty() {
            continue;
        }
        workers.submit(ConsoleAdapter::parse_line(&parser, &input));
    }
    workers.shutdown().await;
}

fn print_menu(config: &Config) {
    let Some(plugin_manager) = build_plugins(config) else {
        return;
    };
    let registry = plugin_manager.build_registry();
    let settings = MenuSettings::from_config(config);
    let header = settings.header("console", Duration::ZERO, &config.bot.prefix, registry.len());
    let menu = build_menu(registry.descriptors(), &config.bot.prefix, &header);

    println!("{}", menu.text);
    for row in menu.navigation.rows() {
        println!("  {} -> {}", row.title, row.row_id);
    }
}

fn init_config() {
    match serde_yaml::to_string(&Config::default()) {
        Ok(yaml) => {
            println!("{}", yaml);
            println!("\nSave this to config.yaml and adjust as needed.");
        }
        Err(e) => tracing::error!("Failed to render config: {}", e),
    }
}
