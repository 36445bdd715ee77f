mod cli;
mod context;
mod handlers;
mod output;

use airdrop_core::{AppConfig, KeyValueStore, SystemClock};
use airdrop_persistence::keys::BOARD_KEY;
use airdrop_persistence::{FileStore, MemoryStore};
use airdrop_tui::App;
use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};
use context::CliContext;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Ok(log_path) = std::env::var("AIRDROP_DEBUG_LOG") {
        let log_file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        tracing_subscriber::fmt()
            .with_writer(log_file)
            .with_max_level(tracing::Level::DEBUG)
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false)
            .init();
    } else {
        let filter =
            EnvFilter::try_from_env("AIRDROP_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    let cli = Cli::parse();

    if let Some(Commands::Completions { shell }) = &cli.command {
        clap_complete::generate(*shell, &mut Cli::command(), "airdrop", &mut std::io::stdout());
        return Ok(());
    }

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => output::output_error(&format!("{:#}", e)),
    };
    let (kv, board_file) = open_store(&config, cli.ephemeral);

    match cli.command {
        None => {
            tracing::info!(data_dir = %config.effective_data_dir().display(), "starting board");
            let mut app = App::new(config, kv, Arc::new(SystemClock), board_file);
            app.run().await?;
        }
        Some(command) => {
            let mut ctx = CliContext::open(config, kv, Arc::new(SystemClock));
            if let Err(e) = dispatch(&mut ctx, command) {
                output::output_error(&format!("{:#}", e));
            }
        }
    }

    Ok(())
}

fn load_config(cli: &Cli) -> anyhow::Result<AppConfig> {
    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from(path)
            .map_err(|e| anyhow::anyhow!("Failed to load config {}: {}", path.display(), e))?,
        None => AppConfig::load(),
    };
    if let Some(dir) = &cli.data_dir {
        config.data_dir = Some(dir.clone());
    }
    Ok(config)
}

/// Picks the backing store; the board file is only known for on-disk storage.
fn open_store(config: &AppConfig, ephemeral: bool) -> (Arc<dyn KeyValueStore>, Option<PathBuf>) {
    let quota = config.storage.quota_bytes;
    if ephemeral {
        return (Arc::new(MemoryStore::with_quota(quota)), None);
    }
    let store = FileStore::new(config.effective_data_dir()).with_quota(quota);
    let board_file = store.path_for(BOARD_KEY);
    (Arc::new(store), Some(board_file))
}

fn dispatch(ctx: &mut CliContext, command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Column(column_cmd) => handlers::column::handle(ctx, column_cmd.action),
        Commands::Card(card_cmd) => handlers::card::handle(ctx, card_cmd.action),
        Commands::Stats => handlers::board::handle_stats(ctx),
        Commands::Export(args) => handlers::export::handle_export(ctx, args),
        Commands::Import(args) => handlers::export::handle_import(ctx, args),
        Commands::Reminder(reminder_cmd) => handlers::reminder::handle(ctx, reminder_cmd.action),
        Commands::Theme(theme_cmd) => handlers::preferences::handle_theme(ctx, theme_cmd.action),
        Commands::Lang(lang_cmd) => handlers::preferences::handle_lang(ctx, lang_cmd.action),
        Commands::Completions { .. } => Ok(()),
    }
}
