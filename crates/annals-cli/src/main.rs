//! `annals`, an offline-first record keeper for events, topic notes and their
//! taxonomies.
//!
//! # Usage
//!
//! ```text
//! annals event add --date 2024-03-05 --description "..." --tag "قوي"
//! annals topic edit 1 < notes.txt
//! annals sync push events
//! annals serve
//! ```
//!
//! Configuration is read from `annals.toml` (or `--config`) and `ANNALS_*`
//! environment variables. Every invocation opens the store and bootstraps it
//! before doing anything else.

mod autosave;
mod commands;
mod config;

use std::path::PathBuf;

use annals_core::bootstrap::bootstrap;
use annals_store_sqlite::SqliteStore;
use anyhow::Context as _;
use clap::{Parser, Subcommand};
use commands::{
  Ctx, event::EventCommand, search::SearchArgs, settings::SettingsCommand, sync::SyncCommand,
  topic::TopicCommand,
};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "annals", version, about = "Offline-first record keeper")]
struct Args {
  /// Path to the TOML configuration file.
  #[arg(short, long, value_name = "FILE", default_value = "annals.toml")]
  config: PathBuf,

  /// SQLite database file; overrides `store_path` from the config.
  #[arg(long, env = "ANNALS_STORE", value_name = "FILE")]
  store: Option<PathBuf>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Serve the JSON API.
  Serve,
  #[command(subcommand)]
  Event(EventCommand),
  #[command(subcommand)]
  Topic(TopicCommand),
  #[command(subcommand)]
  Settings(SettingsCommand),
  /// Search events by text, tag and condemnation.
  Search(SearchArgs),
  #[command(subcommand)]
  Sync(SyncCommand),
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let args = Args::parse();

  let mut config = config::Config::load(&args.config)?;
  if let Some(store) = args.store {
    config.store_path = config::expand_tilde(&store);
  }
  let page = config.page_config();

  let store = SqliteStore::open(&config.store_path)
    .await
    .with_context(|| format!("failed to open store at {}", config.store_path.display()))?;
  let report = bootstrap(&store, &page)
    .await
    .context("failed to initialise the store")?;
  if !report.seeded_settings.is_empty() || report.seeded_topics > 0 {
    tracing::info!(
      settings = ?report.seeded_settings,
      topics = report.seeded_topics,
      "seeded defaults"
    );
  }

  let ctx = Ctx { store, config, page };
  match args.command {
    Command::Serve => commands::serve::run(ctx).await,
    Command::Event(cmd) => commands::event::run(&ctx, cmd).await,
    Command::Topic(cmd) => commands::topic::run(&ctx, cmd).await,
    Command::Settings(cmd) => commands::settings::run(&ctx, cmd).await,
    Command::Search(search) => commands::search::run(&ctx, search).await,
    Command::Sync(cmd) => commands::sync::run(&ctx, cmd).await,
  }
}
