//! Subcommand implementations. Each one receives a [`Ctx`] whose store has
//! already been opened and bootstrapped.

pub mod event;
pub mod search;
pub mod serve;
pub mod settings;
pub mod sync;
pub mod topic;

use annals_core::bootstrap::PageConfig;
use annals_store_sqlite::SqliteStore;
use anyhow::Context as _;
use serde::Serialize;

use crate::config::Config;

pub struct Ctx {
  pub store:  SqliteStore,
  pub config: Config,
  pub page:   PageConfig,
}

pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
  let text = serde_json::to_string_pretty(value).context("failed to render output")?;
  println!("{text}");
  Ok(())
}
