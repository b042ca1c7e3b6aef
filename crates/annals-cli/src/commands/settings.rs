//! `annals settings ...`

use annals_core::setting::{SettingKey, Settings};
use anyhow::Context as _;
use clap::Subcommand;
use serde_json::Value;

use super::{Ctx, print_json};

#[derive(Subcommand, Debug)]
pub enum SettingsCommand {
  /// Print a setting's value.
  Get { key: SettingKey },
  /// Overwrite a setting with a JSON value.
  Set { key: SettingKey, json: String },
  /// Append an entry to `tags`, `condemnations` or `topicsList`.
  Add { key: SettingKey, value: String },
  /// Remove the entry at a zero-based index.
  Remove { key: SettingKey, index: usize },
}

pub async fn run(ctx: &Ctx, command: SettingsCommand) -> anyhow::Result<()> {
  let settings = Settings::new(&ctx.store);

  match command {
    SettingsCommand::Get { key } => print_json(&settings.get(key).await?)?,

    SettingsCommand::Set { key, json } => {
      let value: Value =
        serde_json::from_str(&json).with_context(|| format!("invalid JSON for {key}"))?;
      settings.set(key, value).await?;
    }

    SettingsCommand::Add { key, value } => match key {
      SettingKey::Tags => print_json(&settings.add_tag(&value).await?)?,
      SettingKey::Condemnations => print_json(&settings.add_condemnation(&value).await?)?,
      SettingKey::TopicsList => print_json(&settings.add_topic(&value).await?)?,
      SettingKey::GithubToken | SettingKey::GistId => {
        anyhow::bail!("{key} is not a list; use `settings set`")
      }
    },

    SettingsCommand::Remove { key, index } => {
      print_json(&settings.remove_item(key, index).await?)?
    }
  }
  Ok(())
}
