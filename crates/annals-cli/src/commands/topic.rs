//! `annals topic ...`

use std::path::PathBuf;

use annals_core::{
  collection::Collection, dates, import, setting::Settings, store::RecordStore,
  topic::TopicContent,
};
use annals_store_sqlite::SqliteStore;
use anyhow::{Context as _, bail};
use clap::Subcommand;
use tokio::io::{AsyncBufReadExt as _, BufReader};

use super::{Ctx, print_json};
use crate::autosave::{DEFAULT_DELAY, Debouncer};

#[derive(Subcommand, Debug)]
pub enum TopicCommand {
  /// List configured topics.
  List,
  /// Print a topic's text and the events its dates refer to.
  Show { id: String },
  /// Replace every topic's content with a JSON file.
  Import { file: PathBuf },
  /// Write all topic contents to the export directory.
  Export,
  /// Find the event a date in topic text refers to.
  Resolve { date: String },
  /// Append lines from stdin to a topic, saving as you type.
  Edit { id: String },
}

pub async fn run(ctx: &Ctx, command: TopicCommand) -> anyhow::Result<()> {
  match command {
    TopicCommand::List => {
      for t in Settings::new(&ctx.store).topics().await? {
        println!("{:<16}  {}", t.id, t.name);
      }
    }

    TopicCommand::Show { id } => {
      let content = ctx
        .store
        .get_topic_content(&id)
        .await?
        .unwrap_or_else(|| TopicContent::empty(id));
      println!("{}", content.content);

      let events = ctx.store.list_events().await?;
      for mention in dates::find_mentions(&content.content) {
        match dates::find_event_by_date(&events, &mention.text) {
          Some(e) => eprintln!("{} -> event {}", mention.text, e.id),
          None => eprintln!("{} -> no event", mention.text),
        }
      }
    }

    TopicCommand::Import { file } => {
      let raw = tokio::fs::read_to_string(&file)
        .await
        .with_context(|| format!("failed to read {}", file.display()))?;
      let contents = import::parse_topics(&raw)
        .with_context(|| format!("{} is not a valid topics file", file.display()))?;
      let n = ctx.store.replace_topic_contents(contents).await?;
      tracing::info!(count = n, "imported topic contents");
      println!("imported {n} topics");
    }

    TopicCommand::Export => {
      let path = annals_sync::export::export_to_file(
        &ctx.store,
        &ctx.page,
        Collection::Topics,
        &ctx.config.export_dir,
      )
      .await?;
      println!("{}", path.display());
    }

    TopicCommand::Resolve { date } => {
      let events = ctx.store.list_events().await?;
      let Some(event) = dates::find_event_by_date(&events, &date) else {
        bail!("no event dated {date}");
      };
      print_json(event)?;
    }

    TopicCommand::Edit { id } => edit(&ctx.store, id).await?,
  }
  Ok(())
}

/// Each input line extends the topic text; saves are debounced and the last
/// one is flushed when input ends.
async fn edit(store: &SqliteStore, id: String) -> anyhow::Result<()> {
  let mut text = store
    .get_topic_content(&id)
    .await?
    .map(|c| c.content)
    .unwrap_or_default();

  let writer = store.clone();
  let topic_id = id.clone();
  let debouncer = Debouncer::new(DEFAULT_DELAY, move |content: String| {
    let store = writer.clone();
    let id = topic_id.clone();
    async move {
      store.put_topic_content(TopicContent::new(id, content)).await?;
      tracing::debug!("autosaved topic");
      Ok::<_, anyhow::Error>(())
    }
  });

  let mut lines = BufReader::new(tokio::io::stdin()).lines();
  while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
    if !text.is_empty() {
      text.push('\n');
    }
    text.push_str(&line);
    debouncer.schedule(text.clone())?;
  }

  debouncer.finish().await?;
  println!("saved topic {id}");
  Ok(())
}
