//! `annals event ...`

use std::path::PathBuf;

use annals_core::{
  collection::Collection,
  dates::{self, Order},
  event::{EventId, NewEvent},
  import, links,
  store::RecordStore,
};
use annals_sync::{GistClient, Syncer};
use anyhow::{Context as _, bail};
use clap::Subcommand;
use serde_json::json;

use super::{Ctx, print_json};

#[derive(Subcommand, Debug)]
pub enum EventCommand {
  /// List events ordered by date. An empty collection is first pulled from
  /// the remote copy when one is configured.
  List {
    /// Newest first.
    #[arg(long)]
    desc: bool,
  },
  /// Show one event with its file links resolved.
  Show { id: EventId },
  /// Record a new event.
  Add {
    /// `yyyy-mm-dd` or `dd-mm-yyyy`.
    #[arg(long)]
    date:                     String,
    #[arg(long)]
    description:              String,
    #[arg(long, default_value = "")]
    tag:                      String,
    #[arg(long, default_value = "")]
    condemnation:             String,
    #[arg(long, default_value = "")]
    condemnation_description: String,
    /// May be repeated.
    #[arg(long = "link")]
    links:                    Vec<String>,
  },
  /// Replace every event with the contents of a JSON file.
  Import { file: PathBuf },
  /// Write all events to the export directory.
  Export,
}

pub async fn run(ctx: &Ctx, command: EventCommand) -> anyhow::Result<()> {
  match command {
    EventCommand::List { desc } => {
      let client = GistClient::new(&ctx.config.remote_config())?;
      if let Some(n) = Syncer::new(&ctx.store, &client, &ctx.page)
        .pull_if_empty(Collection::Events)
        .await
      {
        eprintln!("pulled {n} events from the remote copy");
      }
      let mut events = ctx.store.list_events().await?;
      let order = if desc { Order::Descending } else { Order::Ascending };
      dates::sort_by_date(&mut events, order);
      for e in &events {
        println!("{:>5}  {:<10}  {:<12}  {}", e.id.0, e.date, e.tag, e.description);
      }
    }

    EventCommand::Show { id } => {
      let Some(event) = ctx.store.get_event(id).await? else {
        bail!("event {id} not found");
      };
      let files: Vec<_> = event
        .file_link
        .iter()
        .map(|l| {
          json!({
            "link":     l,
            "preview":  links::preview_url(l),
            "download": links::download_url(l),
          })
        })
        .collect();
      print_json(&json!({ "event": event, "files": files }))?;
    }

    EventCommand::Add {
      date,
      description,
      tag,
      condemnation,
      condemnation_description,
      links,
    } => {
      let input = NewEvent {
        date: dates::entry_date(&date)?,
        description,
        tag,
        file_link: links,
        condemnation,
        condemnation_description,
      };
      input.validate()?;
      let event = ctx.store.add_event(input).await?;
      println!("created event {}", event.id);
    }

    EventCommand::Import { file } => {
      let raw = tokio::fs::read_to_string(&file)
        .await
        .with_context(|| format!("failed to read {}", file.display()))?;
      let events = import::parse_events(&raw)
        .with_context(|| format!("{} is not a valid events file", file.display()))?;
      let n = ctx.store.replace_events(events).await?;
      tracing::info!(count = n, "imported events");
      println!("imported {n} events");
    }

    EventCommand::Export => {
      let path = annals_sync::export::export_to_file(
        &ctx.store,
        &ctx.page,
        Collection::Events,
        &ctx.config.export_dir,
      )
      .await?;
      println!("{}", path.display());
    }
  }
  Ok(())
}
