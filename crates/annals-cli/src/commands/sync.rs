//! `annals sync pull|push <events|topics>`

use annals_core::collection::Collection;
use annals_sync::{GistClient, PushOutcome, Syncer};
use clap::Subcommand;

use super::Ctx;

#[derive(Subcommand, Debug)]
pub enum SyncCommand {
  /// Replace the local collection with the remote copy.
  Pull { collection: Collection },
  /// Overwrite the remote copy; saves a local file if that fails.
  Push { collection: Collection },
}

pub async fn run(ctx: &Ctx, command: SyncCommand) -> anyhow::Result<()> {
  let client = GistClient::new(&ctx.config.remote_config())?;
  let syncer = Syncer::new(&ctx.store, &client, &ctx.page);

  match command {
    SyncCommand::Pull { collection } => {
      let n = syncer.pull(collection).await?;
      println!("pulled {n} {collection}");
    }
    SyncCommand::Push { collection } => {
      match syncer.push(collection, &ctx.config.export_dir).await? {
        PushOutcome::Pushed { file_name } => println!("pushed {collection} to {file_name}"),
        PushOutcome::SavedLocally { path, reason } => {
          eprintln!("{reason}");
          println!("saved {collection} to {}", path.display());
        }
      }
    }
  }
  Ok(())
}
