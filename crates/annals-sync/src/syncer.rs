//! Whole-collection pull and push.

use std::path::{Path, PathBuf};

use annals_core::{
  Error as CoreError, bootstrap::PageConfig, collection::Collection, import,
  setting::Settings, store::RecordStore,
};
use serde::Serialize;
use tracing::{info, warn};

use crate::{Error, GistClient, Result, export};

/// Why a push ended up on disk instead of the remote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum FallbackReason {
  MissingToken,
  MissingGistId,
  /// The remote rejected the token.
  Unauthorized(String),
  Failed(String),
}

impl std::fmt::Display for FallbackReason {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::MissingToken => f.write_str("no access token is configured"),
      Self::MissingGistId => f.write_str("no remote resource id is configured"),
      Self::Unauthorized(msg) => write!(f, "access token rejected: {msg}"),
      Self::Failed(msg) => write!(f, "remote update failed: {msg}"),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PushOutcome {
  Pushed { file_name: String },
  SavedLocally { path: PathBuf, reason: FallbackReason },
}

/// Binds a store, a remote client and the page configuration together for
/// one sync operation.
pub struct Syncer<'a, S> {
  store:  &'a S,
  client: &'a GistClient,
  config: &'a PageConfig,
}

impl<'a, S: RecordStore> Syncer<'a, S> {
  pub fn new(store: &'a S, client: &'a GistClient, config: &'a PageConfig) -> Self {
    Self { store, client, config }
  }

  /// Replace the local `collection` with the remote copy. Returns the number
  /// of records now stored. Nothing is written unless the fetch and parse
  /// both succeed.
  pub async fn pull(&self, collection: Collection) -> Result<usize> {
    let gist_id = Settings::new(self.store)
      .gist_id()
      .await?
      .ok_or(Error::MissingGistId)?;
    let file_name = self.config.file_name(collection);

    let text = self.client.fetch_file(&gist_id, file_name).await?;

    let count = match collection {
      Collection::Events => {
        let events = import::parse_events(&text)?;
        self.store.replace_events(events).await.map_err(CoreError::store)?
      }
      Collection::Topics => {
        let contents = import::parse_topics(&text)?;
        self
          .store
          .replace_topic_contents(contents)
          .await
          .map_err(CoreError::store)?
      }
    };

    info!(%collection, count, "pulled collection from remote");
    Ok(count)
  }

  /// Fill an empty local `collection` from the remote copy.
  ///
  /// Does nothing when records already exist or no remote id is configured.
  /// Never fails: any error is logged and the local (empty) state is kept.
  /// Returns the number of records pulled, if a pull happened.
  pub async fn pull_if_empty(&self, collection: Collection) -> Option<usize> {
    let count = match collection {
      Collection::Events => self.store.count_events().await,
      Collection::Topics => self.store.count_topic_contents().await,
    };
    match count {
      Ok(0) => {}
      Ok(_) => return None,
      Err(e) => {
        warn!(%collection, error = %CoreError::store(e), "could not count local records");
        return None;
      }
    }

    match Settings::new(self.store).gist_id().await {
      Ok(Some(_)) => {}
      Ok(None) => return None,
      Err(e) => {
        warn!(%collection, error = %e, "could not read the remote id");
        return None;
      }
    }

    match self.pull(collection).await {
      Ok(count) => Some(count),
      Err(e) => {
        warn!(%collection, error = %e, "initial pull failed; continuing with an empty collection");
        None
      }
    }
  }

  /// Overwrite the remote copy of `collection` with the local one. Whenever
  /// the remote cannot be written the same payload is saved under
  /// `export_dir` instead.
  pub async fn push(&self, collection: Collection, export_dir: &Path) -> Result<PushOutcome> {
    let json = export::collection_json(self.store, collection).await?;
    let file_name = self.config.file_name(collection);

    let settings = Settings::new(self.store);
    let token = settings.github_token().await?;
    let gist_id = settings.gist_id().await?;

    let reason = match (token, gist_id) {
      (None, _) => FallbackReason::MissingToken,
      (_, None) => FallbackReason::MissingGistId,
      (Some(token), Some(gist_id)) => {
        match self.client.update_file(&gist_id, &token, file_name, &json).await {
          Ok(()) => {
            info!(%collection, file_name, "pushed collection to remote");
            return Ok(PushOutcome::Pushed { file_name: file_name.to_owned() });
          }
          Err(e @ Error::Unauthorized(_)) => FallbackReason::Unauthorized(e.to_string()),
          Err(e) => FallbackReason::Failed(e.to_string()),
        }
      }
    };

    warn!(%collection, %reason, "push did not reach the remote; saving locally");
    let path = export::write_export(export_dir, self.config, collection, &json).await?;
    Ok(PushOutcome::SavedLocally { path, reason })
  }
}
