//! Local export of whole collections as pretty-printed JSON files.

use std::path::{Path, PathBuf};

use annals_core::{
  Error as CoreError, bootstrap::PageConfig, collection::Collection, import,
  store::RecordStore,
};

use crate::{Error, Result};

/// Serialise the full `collection` in its export shape. Events are written
/// without their store-assigned ids.
pub async fn collection_json<S: RecordStore>(
  store: &S,
  collection: Collection,
) -> Result<String> {
  let json = match collection {
    Collection::Events => {
      let events = store.list_events().await.map_err(CoreError::store)?;
      if events.is_empty() {
        return Err(Error::EmptyCollection(collection));
      }
      import::export_events(&events)?
    }
    Collection::Topics => {
      let contents = store.list_topic_contents().await.map_err(CoreError::store)?;
      if contents.is_empty() {
        return Err(Error::EmptyCollection(collection));
      }
      import::export_topics(&contents)?
    }
  };
  Ok(json)
}

/// Write `json` to `dir`, named after the collection. Returns the path.
pub async fn write_export(
  dir: &Path,
  config: &PageConfig,
  collection: Collection,
  json: &str,
) -> Result<PathBuf> {
  let path = dir.join(config.file_name(collection));
  tokio::fs::write(&path, json)
    .await
    .map_err(|source| Error::Io { path: path.clone(), source })?;
  tracing::info!(%collection, path = %path.display(), "exported collection");
  Ok(path)
}

/// Serialise and write `collection` in one go.
pub async fn export_to_file<S: RecordStore>(
  store: &S,
  config: &PageConfig,
  collection: Collection,
  dir: &Path,
) -> Result<PathBuf> {
  let json = collection_json(store, collection).await?;
  write_export(dir, config, collection, &json).await
}
