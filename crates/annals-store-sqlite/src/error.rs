//! Error type for `annals-store-sqlite`.

use std::path::PathBuf;

use annals_core::event::EventId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The database could not be opened or brought up to the current schema.
  /// Nothing else can run against the store until a later open succeeds.
  #[error("cannot open store at {path}: {source}")]
  Open {
    path:   PathBuf,
    #[source]
    source: tokio_rusqlite::Error,
  },

  #[error("core error: {0}")]
  Core(#[from] annals_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("event not found: {0}")]
  EventNotFound(EventId),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
