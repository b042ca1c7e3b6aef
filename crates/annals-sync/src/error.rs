//! Error type for `annals-sync`.

use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("network error: {0}")]
  Http(#[from] reqwest::Error),

  #[error("remote returned {0}")]
  Status(StatusCode),

  /// The remote rejected the token (401 or 403).
  #[error("remote rejected the access token ({0})")]
  Unauthorized(StatusCode),

  #[error("malformed remote payload: {0}")]
  Json(#[from] serde_json::Error),

  #[error("file {0:?} not found in the remote resource")]
  MissingFile(String),

  #[error("no remote resource id is configured (setting gist_id)")]
  MissingGistId,

  #[error("the {0} collection is empty; nothing to export")]
  EmptyCollection(annals_core::collection::Collection),

  #[error("cannot write {path}: {source}")]
  Io {
    path:   PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error(transparent)]
  Core(#[from] annals_core::Error),
}

impl Error {
  pub fn is_unauthorized(&self) -> bool { matches!(self, Self::Unauthorized(_)) }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
