//! Error types for `annals-core`.

use thiserror::Error;

use crate::{event::EventId, setting::SettingKey};

#[derive(Debug, Error)]
pub enum Error {
  #[error("event not found: {0}")]
  EventNotFound(EventId),

  /// A required field was empty when the record was about to be saved.
  #[error("validation failed: {0}")]
  Validation(String),

  #[error("{key} already contains {value:?}")]
  Duplicate { key: SettingKey, value: String },

  #[error("{key} has no item at index {index}")]
  IndexOutOfRange { key: SettingKey, index: usize },

  #[error("setting {key} expects {expected}")]
  InvalidSettingValue {
    key:      SettingKey,
    expected: &'static str,
  },

  #[error("invalid date {0:?}: expected yyyy-mm-dd or dd-mm-yyyy")]
  InvalidDate(String),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),

  /// Failure reported by the underlying [`crate::store::RecordStore`].
  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  /// Box a backend error. Used as `.map_err(Error::store)` by helpers that are
  /// generic over the store.
  pub fn store<E>(err: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Store(Box::new(err))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
