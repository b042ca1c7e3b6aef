//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  /// The request was well-formed but a field failed validation.
  #[error("invalid: {0}")]
  Invalid(String),

  #[error("conflict: {0}")]
  Conflict(String),

  /// The remote resource could not be read or written.
  #[error("remote error: {0}")]
  Remote(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  pub fn store<E>(err: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Store(Box::new(err))
  }
}

impl From<annals_core::Error> for ApiError {
  fn from(err: annals_core::Error) -> Self {
    use annals_core::Error as E;
    match err {
      E::EventNotFound(_) | E::IndexOutOfRange { .. } => Self::NotFound(err.to_string()),
      E::Validation(_) | E::InvalidSettingValue { .. } | E::InvalidDate(_) => {
        Self::Invalid(err.to_string())
      }
      E::Duplicate { .. } => Self::Conflict(err.to_string()),
      E::Serialization(_) => Self::BadRequest(err.to_string()),
      E::Store(e) => Self::Store(e),
    }
  }
}

impl From<annals_sync::Error> for ApiError {
  fn from(err: annals_sync::Error) -> Self {
    use annals_sync::Error as E;
    match err {
      E::Http(_) | E::Status(_) | E::Unauthorized(_) | E::Json(_) | E::MissingFile(_) => {
        Self::Remote(err.to_string())
      }
      E::MissingGistId | E::EmptyCollection(_) => Self::Invalid(err.to_string()),
      E::Io { .. } => Self::store(err),
      E::Core(e) => e.into(),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::Invalid(m) => (StatusCode::UNPROCESSABLE_ENTITY, m.clone()),
      ApiError::Conflict(m) => (StatusCode::CONFLICT, m.clone()),
      ApiError::Remote(m) => (StatusCode::BAD_GATEWAY, m.clone()),
      ApiError::Store(e) => {
        tracing::error!(error = %e, "store failure");
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
      }
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
