//! Handlers for `/settings` endpoints.
//!
//! `{key}` is one of `tags`, `condemnations`, `topicsList`, `github_token` or
//! `gist_id`. Unknown keys are 404.

use std::str::FromStr as _;

use annals_core::{
  setting::{SettingKey, Settings},
  store::RecordStore,
};
use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{AppState, error::ApiError};

fn parse_key(key: &str) -> Result<SettingKey, ApiError> {
  SettingKey::from_str(key).map_err(|_| ApiError::NotFound(format!("unknown setting {key:?}")))
}

/// `GET /settings/{key}`: the stored value or the key's empty default.
pub async fn get_one<S: RecordStore>(
  State(state): State<AppState<S>>,
  Path(key): Path<String>,
) -> Result<Json<Value>, ApiError> {
  let key = parse_key(&key)?;
  let value = Settings::new(state.store.as_ref()).get(key).await?;
  Ok(Json(value))
}

/// `PUT /settings/{key}`: overwrite the value.
pub async fn put_one<S: RecordStore>(
  State(state): State<AppState<S>>,
  Path(key): Path<String>,
  Json(value): Json<Value>,
) -> Result<StatusCode, ApiError> {
  let key = parse_key(&key)?;
  Settings::new(state.store.as_ref()).set(key, value).await?;
  Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
pub struct ItemBody {
  /// The label to add, or the topic name for `topicsList`.
  pub value: String,
}

/// `POST /settings/{key}/items` with body `{"value": "..."}`.
///
/// Returns 201 with the updated list, or the new topic descriptor for
/// `topicsList`.
pub async fn add_item<S: RecordStore>(
  State(state): State<AppState<S>>,
  Path(key): Path<String>,
  Json(body): Json<ItemBody>,
) -> Result<impl IntoResponse, ApiError> {
  let key = parse_key(&key)?;
  let settings = Settings::new(state.store.as_ref());

  let created = match key {
    SettingKey::Tags => json!(settings.add_tag(&body.value).await?),
    SettingKey::Condemnations => json!(settings.add_condemnation(&body.value).await?),
    SettingKey::TopicsList => json!(settings.add_topic(&body.value).await?),
    SettingKey::GithubToken | SettingKey::GistId => {
      return Err(ApiError::Invalid(format!("{key} is not a list")));
    }
  };
  Ok((StatusCode::CREATED, Json(created)))
}

/// `DELETE /settings/{key}/items/{index}`: returns the remaining list.
pub async fn remove_item<S: RecordStore>(
  State(state): State<AppState<S>>,
  Path((key, index)): Path<(String, String)>,
) -> Result<Json<Value>, ApiError> {
  let key = parse_key(&key)?;
  let index: usize = index
    .parse()
    .map_err(|_| ApiError::BadRequest(format!("invalid item index {index:?}")))?;
  let remaining = Settings::new(state.store.as_ref()).remove_item(key, index).await?;
  Ok(Json(remaining))
}
