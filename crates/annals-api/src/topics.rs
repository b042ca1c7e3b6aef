//! Handlers for `/topics` endpoints.
//!
//! Topic descriptors come from the `topicsList` setting; their text lives in
//! the topic-contents collection. A descriptor without stored content reads
//! as empty text.

use annals_core::{
  collection::Collection,
  dates::{self, DateMention},
  event::EventId,
  import,
  setting::Settings,
  store::RecordStore,
  topic::{TopicContent, TopicDescriptor},
};
use axum::{
  Json,
  extract::{Path, State},
  http::header,
  response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{AppState, error::ApiError, events::ImportSummary};

/// `GET /topics`
pub async fn list<S: RecordStore>(
  State(state): State<AppState<S>>,
) -> Result<Json<Vec<TopicDescriptor>>, ApiError> {
  let topics = Settings::new(state.store.as_ref()).topics().await?;
  Ok(Json(topics))
}

/// `GET /topics/{id}`
pub async fn get_one<S: RecordStore>(
  State(state): State<AppState<S>>,
  Path(id): Path<String>,
) -> Result<Json<TopicContent>, ApiError> {
  let content = state
    .store
    .get_topic_content(&id)
    .await
    .map_err(ApiError::store)?
    .unwrap_or_else(|| TopicContent::empty(id));
  Ok(Json(content))
}

#[derive(Debug, Deserialize)]
pub struct ContentBody {
  #[serde(default)]
  pub content: String,
}

/// `PUT /topics/{id}` with body `{"content": "..."}`.
pub async fn save<S: RecordStore>(
  State(state): State<AppState<S>>,
  Path(id): Path<String>,
  Json(body): Json<ContentBody>,
) -> Result<Json<TopicContent>, ApiError> {
  let content = TopicContent::new(id, body.content);
  state
    .store
    .put_topic_content(content.clone())
    .await
    .map_err(ApiError::store)?;
  tracing::debug!(id = %content.id, "saved topic content");
  Ok(Json(content))
}

/// A date mention together with the event it resolves to, if any.
#[derive(Debug, Serialize)]
pub struct ResolvedMention {
  #[serde(flatten)]
  pub mention:  DateMention,
  pub event_id: Option<EventId>,
}

/// `GET /topics/{id}/mentions`
pub async fn mentions<S: RecordStore>(
  State(state): State<AppState<S>>,
  Path(id): Path<String>,
) -> Result<Json<Vec<ResolvedMention>>, ApiError> {
  let Some(content) = state.store.get_topic_content(&id).await.map_err(ApiError::store)? else {
    return Ok(Json(Vec::new()));
  };
  let events = state.store.list_events().await.map_err(ApiError::store)?;

  let resolved = dates::find_mentions(&content.content)
    .into_iter()
    .map(|mention| {
      let event_id = dates::find_event_by_date(&events, &mention.text).map(|e| e.id);
      ResolvedMention { mention, event_id }
    })
    .collect();
  Ok(Json(resolved))
}

/// `PUT /topics/contents`: replace every topic's content with the import
/// array.
pub async fn import_all<S: RecordStore>(
  State(state): State<AppState<S>>,
  Json(body): Json<Value>,
) -> Result<Json<ImportSummary>, ApiError> {
  let contents = import::topics_from_value(body)?;
  let imported = state
    .store
    .replace_topic_contents(contents)
    .await
    .map_err(ApiError::store)?;
  tracing::info!(imported, "imported topic contents");
  Ok(Json(ImportSummary { imported }))
}

/// `GET /topics/export`
pub async fn export<S: RecordStore>(
  State(state): State<AppState<S>>,
) -> Result<impl IntoResponse, ApiError> {
  let json = annals_sync::export::collection_json(state.store.as_ref(), Collection::Topics).await?;
  let disposition = format!("attachment; filename=\"{}\"", state.config.topics_file);
  Ok((
    [
      (header::CONTENT_TYPE, "application/json".to_owned()),
      (header::CONTENT_DISPOSITION, disposition),
    ],
    json,
  ))
}
