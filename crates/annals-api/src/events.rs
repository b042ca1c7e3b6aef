//! Handlers for `/events` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/events` | `?sort=date` (default), `date_desc` or `store`; pulls from the remote first when empty |
//! | `POST` | `/events` | Body: [`EventBody`]; returns 201 + stored event |
//! | `PUT`  | `/events` | Body: import array; replaces the whole collection |
//! | `GET`  | `/events/export` | Pretty-printed export array without ids |
//! | `GET`  | `/events/by-date` | `?date=`; first event with an equal normalised date |
//! | `GET`  | `/events/{id}` | Single event |
//! | `PUT`  | `/events/{id}` | Body: [`EventBody`]; the date is not editable |

use annals_core::{
  collection::Collection,
  dates::{self, Order},
  event::{Event, EventId, NewEvent},
  import,
  store::RecordStore,
};
use annals_sync::Syncer;
use axum::{
  Json,
  extract::{Path, Query, State},
  http::{StatusCode, header},
  response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{AppState, error::ApiError};

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortParam {
  #[default]
  Date,
  DateDesc,
  /// Insertion order, as stored.
  Store,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
  #[serde(default)]
  pub sort: SortParam,
}

/// `GET /events[?sort=date|date_desc|store]`
///
/// An empty collection is first filled from the remote copy when a remote id
/// is configured; a failed pull still answers with the empty list.
pub async fn list<S: RecordStore>(
  State(state): State<AppState<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<Event>>, ApiError> {
  Syncer::new(state.store.as_ref(), &state.remote, &state.config)
    .pull_if_empty(Collection::Events)
    .await;

  let mut events = state.store.list_events().await.map_err(ApiError::store)?;
  match params.sort {
    SortParam::Date => dates::sort_by_date(&mut events, Order::Ascending),
    SortParam::DateDesc => dates::sort_by_date(&mut events, Order::Descending),
    SortParam::Store => {}
  }
  Ok(Json(events))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

fn parse_id(raw: &str) -> Result<EventId, ApiError> {
  raw
    .parse()
    .map_err(|_| ApiError::BadRequest(format!("invalid event id {raw:?}")))
}

/// `GET /events/{id}`
pub async fn get_one<S: RecordStore>(
  State(state): State<AppState<S>>,
  Path(id): Path<String>,
) -> Result<Json<Event>, ApiError> {
  let id = parse_id(&id)?;
  let event = state
    .store
    .get_event(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("event {id} not found")))?;
  Ok(Json(event))
}

#[derive(Debug, Deserialize)]
pub struct ByDateParams {
  pub date: String,
}

/// `GET /events/by-date?date=...`: the event a date mention in topic text
/// links to.
pub async fn by_date<S: RecordStore>(
  State(state): State<AppState<S>>,
  Query(params): Query<ByDateParams>,
) -> Result<Json<Event>, ApiError> {
  let events = state.store.list_events().await.map_err(ApiError::store)?;
  let event = dates::find_event_by_date(&events, &params.date)
    .cloned()
    .ok_or_else(|| ApiError::NotFound(format!("no event dated {}", params.date)))?;
  Ok(Json(event))
}

// ─── Create / update ──────────────────────────────────────────────────────────

/// JSON body accepted by `POST /events` and `PUT /events/{id}`. Every field
/// except the date and description may be omitted.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EventBody {
  pub date:                     String,
  pub description:              String,
  pub tag:                      String,
  pub file_link:                Vec<String>,
  pub condemnation:             String,
  pub condemnation_description: String,
}

impl From<EventBody> for NewEvent {
  fn from(b: EventBody) -> Self {
    NewEvent {
      date:                     b.date,
      description:              b.description,
      tag:                      b.tag,
      file_link:                b.file_link,
      condemnation:             b.condemnation,
      condemnation_description: b.condemnation_description,
    }
  }
}

/// `POST /events`: returns 201 + the stored [`Event`].
///
/// The date may be given as `yyyy-mm-dd` or `dd-mm-yyyy` and is stored as
/// `dd-mm-yyyy`.
pub async fn create<S: RecordStore>(
  State(state): State<AppState<S>>,
  Json(body): Json<EventBody>,
) -> Result<impl IntoResponse, ApiError> {
  let mut input = NewEvent::from(body);
  input.validate()?;
  input.date = dates::entry_date(&input.date)?;

  let event = state.store.add_event(input).await.map_err(ApiError::store)?;
  tracing::info!(id = %event.id, "created event");
  Ok((StatusCode::CREATED, Json(event)))
}

/// `PUT /events/{id}`
pub async fn update<S: RecordStore>(
  State(state): State<AppState<S>>,
  Path(id): Path<String>,
  Json(body): Json<EventBody>,
) -> Result<Json<Event>, ApiError> {
  let id = parse_id(&id)?;
  let mut event = state
    .store
    .get_event(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("event {id} not found")))?;

  let edit = NewEvent { date: event.date.clone(), ..NewEvent::from(body) };
  edit.validate()?;
  event.apply_edit(edit);

  state.store.update_event(&event).await.map_err(ApiError::store)?;
  Ok(Json(event))
}

// ─── Import / export ──────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ImportSummary {
  pub imported: usize,
}

/// `PUT /events`: body is the import array; the old collection is dropped.
pub async fn import_all<S: RecordStore>(
  State(state): State<AppState<S>>,
  Json(body): Json<Value>,
) -> Result<Json<ImportSummary>, ApiError> {
  let events = import::events_from_value(body)?;
  let imported = state.store.replace_events(events).await.map_err(ApiError::store)?;
  tracing::info!(imported, "imported events");
  Ok(Json(ImportSummary { imported }))
}

/// `GET /events/export`
pub async fn export<S: RecordStore>(
  State(state): State<AppState<S>>,
) -> Result<impl IntoResponse, ApiError> {
  let json = annals_sync::export::collection_json(state.store.as_ref(), Collection::Events)
  .await?;
  let disposition = format!("attachment; filename=\"{}\"", state.config.events_file);
  Ok((
    [
      (header::CONTENT_TYPE, "application/json".to_owned()),
      (header::CONTENT_DISPOSITION, disposition),
    ],
    json,
  ))
}
