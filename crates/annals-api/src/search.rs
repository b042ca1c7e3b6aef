//! Handler for `GET /search`.

use annals_core::{
  event::Event,
  search::{self, SearchQuery},
  store::RecordStore,
};
use axum::{
  Json,
  extract::{Query, State},
};
use serde::Deserialize;

use crate::{AppState, error::ApiError};

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct SearchParams {
  /// Free text matched against description, date and condemnation description.
  pub q:            String,
  pub tag:          String,
  pub condemnation: String,
}

/// `GET /search[?q=...][&tag=...][&condemnation=...]`
///
/// The query is remembered in the session so a front end can restore it.
pub async fn handler<S: RecordStore>(
  State(state): State<AppState<S>>,
  Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Event>>, ApiError> {
  let query = SearchQuery {
    text:         params.q,
    tag:          params.tag,
    condemnation: params.condemnation,
  };

  let events = state.store.list_events().await.map_err(ApiError::store)?;
  let results = search::search(&events, &query);

  state.session.lock().await.search = query;
  Ok(Json(results))
}
