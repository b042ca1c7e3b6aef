//! Handlers for `/session`: view state that lasts as long as the server.

use annals_core::{session::SessionState, store::RecordStore};
use axum::{Json, extract::State};

use crate::{AppState, error::ApiError};

/// `GET /session`
pub async fn get_state<S: RecordStore>(
  State(state): State<AppState<S>>,
) -> Result<Json<SessionState>, ApiError> {
  Ok(Json(state.session.lock().await.clone()))
}

/// `PUT /session`: replace the whole session state.
pub async fn put_state<S: RecordStore>(
  State(state): State<AppState<S>>,
  Json(body): Json<SessionState>,
) -> Result<Json<SessionState>, ApiError> {
  *state.session.lock().await = body.clone();
  Ok(Json(body))
}
