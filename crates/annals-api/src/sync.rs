//! Handlers for `/sync/{collection}/pull` and `/sync/{collection}/push`.

use std::str::FromStr as _;

use annals_core::{collection::Collection, store::RecordStore};
use annals_sync::{PushOutcome, Syncer};
use axum::{
  Json,
  extract::{Path, State},
};
use serde::Serialize;

use crate::{AppState, error::ApiError};

fn parse_collection(name: &str) -> Result<Collection, ApiError> {
  Collection::from_str(name)
    .map_err(|_| ApiError::NotFound(format!("unknown collection {name:?}")))
}

#[derive(Debug, Serialize)]
pub struct PullSummary {
  pub collection: Collection,
  pub count:      usize,
}

/// `POST /sync/{collection}/pull`: replace the local collection with the
/// remote copy.
pub async fn pull<S: RecordStore>(
  State(state): State<AppState<S>>,
  Path(collection): Path<String>,
) -> Result<Json<PullSummary>, ApiError> {
  let collection = parse_collection(&collection)?;
  let count = Syncer::new(state.store.as_ref(), &state.remote, &state.config)
    .pull(collection)
    .await?;
  Ok(Json(PullSummary { collection, count }))
}

/// `POST /sync/{collection}/push`
///
/// A push that could not reach the remote still answers 200; the body says
/// where the payload was saved instead and why.
pub async fn push<S: RecordStore>(
  State(state): State<AppState<S>>,
  Path(collection): Path<String>,
) -> Result<Json<PushOutcome>, ApiError> {
  let collection = parse_collection(&collection)?;
  let outcome = Syncer::new(state.store.as_ref(), &state.remote, &state.config)
    .push(collection, &state.export_dir)
    .await?;
  Ok(Json(outcome))
}
