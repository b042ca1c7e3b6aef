//! JSON HTTP API for annals.
//!
//! Exposes an axum [`Router`] backed by any [`annals_core::store::RecordStore`].
//! Every front end ("page") talks to the store through these routes; none of
//! them hold state of their own beyond the session view state kept here.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = annals_api::router(state);
//! axum::serve(listener, app).await?;
//! ```

pub mod error;
pub mod events;
pub mod search;
pub mod session;
pub mod settings;
pub mod sync;
pub mod topics;

use std::{path::PathBuf, sync::Arc};

use annals_core::{bootstrap::PageConfig, session::SessionState, store::RecordStore};
use annals_sync::GistClient;
use axum::{
  Router,
  routing::{delete, get, post},
};
use tokio::sync::Mutex;
use tower_http::trace::TraceLayer;

pub use error::ApiError;

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all handlers.
pub struct AppState<S> {
  pub store:      Arc<S>,
  pub config:     Arc<PageConfig>,
  pub remote:     GistClient,
  /// Where pushes that cannot reach the remote are written.
  pub export_dir: Arc<PathBuf>,
  pub session:    Arc<Mutex<SessionState>>,
}

impl<S> AppState<S> {
  pub fn new(store: Arc<S>, config: PageConfig, remote: GistClient, export_dir: PathBuf) -> Self {
    Self {
      store,
      config: Arc::new(config),
      remote,
      export_dir: Arc::new(export_dir),
      session: Arc::default(),
    }
  }
}

impl<S> Clone for AppState<S> {
  fn clone(&self) -> Self {
    Self {
      store:      self.store.clone(),
      config:     self.config.clone(),
      remote:     self.remote.clone(),
      export_dir: self.export_dir.clone(),
      session:    self.session.clone(),
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the API router for `state`.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: RecordStore + 'static,
{
  Router::new()
    // Events
    .route(
      "/events",
      get(events::list::<S>).post(events::create::<S>).put(events::import_all::<S>),
    )
    .route("/events/export", get(events::export::<S>))
    .route("/events/by-date", get(events::by_date::<S>))
    .route("/events/{id}", get(events::get_one::<S>).put(events::update::<S>))
    // Topics
    .route("/topics", get(topics::list::<S>))
    .route("/topics/contents", axum::routing::put(topics::import_all::<S>))
    .route("/topics/export", get(topics::export::<S>))
    .route("/topics/{id}", get(topics::get_one::<S>).put(topics::save::<S>))
    .route("/topics/{id}/mentions", get(topics::mentions::<S>))
    // Settings
    .route("/settings/{key}", get(settings::get_one::<S>).put(settings::put_one::<S>))
    .route("/settings/{key}/items", post(settings::add_item::<S>))
    .route("/settings/{key}/items/{index}", delete(settings::remove_item::<S>))
    // Search and session
    .route("/search", get(search::handler::<S>))
    .route("/session", get(session::get_state::<S>).put(session::put_state::<S>))
    // Sync
    .route("/sync/{collection}/pull", post(sync::pull::<S>))
    .route("/sync/{collection}/push", post(sync::push::<S>))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

#[cfg(test)]
mod tests;
