//! The `RecordStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `annals-store-sqlite`).
//! Higher layers (`annals-api`, `annals-sync`, `annals-cli`) depend on this
//! abstraction, not on any concrete backend.

use std::future::Future;

use serde_json::Value;

use crate::{
  event::{Event, EventId, NewEvent},
  setting::SettingKey,
  topic::TopicContent,
};

/// Abstraction over the local database holding the three collections:
/// events, topic contents and settings.
///
/// Each method is an independent round trip. Bulk replacements are atomic:
/// either the whole new collection is visible or the old one is untouched.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait RecordStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Events ────────────────────────────────────────────────────────────

  /// All events in store order (the order in which they were inserted).
  fn list_events(
    &self,
  ) -> impl Future<Output = Result<Vec<Event>, Self::Error>> + Send + '_;

  /// Retrieve an event by id. Returns `None` if not found.
  fn get_event(
    &self,
    id: EventId,
  ) -> impl Future<Output = Result<Option<Event>, Self::Error>> + Send + '_;

  /// Validate and persist a manually created event. Blank file links are
  /// dropped.
  fn add_event(
    &self,
    input: NewEvent,
  ) -> impl Future<Output = Result<Event, Self::Error>> + Send + '_;

  /// Overwrite the stored event with the same id.
  ///
  /// Returns an error if no event has that id.
  fn update_event<'a>(
    &'a self,
    event: &'a Event,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Clear the events collection and insert `events` in order, atomically.
  /// Returns the number of inserted records.
  fn replace_events(
    &self,
    events: Vec<NewEvent>,
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + '_;

  fn count_events(
    &self,
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + '_;

  // ── Topic contents ────────────────────────────────────────────────────

  fn list_topic_contents(
    &self,
  ) -> impl Future<Output = Result<Vec<TopicContent>, Self::Error>> + Send + '_;

  fn get_topic_content<'a>(
    &'a self,
    id: &'a str,
  ) -> impl Future<Output = Result<Option<TopicContent>, Self::Error>> + Send + 'a;

  /// Insert or overwrite the content for `content.id`.
  fn put_topic_content(
    &self,
    content: TopicContent,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Clear the topic-contents collection and insert `contents`, atomically.
  fn replace_topic_contents(
    &self,
    contents: Vec<TopicContent>,
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + '_;

  fn count_topic_contents(
    &self,
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + '_;

  // ── Settings ──────────────────────────────────────────────────────────

  /// The stored value, or `None` if the key has never been written.
  fn get_setting(
    &self,
    key: SettingKey,
  ) -> impl Future<Output = Result<Option<Value>, Self::Error>> + Send + '_;

  /// Upsert a value, overwriting unconditionally.
  fn put_setting(
    &self,
    key: SettingKey,
    value: Value,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Write `value` only if `key` has never been written. Returns `true` if
  /// the value was written. The absence check and the write are atomic.
  fn insert_setting_if_absent(
    &self,
    key: SettingKey,
    value: Value,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}
