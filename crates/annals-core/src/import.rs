//! Import and export of whole collections as JSON.
//!
//! Imported events may omit any field or carry `null`; every field is
//! defaulted on ingestion so that stored events are always complete.
//! `fileLink` may be a single string or an array of strings. A field of the
//! wrong type reads as empty and non-string links are skipped, so one odd
//! record never fails the whole import. Any `id` in the input is ignored
//! because identifiers are assigned by the store.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::{
  Result,
  event::{Event, NewEvent},
  topic::TopicContent,
};

// ─── Events ──────────────────────────────────────────────────────────────────

/// The permissive on-disk shape of one imported event.
#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct ImportedEvent {
  #[serde(deserialize_with = "lenient_string")]
  date:                     String,
  #[serde(deserialize_with = "lenient_string")]
  description:              String,
  #[serde(deserialize_with = "lenient_string")]
  tag:                      String,
  #[serde(deserialize_with = "lenient_links")]
  file_link:                Vec<String>,
  #[serde(deserialize_with = "lenient_string")]
  condemnation:             String,
  #[serde(deserialize_with = "lenient_string")]
  condemnation_description: String,
}

/// A string field; `null` or any other type reads as empty.
fn lenient_string<'de, D: Deserializer<'de>>(de: D) -> Result<String, D::Error> {
  Ok(match Value::deserialize(de)? {
    Value::String(s) => s,
    _ => String::new(),
  })
}

/// One link or a list of links. Non-string list entries are skipped.
fn lenient_links<'de, D: Deserializer<'de>>(de: D) -> Result<Vec<String>, D::Error> {
  Ok(match Value::deserialize(de)? {
    Value::String(link) if link.is_empty() => Vec::new(),
    Value::String(link) => vec![link],
    Value::Array(items) => items
      .into_iter()
      .filter_map(|item| match item {
        Value::String(link) => Some(link),
        _ => None,
      })
      .collect(),
    _ => Vec::new(),
  })
}

impl From<ImportedEvent> for NewEvent {
  fn from(raw: ImportedEvent) -> Self {
    Self {
      date:                     raw.date,
      description:              raw.description,
      tag:                      raw.tag,
      file_link:                raw.file_link,
      condemnation:             raw.condemnation,
      condemnation_description: raw.condemnation_description,
    }
  }
}

/// Parse an events file: a JSON array of event objects.
pub fn parse_events(json: &str) -> Result<Vec<NewEvent>> {
  events_from_value(serde_json::from_str(json)?)
}

pub fn events_from_value(value: Value) -> Result<Vec<NewEvent>> {
  let raw: Vec<ImportedEvent> = serde_json::from_value(value)?;
  Ok(raw.into_iter().map(NewEvent::from).collect())
}

/// Pretty-printed JSON array of the events' data fields, without ids.
pub fn export_events(events: &[Event]) -> Result<String> {
  let records: Vec<NewEvent> = events.iter().map(Event::to_record).collect();
  Ok(serde_json::to_string_pretty(&records)?)
}

// ─── Topics ──────────────────────────────────────────────────────────────────

/// Parse a topics file: a JSON array of `{id, content}` objects.
pub fn parse_topics(json: &str) -> Result<Vec<TopicContent>> {
  topics_from_value(serde_json::from_str(json)?)
}

pub fn topics_from_value(value: Value) -> Result<Vec<TopicContent>> {
  Ok(serde_json::from_value(value)?)
}

pub fn export_topics(contents: &[TopicContent]) -> Result<String> {
  Ok(serde_json::to_string_pretty(contents)?)
}
