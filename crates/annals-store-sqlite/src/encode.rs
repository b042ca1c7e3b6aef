//! Encoding and decoding helpers between domain types and SQLite columns.
//!
//! File links and setting values are stored as compact JSON text; everything
//! else is plain text.

use annals_core::{
  event::{Event, EventId, NewEvent},
  links,
};

use crate::Result;

// ─── File links ──────────────────────────────────────────────────────────────

pub fn encode_links(links: &[String]) -> Result<String> {
  Ok(serde_json::to_string(links)?)
}

pub fn decode_links(s: &str) -> Result<Vec<String>> { Ok(serde_json::from_str(s)?) }

// ─── Setting values ──────────────────────────────────────────────────────────

pub fn encode_value(value: &serde_json::Value) -> Result<String> {
  Ok(serde_json::to_string(value)?)
}

pub fn decode_value(s: &str) -> Result<serde_json::Value> { Ok(serde_json::from_str(s)?) }

// ─── Row types ───────────────────────────────────────────────────────────────

/// Column values for an `events` row, ready to bind.
pub struct EventRow {
  pub date:                     String,
  pub description:              String,
  pub tag:                      String,
  pub file_links:               String,
  pub condemnation:             String,
  pub condemnation_description: String,
}

impl EventRow {
  /// Encode an imported record as-is.
  pub fn from_record(e: NewEvent) -> Result<Self> {
    Ok(Self {
      file_links:               encode_links(&e.file_link)?,
      date:                     e.date,
      description:              e.description,
      tag:                      e.tag,
      condemnation:             e.condemnation,
      condemnation_description: e.condemnation_description,
    })
  }

  /// Encode a manually entered record, dropping blank links.
  pub fn from_entry(mut e: NewEvent) -> Result<Self> {
    e.file_link = links::tidy(e.file_link);
    Self::from_record(e)
  }

  pub fn from_event(e: &Event) -> Result<Self> {
    Self::from_record(e.to_record())
  }
}

/// Raw values read directly from an `events` row.
pub struct RawEvent {
  pub id:                       i64,
  pub date:                     String,
  pub description:              String,
  pub tag:                      String,
  pub file_links:               String,
  pub condemnation:             String,
  pub condemnation_description: String,
}

impl RawEvent {
  pub const COLUMNS: &'static str =
    "id, date, description, tag, file_links, condemnation, condemnation_description";

  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:                       row.get(0)?,
      date:                     row.get(1)?,
      description:              row.get(2)?,
      tag:                      row.get(3)?,
      file_links:               row.get(4)?,
      condemnation:             row.get(5)?,
      condemnation_description: row.get(6)?,
    })
  }

  pub fn into_event(self) -> Result<Event> {
    Ok(Event {
      id:                       EventId(self.id),
      date:                     self.date,
      description:              self.description,
      tag:                      self.tag,
      file_link:                decode_links(&self.file_links)?,
      condemnation:             self.condemnation,
      condemnation_description: self.condemnation_description,
    })
  }
}
