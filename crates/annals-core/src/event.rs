//! Event records: dated incidents with a description and classification.
//!
//! Every stored event carries all six data fields. Absent values are stored
//! as empty strings or an empty link list, never as nulls.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{Error, Result, links};

// ─── Identity ────────────────────────────────────────────────────────────────

/// Store-assigned identifier, stable for the lifetime of the record.
///
/// Identifiers are not preserved across a full collection replacement.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct EventId(pub i64);

impl fmt::Display for EventId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl FromStr for EventId {
  type Err = std::num::ParseIntError;

  fn from_str(s: &str) -> Result<Self, Self::Err> { s.trim().parse().map(Self) }
}

// ─── Event ───────────────────────────────────────────────────────────────────

/// A persisted event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
  pub id:                       EventId,
  /// Day-month-year, e.g. `05-03-2024`. Not validated against a calendar.
  pub date:                     String,
  pub description:              String,
  /// One of the configured tags, or empty.
  pub tag:                      String,
  /// External references to supporting documents, in display order.
  pub file_link:                Vec<String>,
  /// One of the configured condemnation labels, or empty.
  pub condemnation:             String,
  pub condemnation_description: String,
}

impl Event {
  /// The data fields without the identifier, i.e. the export shape.
  pub fn to_record(&self) -> NewEvent {
    NewEvent {
      date:                     self.date.clone(),
      description:              self.description.clone(),
      tag:                      self.tag.clone(),
      file_link:                self.file_link.clone(),
      condemnation:             self.condemnation.clone(),
      condemnation_description: self.condemnation_description.clone(),
    }
  }

  /// Overwrite the editable fields with `edit`. The date is kept; an event's
  /// date is fixed once it has been created.
  pub fn apply_edit(&mut self, edit: NewEvent) {
    self.description = edit.description;
    self.tag = edit.tag;
    self.file_link = links::tidy(edit.file_link);
    self.condemnation = edit.condemnation;
    self.condemnation_description = edit.condemnation_description;
  }
}

// ─── NewEvent ────────────────────────────────────────────────────────────────

/// Input to [`crate::store::RecordStore::add_event`] and the import/export
/// record shape. The identifier is always assigned by the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEvent {
  pub date:                     String,
  pub description:              String,
  pub tag:                      String,
  pub file_link:                Vec<String>,
  pub condemnation:             String,
  pub condemnation_description: String,
}

impl NewEvent {
  /// Convenience constructor with every optional field left empty.
  pub fn new(date: impl Into<String>, description: impl Into<String>) -> Self {
    Self {
      date: date.into(),
      description: description.into(),
      ..Self::default()
    }
  }

  /// A manually entered event needs both a date and a description.
  pub fn validate(&self) -> Result<()> {
    if self.date.trim().is_empty() {
      return Err(Error::Validation("event date is required".into()));
    }
    if self.description.trim().is_empty() {
      return Err(Error::Validation("event description is required".into()));
    }
    Ok(())
  }

  pub fn with_id(self, id: EventId) -> Event {
    Event {
      id,
      date: self.date,
      description: self.description,
      tag: self.tag,
      file_link: self.file_link,
      condemnation: self.condemnation,
      condemnation_description: self.condemnation_description,
    }
  }
}
