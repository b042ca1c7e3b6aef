//! Topics: named long-form text buckets.
//!
//! The list of topics is a taxonomy kept under the `topicsList` setting; the
//! text itself lives in the topic-contents collection keyed by the same id.
//! Neither side enforces the link. Removing a topic from the taxonomy leaves
//! its content in place, unreachable from the topic list.

use serde::{Deserialize, Serialize};

/// An entry of the `topicsList` taxonomy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicDescriptor {
  pub id:   String,
  pub name: String,
}

impl TopicDescriptor {
  pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
    Self { id: id.into(), name: name.into() }
  }
}

/// The free-form text stored for one topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicContent {
  pub id:      String,
  #[serde(default)]
  pub content: String,
}

impl TopicContent {
  pub fn new(id: impl Into<String>, content: impl Into<String>) -> Self {
    Self { id: id.into(), content: content.into() }
  }

  /// An empty content entry, written when topic contents are first seeded.
  pub fn empty(id: impl Into<String>) -> Self { Self::new(id, "") }
}
