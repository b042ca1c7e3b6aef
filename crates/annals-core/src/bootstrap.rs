//! Per-page startup.
//!
//! There is no long-lived process shared between consumers of the store. Each
//! one (a page, a CLI invocation, a server) opens the store itself and runs
//! [`bootstrap`] with the [`PageConfig`] it was handed.

use serde::{Deserialize, Serialize};

use crate::{
  Result,
  collection::Collection,
  seed::{SeedDefaults, seed_missing_settings, seed_topic_contents},
  setting::SettingKey,
};

/// Configuration handed to every bootstrap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
  pub seed:        SeedDefaults,
  /// Name of the exported / remote file holding the events collection.
  pub events_file: String,
  /// Name of the exported / remote file holding the topic contents.
  pub topics_file: String,
}

impl Default for PageConfig {
  fn default() -> Self {
    Self {
      seed:        SeedDefaults::default(),
      events_file: Collection::Events.default_file_name().to_owned(),
      topics_file: Collection::Topics.default_file_name().to_owned(),
    }
  }
}

impl PageConfig {
  pub fn file_name(&self, collection: Collection) -> &str {
    match collection {
      Collection::Events => &self.events_file,
      Collection::Topics => &self.topics_file,
    }
  }
}

/// What a bootstrap run wrote.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BootReport {
  pub seeded_settings: Vec<SettingKey>,
  pub seeded_topics:   usize,
}

/// Seed any missing taxonomy, then give topics empty content if the
/// topic-contents collection has never been populated.
pub async fn bootstrap<S: crate::store::RecordStore>(
  store: &S,
  config: &PageConfig,
) -> Result<BootReport> {
  let seeded_settings = seed_missing_settings(store, &config.seed).await?;
  let seeded_topics = seed_topic_contents(store).await?;
  tracing::debug!(?seeded_settings, seeded_topics, "bootstrap complete");
  Ok(BootReport { seeded_settings, seeded_topics })
}
