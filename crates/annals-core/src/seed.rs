//! Seeding policy: baseline taxonomy values written only where absent.
//!
//! The trigger is absence, not emptiness: a key that was explicitly saved as
//! an empty list is left alone. Running the policy any number of times over a
//! store whose taxonomies the user has edited never reintroduces defaults.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
  Error, Result,
  setting::{SettingKey, Settings},
  store::RecordStore,
  topic::{TopicContent, TopicDescriptor},
};

pub const DEFAULT_TAGS: [&str; 5] = ["قوي جدا", "قوي", "متوسط", "ضعيف", "لا اعرف"];

pub const DEFAULT_CONDEMNATIONS: [&str; 3] =
  ["إدانة صريحة", "إدانة ضمنية", "لا توجد إدانة"];

pub const DEFAULT_TOPICS: [(&str, &str); 3] =
  [("1", "ملاحظات عامة"), ("2", "الأشخاص"), ("3", "الأماكن")];

/// Baseline taxonomies written into a fresh store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedDefaults {
  pub tags:          Vec<String>,
  pub condemnations: Vec<String>,
  pub topics:        Vec<TopicDescriptor>,
}

impl Default for SeedDefaults {
  fn default() -> Self {
    Self {
      tags:          DEFAULT_TAGS.iter().map(|s| s.to_string()).collect(),
      condemnations: DEFAULT_CONDEMNATIONS.iter().map(|s| s.to_string()).collect(),
      topics:        DEFAULT_TOPICS
        .iter()
        .map(|(id, name)| TopicDescriptor::new(*id, *name))
        .collect(),
    }
  }
}

impl SeedDefaults {
  fn value_for(&self, key: SettingKey) -> Result<Value> {
    let value = match key {
      SettingKey::Tags => serde_json::to_value(&self.tags)?,
      SettingKey::Condemnations => serde_json::to_value(&self.condemnations)?,
      SettingKey::TopicsList => serde_json::to_value(&self.topics)?,
      SettingKey::GithubToken | SettingKey::GistId => Value::Null,
    };
    Ok(value)
  }
}

/// Write baseline values for exactly those taxonomy keys that have never been
/// written. Returns the keys that were seeded.
pub async fn seed_missing_settings<S: RecordStore>(
  store: &S,
  defaults: &SeedDefaults,
) -> Result<Vec<SettingKey>> {
  let mut seeded = Vec::new();
  for key in SettingKey::TAXONOMIES {
    let value = defaults.value_for(key)?;
    let written = store
      .insert_setting_if_absent(key, value)
      .await
      .map_err(Error::store)?;
    if written {
      tracing::info!(%key, "seeded default setting");
      seeded.push(key);
    }
  }
  Ok(seeded)
}

/// Give every topic in `topicsList` an empty content entry, but only while the
/// topic-contents collection is completely empty. Returns the number of
/// entries written.
pub async fn seed_topic_contents<S: RecordStore>(store: &S) -> Result<usize> {
  let existing = store.count_topic_contents().await.map_err(Error::store)?;
  if existing > 0 {
    return Ok(0);
  }

  let topics = Settings::new(store).topics().await?;
  if topics.is_empty() {
    return Ok(0);
  }

  let contents = topics
    .into_iter()
    .map(|t| TopicContent::empty(t.id))
    .collect();
  let written = store
    .replace_topic_contents(contents)
    .await
    .map_err(Error::store)?;
  tracing::info!(written, "initialised empty topic contents");
  Ok(written)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn default_taxonomies_have_expected_sizes() {
    let d = SeedDefaults::default();
    assert_eq!(d.tags.len(), 5);
    assert_eq!(d.condemnations.len(), 3);
    assert_eq!(d.topics.len(), 3);
    assert_eq!(d.tags[0], DEFAULT_TAGS[0]);
  }

  #[test]
  fn partial_config_falls_back_to_builtin_lists() {
    let d: SeedDefaults =
      serde_json::from_str(r#"{"tags":["a","b"]}"#).unwrap();
    assert_eq!(d.tags, vec!["a".to_string(), "b".to_string()]);
    assert_eq!(d.condemnations.len(), DEFAULT_CONDEMNATIONS.len());
  }
}
