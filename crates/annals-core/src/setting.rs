//! Settings: named configuration values and the typed accessor over them.
//!
//! Values are stored as JSON. The accessor never caches: every read is a round
//! trip to the store, so independent consumers (pages, CLI invocations, the
//! API) always observe the latest committed value. Concurrent writers are
//! last-write-wins.

use chrono::Utc;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::{Error, Result, store::RecordStore, topic::TopicDescriptor};

// ─── Keys ────────────────────────────────────────────────────────────────────

/// The fixed set of well-known setting names.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  EnumIter,
  IntoStaticStr,
)]
pub enum SettingKey {
  /// Sequence of tag strings.
  #[serde(rename = "tags")]
  #[strum(serialize = "tags")]
  Tags,
  /// Sequence of condemnation labels.
  #[serde(rename = "condemnations")]
  #[strum(serialize = "condemnations")]
  Condemnations,
  /// Sequence of [`TopicDescriptor`]s.
  #[serde(rename = "topicsList")]
  #[strum(serialize = "topicsList")]
  TopicsList,
  #[serde(rename = "github_token")]
  #[strum(serialize = "github_token")]
  GithubToken,
  #[serde(rename = "gist_id")]
  #[strum(serialize = "gist_id")]
  GistId,
}

impl SettingKey {
  /// The keys that must always be present once a store has been bootstrapped.
  pub const TAXONOMIES: [SettingKey; 3] =
    [SettingKey::Tags, SettingKey::Condemnations, SettingKey::TopicsList];

  /// The name under which the value is stored.
  pub fn as_str(self) -> &'static str { self.into() }

  pub fn is_taxonomy(self) -> bool { Self::TAXONOMIES.contains(&self) }

  /// The value reported for a key that has never been written.
  pub fn empty_value(self) -> Value {
    if self.is_taxonomy() {
      Value::Array(Vec::new())
    } else {
      Value::Null
    }
  }

  /// Reject payloads that do not match the key's expected shape.
  pub fn check_shape(self, value: &Value) -> Result<()> {
    let ok = match self {
      Self::Tags | Self::Condemnations => {
        serde_json::from_value::<Vec<String>>(value.clone()).is_ok()
      }
      Self::TopicsList => {
        serde_json::from_value::<Vec<TopicDescriptor>>(value.clone()).is_ok()
      }
      Self::GithubToken | Self::GistId => value.is_string() || value.is_null(),
    };
    if ok {
      return Ok(());
    }
    let expected = match self {
      Self::Tags | Self::Condemnations => "an array of strings",
      Self::TopicsList => "an array of {id, name} objects",
      Self::GithubToken | Self::GistId => "a string or null",
    };
    Err(Error::InvalidSettingValue { key: self, expected })
  }
}

// ─── Accessor ────────────────────────────────────────────────────────────────

/// Typed get/put helpers over the settings collection of a [`RecordStore`].
///
/// Cheap to construct; holds only a borrow of the store.
pub struct Settings<'a, S> {
  store: &'a S,
}

impl<'a, S: RecordStore> Settings<'a, S> {
  pub fn new(store: &'a S) -> Self { Self { store } }

  // ── Untyped ─────────────────────────────────────────────────────────────

  /// The stored value for `key`, or [`SettingKey::empty_value`] if the key has
  /// never been written. A missing key is not an error.
  pub async fn get(&self, key: SettingKey) -> Result<Value> {
    let stored = self.store.get_setting(key).await.map_err(Error::store)?;
    Ok(stored.unwrap_or_else(|| key.empty_value()))
  }

  /// Upsert `value` under `key`, unconditionally overwriting.
  pub async fn set(&self, key: SettingKey, value: Value) -> Result<()> {
    key.check_shape(&value)?;
    self
      .store
      .put_setting(key, value)
      .await
      .map_err(Error::store)
  }

  async fn get_typed<T>(&self, key: SettingKey) -> Result<T>
  where
    T: DeserializeOwned + Default,
  {
    match self.store.get_setting(key).await.map_err(Error::store)? {
      None | Some(Value::Null) => Ok(T::default()),
      Some(value) => Ok(serde_json::from_value(value)?),
    }
  }

  async fn set_typed<T: Serialize>(&self, key: SettingKey, value: &T) -> Result<()> {
    let value = serde_json::to_value(value)?;
    self.set(key, value).await
  }

  // ── Taxonomies ──────────────────────────────────────────────────────────

  pub async fn tags(&self) -> Result<Vec<String>> {
    self.get_typed(SettingKey::Tags).await
  }

  pub async fn condemnations(&self) -> Result<Vec<String>> {
    self.get_typed(SettingKey::Condemnations).await
  }

  pub async fn topics(&self) -> Result<Vec<TopicDescriptor>> {
    self.get_typed(SettingKey::TopicsList).await
  }

  pub async fn set_tags(&self, tags: &[String]) -> Result<()> {
    self.set_typed(SettingKey::Tags, &tags).await
  }

  pub async fn set_condemnations(&self, condemnations: &[String]) -> Result<()> {
    self.set_typed(SettingKey::Condemnations, &condemnations).await
  }

  pub async fn set_topics(&self, topics: &[TopicDescriptor]) -> Result<()> {
    self.set_typed(SettingKey::TopicsList, &topics).await
  }

  pub async fn add_tag(&self, tag: &str) -> Result<Vec<String>> {
    self.add_label(SettingKey::Tags, tag).await
  }

  pub async fn add_condemnation(&self, label: &str) -> Result<Vec<String>> {
    self.add_label(SettingKey::Condemnations, label).await
  }

  async fn add_label(&self, key: SettingKey, label: &str) -> Result<Vec<String>> {
    let label = label.trim();
    if label.is_empty() {
      return Err(Error::Validation(format!("{key} entries cannot be empty")));
    }

    let mut items: Vec<String> = self.get_typed(key).await?;
    if items.iter().any(|existing| existing == label) {
      return Err(Error::Duplicate { key, value: label.to_owned() });
    }
    items.push(label.to_owned());
    self.set_typed(key, &items).await?;
    Ok(items)
  }

  /// Append a topic named `name` with a freshly generated id.
  ///
  /// Ids are the current Unix time in milliseconds, bumped until unique.
  pub async fn add_topic(&self, name: &str) -> Result<TopicDescriptor> {
    let name = name.trim();
    if name.is_empty() {
      return Err(Error::Validation("topic name cannot be empty".into()));
    }

    let mut topics = self.topics().await?;
    if topics.iter().any(|t| t.name == name) {
      return Err(Error::Duplicate {
        key:   SettingKey::TopicsList,
        value: name.to_owned(),
      });
    }

    let mut millis = Utc::now().timestamp_millis();
    while topics.iter().any(|t| t.id == millis.to_string()) {
      millis += 1;
    }

    let topic = TopicDescriptor::new(millis.to_string(), name);
    topics.push(topic.clone());
    self.set_topics(&topics).await?;
    Ok(topic)
  }

  /// Remove the item at `index` from a taxonomy list and return the remaining
  /// list.
  pub async fn remove_item(&self, key: SettingKey, index: usize) -> Result<Value> {
    if !key.is_taxonomy() {
      return Err(Error::InvalidSettingValue { key, expected: "a list" });
    }

    let mut items: Vec<Value> = self.get_typed(key).await?;
    if index >= items.len() {
      return Err(Error::IndexOutOfRange { key, index });
    }
    items.remove(index);

    let remaining = Value::Array(items);
    self.set(key, remaining.clone()).await?;
    Ok(remaining)
  }

  // ── Sync credentials ────────────────────────────────────────────────────

  /// The configured token; an empty string counts as unset.
  pub async fn github_token(&self) -> Result<Option<String>> {
    self.non_empty(SettingKey::GithubToken).await
  }

  /// The configured remote resource id; an empty string counts as unset.
  pub async fn gist_id(&self) -> Result<Option<String>> {
    self.non_empty(SettingKey::GistId).await
  }

  /// Store both credentials, trimmed. Empty strings are kept as written.
  pub async fn set_credentials(&self, token: &str, gist_id: &str) -> Result<()> {
    self
      .set(SettingKey::GithubToken, Value::String(token.trim().to_owned()))
      .await?;
    self
      .set(SettingKey::GistId, Value::String(gist_id.trim().to_owned()))
      .await
  }

  async fn non_empty(&self, key: SettingKey) -> Result<Option<String>> {
    let value: Option<String> = self.get_typed(key).await?;
    Ok(value.filter(|s| !s.trim().is_empty()))
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn keys_round_trip_through_their_stored_names() {
    use strum::IntoEnumIterator as _;

    for key in SettingKey::iter() {
      assert_eq!(key.as_str().parse::<SettingKey>().unwrap(), key);
      let via_serde: SettingKey =
        serde_json::from_value(json!(key.as_str())).unwrap();
      assert_eq!(via_serde, key);
    }
    assert_eq!(SettingKey::TopicsList.as_str(), "topicsList");
  }

  #[test]
  fn empty_values_depend_on_key() {
    assert_eq!(SettingKey::Tags.empty_value(), json!([]));
    assert_eq!(SettingKey::TopicsList.empty_value(), json!([]));
    assert_eq!(SettingKey::GistId.empty_value(), Value::Null);
  }

  #[test]
  fn check_shape_rejects_mismatched_payloads() {
    assert!(SettingKey::Tags.check_shape(&json!(["a", "b"])).is_ok());
    assert!(SettingKey::Tags.check_shape(&json!([])).is_ok());
    assert!(SettingKey::Tags.check_shape(&json!("a")).is_err());
    assert!(
      SettingKey::TopicsList
        .check_shape(&json!([{ "id": "1", "name": "x" }]))
        .is_ok()
    );
    assert!(SettingKey::TopicsList.check_shape(&json!(["x"])).is_err());
    assert!(SettingKey::GithubToken.check_shape(&json!("t")).is_ok());
    assert!(SettingKey::GithubToken.check_shape(&json!(3)).is_err());
  }
}
