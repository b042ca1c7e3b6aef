//! Configuration: an optional TOML file layered under `ANNALS_*` environment
//! variables. Nested keys use `__`, e.g. `ANNALS_REMOTE__API_BASE`.

use std::path::{Path, PathBuf};

use annals_core::{bootstrap::PageConfig, seed::SeedDefaults};
use annals_sync::RemoteConfig;
use anyhow::Context as _;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
  pub store_path: PathBuf,
  pub host:       String,
  pub port:       u16,
  /// Directory for exports and for pushes that fall back to a local file.
  pub export_dir: PathBuf,
  pub remote:     RemoteSection,
  pub seed:       SeedDefaults,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RemoteSection {
  pub api_base:    String,
  pub events_file: String,
  pub topics_file: String,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      store_path: PathBuf::from("annals.db"),
      host:       "127.0.0.1".to_string(),
      port:       8787,
      export_dir: PathBuf::from("."),
      remote:     RemoteSection::default(),
      seed:       SeedDefaults::default(),
    }
  }
}

impl Default for RemoteSection {
  fn default() -> Self {
    let page = PageConfig::default();
    Self {
      api_base:    RemoteConfig::default().api_base,
      events_file: page.events_file,
      topics_file: page.topics_file,
    }
  }
}

impl Config {
  /// Read `path` (if it exists) and the environment.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    let settings = ::config::Config::builder()
      .add_source(::config::File::from(path).required(false))
      .add_source(
        ::config::Environment::with_prefix("ANNALS")
          .prefix_separator("_")
          .separator("__"),
      )
      .build()
      .with_context(|| format!("failed to read config file {}", path.display()))?;

    let mut cfg: Config = settings
      .try_deserialize()
      .context("failed to deserialise configuration")?;
    cfg.store_path = expand_tilde(&cfg.store_path);
    cfg.export_dir = expand_tilde(&cfg.export_dir);
    Ok(cfg)
  }

  /// What every bootstrap is handed.
  pub fn page_config(&self) -> PageConfig {
    PageConfig {
      seed:        self.seed.clone(),
      events_file: self.remote.events_file.clone(),
      topics_file: self.remote.topics_file.clone(),
    }
  }

  pub fn remote_config(&self) -> RemoteConfig {
    RemoteConfig { api_base: self.remote.api_base.clone() }
  }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn missing_file_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = Config::load(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(cfg.port, 8787);
    assert_eq!(cfg.remote.events_file, "events.json");
    assert_eq!(cfg.seed, SeedDefaults::default());
  }

  #[test]
  fn file_overrides_nested_keys() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("annals.toml");
    std::fs::write(
      &path,
      r#"
port = 9000

[remote]
topics_file = "notes.json"

[seed]
tags = ["a", "b"]
"#,
    )
    .unwrap();

    let cfg = Config::load(&path).unwrap();
    assert_eq!(cfg.port, 9000);
    assert_eq!(cfg.remote.topics_file, "notes.json");
    assert_eq!(cfg.remote.events_file, "events.json");

    let page = cfg.page_config();
    assert_eq!(page.topics_file, "notes.json");
    assert_eq!(page.seed.tags, vec!["a".to_string(), "b".to_string()]);
  }

  #[test]
  fn tilde_expands_to_home() {
    let Ok(home) = std::env::var("HOME") else { return };
    assert_eq!(expand_tilde(Path::new("~/x.db")), PathBuf::from(home).join("x.db"));
    assert_eq!(expand_tilde(Path::new("/abs/x.db")), PathBuf::from("/abs/x.db"));
  }
}
