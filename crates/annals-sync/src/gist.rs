//! HTTP client for the remote resource.
//!
//! The resource is a gist: `GET {api_base}/gists/{id}` returns an envelope
//! whose `files` map holds each file's text under `content`. The collection
//! JSON is therefore double-encoded, a JSON document inside a JSON string.
//! Updates `PATCH` the same URL with replacement contents for a named file.

use std::{collections::HashMap, time::Duration};

use reqwest::{Client, StatusCode, header};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{Error, Result};

/// Where the remote API lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
  pub api_base: String,
}

impl Default for RemoteConfig {
  fn default() -> Self { Self { api_base: "https://api.github.com".to_string() } }
}

#[derive(Deserialize)]
struct Envelope {
  #[serde(default)]
  files: HashMap<String, EnvelopeFile>,
}

#[derive(Deserialize)]
struct EnvelopeFile {
  content: Option<String>,
}

/// Async client for the gist API.
///
/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct GistClient {
  client:   Client,
  api_base: String,
}

impl GistClient {
  pub fn new(config: &RemoteConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .user_agent(concat!("annals/", env!("CARGO_PKG_VERSION")))
      .build()?;
    Ok(Self { client, api_base: config.api_base.trim_end_matches('/').to_owned() })
  }

  fn gist_url(&self, gist_id: &str) -> String {
    format!("{}/gists/{}", self.api_base, gist_id)
  }

  /// `GET /gists/{id}` and return the text of `file_name`.
  pub async fn fetch_file(&self, gist_id: &str, file_name: &str) -> Result<String> {
    let resp = self
      .client
      .get(self.gist_url(gist_id))
      .header(header::ACCEPT, "application/vnd.github+json")
      .send()
      .await?;

    let status = resp.status();
    if !status.is_success() {
      return Err(Error::Status(status));
    }

    let body = resp.text().await?;
    let mut envelope: Envelope = serde_json::from_str(&body)?;
    envelope
      .files
      .remove(file_name)
      .and_then(|f| f.content)
      .ok_or_else(|| Error::MissingFile(file_name.to_owned()))
  }

  /// `PATCH /gists/{id}` replacing the whole content of `file_name`.
  pub async fn update_file(
    &self,
    gist_id: &str,
    token: &str,
    file_name: &str,
    content: &str,
  ) -> Result<()> {
    let body = json!({ "files": { file_name: { "content": content } } });

    let resp = self
      .client
      .patch(self.gist_url(gist_id))
      .header(header::ACCEPT, "application/vnd.github+json")
      .bearer_auth(token)
      .json(&body)
      .send()
      .await?;

    match resp.status() {
      s if s.is_success() => Ok(()),
      s @ (StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) => Err(Error::Unauthorized(s)),
      s => Err(Error::Status(s)),
    }
  }
}
