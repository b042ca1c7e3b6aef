//! The two record collections that can be exported, imported and synced.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Collection {
  Events,
  Topics,
}

impl Collection {
  /// File name used for local exports and for the remote file when none is
  /// configured.
  pub fn default_file_name(self) -> &'static str {
    match self {
      Self::Events => "events.json",
      Self::Topics => "topics.json",
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_lowercase_names() {
    assert_eq!("events".parse::<Collection>().unwrap(), Collection::Events);
    assert_eq!("topics".parse::<Collection>().unwrap(), Collection::Topics);
    assert!("settings".parse::<Collection>().is_err());
    assert_eq!(Collection::Topics.to_string(), "topics");
  }
}
