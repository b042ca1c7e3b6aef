//! Session-scoped view state.
//!
//! Lives only as long as the process that holds it and is never written to
//! the store.

use serde::{Deserialize, Serialize};

use crate::search::SearchQuery;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionState {
  /// Last search query and filters.
  pub search:            SearchQuery,
  /// Scroll offset of the search results when the user left them.
  pub scroll_position:   Option<u32>,
  pub selected_topic_id: Option<String>,
  pub topic_scroll_top:  Option<u32>,
}

impl SessionState {
  /// Forget the remembered search, as when navigating back to the main view
  /// without a selected event.
  pub fn clear_search(&mut self) {
    self.search = SearchQuery::default();
    self.scroll_position = None;
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn clear_search_keeps_topic_selection() {
    let mut s = SessionState {
      search: SearchQuery { text: "x".into(), ..SearchQuery::default() },
      scroll_position: Some(120),
      selected_topic_id: Some("1".into()),
      topic_scroll_top: Some(4),
    };
    s.clear_search();
    assert!(s.search.is_empty());
    assert_eq!(s.scroll_position, None);
    assert_eq!(s.selected_topic_id.as_deref(), Some("1"));
  }
}
